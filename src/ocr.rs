//! Text recognizer: Tesseract OCR behind a trait so the pipeline can be
//! exercised with canned text in tests.

use std::io::Cursor;

use image::DynamicImage;
use leptess::{LepTess, Variable};
use tracing::{debug, warn};

use crate::error::ProcessError;

/// Page-segmentation hint passed down to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionMode {
    /// Fully automatic page segmentation (Tesseract PSM 3). Used for type
    /// detection and generic extraction.
    Document,
    /// Assume a single uniform block of text (Tesseract PSM 6). Used by the
    /// type-specific processors.
    Block,
}

impl RecognitionMode {
    fn psm(self) -> &'static str {
        match self {
            RecognitionMode::Document => "3",
            RecognitionMode::Block => "6",
        }
    }
}

/// Every OCR backend implements this. Garbled or empty text is a valid
/// result; only engine-level failures surface as errors.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage, mode: RecognitionMode)
        -> Result<String, ProcessError>;
}

/// Tesseract-backed recognizer. A fresh engine is built per call so calls
/// stay independent and the pipeline can be shared across threads.
pub struct TesseractRecognizer {
    lang: String,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self::with_language("eng")
    }

    pub fn with_language(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(
        &self,
        image: &DynamicImage,
        mode: RecognitionMode,
    ) -> Result<String, ProcessError> {
        let mut engine = LepTess::new(None, &self.lang).map_err(|e| {
            ProcessError::Recognition(format!("failed to initialize Tesseract: {e}"))
        })?;
        engine
            .set_variable(Variable::TesseditPagesegMode, mode.psm())
            .map_err(|e| ProcessError::Recognition(format!("failed to set PSM: {e}")))?;

        // Leptonica wants a standard container, so re-encode in memory.
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .map_err(|e| ProcessError::Recognition(format!("failed to encode raster: {e}")))?;
        engine
            .set_image_from_mem(&png)
            .map_err(|e| ProcessError::Recognition(format!("failed to load raster: {e}")))?;

        let text = engine
            .get_utf8_text()
            .map_err(|e| ProcessError::Recognition(format!("failed to extract text: {e}")))?;

        if text.trim().is_empty() {
            warn!("OCR produced no text");
        } else {
            debug!(chars = text.len(), "OCR text recognized");
        }
        Ok(text)
    }
}
