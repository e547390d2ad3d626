//! TrafficFlow: extracts structured traffic data from heterogeneous images
//! (traffic maps, charts, app screenshots, tables) using OCR and heuristic
//! pixel analysis.
//!
//! The [`Pipeline`] is the core boundary: callers hand it an image (path,
//! bytes or decoded raster) plus an optional type hint and always get an
//! [`ExtractionResult`] back; failures are folded into the envelope, never
//! propagated.

pub mod classify;
pub mod color;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod processors;
pub mod records;
pub mod structure;

use std::path::Path;

use image::DynamicImage;
use tracing::{error, info};

use crate::classify::Classifier;
use crate::color::ColorSegmenter;
use crate::error::ProcessError;
use crate::ocr::{RecognitionMode, Recognizer, TesseractRecognizer};
use crate::processors::Components;
use crate::records::ImageKind;
use crate::structure::StructureDetector;

pub use crate::records::ExtractionResult;

/// Image containers the path-based entry point accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "pdf"];

/// Caller-supplied processing hint. Anything outside the known set degrades
/// to the generic fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Auto,
    TrafficMap,
    Chart,
    Screenshot,
    Table,
    Generic,
}

impl TypeHint {
    pub fn from_hint(hint: &str) -> Self {
        match hint {
            "auto" => TypeHint::Auto,
            "traffic_map" => TypeHint::TrafficMap,
            "chart" => TypeHint::Chart,
            "screenshot" => TypeHint::Screenshot,
            "table" => TypeHint::Table,
            _ => TypeHint::Generic,
        }
    }
}

/// The extraction pipeline: recognizer, segmenter, structure detector and
/// classifier wired together. Stateless between calls; safe to share across
/// threads, one image per call.
pub struct Pipeline {
    recognizer: Box<dyn Recognizer>,
    segmenter: ColorSegmenter,
    detector: StructureDetector,
    classifier: Classifier,
}

impl Pipeline {
    /// Pipeline with the Tesseract-backed recognizer and default thresholds.
    pub fn new() -> Self {
        Self::with_recognizer(Box::new(TesseractRecognizer::new()))
    }

    /// Pipeline with a caller-supplied recognizer. Lets tests run canned
    /// text through the full dispatch without an OCR engine.
    pub fn with_recognizer(recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            recognizer,
            segmenter: ColorSegmenter::default(),
            detector: StructureDetector::default(),
            classifier: Classifier::default(),
        }
    }

    /// Process an image file. Validates the container extension, decodes,
    /// and delegates; every failure comes back as an error result.
    pub fn process_path(&self, path: impl AsRef<Path>, hint: TypeHint) -> ExtractionResult {
        let path = path.as_ref();
        let source = path.display().to_string();
        info!("Processing image file: {source} (hint {hint:?})");

        match self.load(path) {
            Ok(image) => self.process(&image, &source, hint),
            Err(e) => {
                error!("Failed to load image {source}: {e}");
                ExtractionResult::failure(format!("Processing failed: {e}"))
            }
        }
    }

    /// Process an image already held in memory as encoded bytes.
    pub fn process_bytes(&self, bytes: &[u8], hint: TypeHint) -> ExtractionResult {
        match image::load_from_memory(bytes) {
            Ok(image) => self.process(&image, "<memory>", hint),
            Err(e) => {
                error!("Failed to decode image bytes: {e}");
                ExtractionResult::failure(format!("Processing failed: {e}"))
            }
        }
    }

    /// Process a decoded raster. This is the top-level fault boundary: any
    /// internal failure is converted into an error result here.
    pub fn process(&self, image: &DynamicImage, source: &str, hint: TypeHint) -> ExtractionResult {
        match self.run(image, hint) {
            Ok(result) => result,
            Err(e) => {
                error!("Processing {source} failed: {e}");
                ExtractionResult::failure(format!("Processing failed: {e}"))
            }
        }
    }

    fn run(&self, image: &DynamicImage, hint: TypeHint) -> Result<ExtractionResult, ProcessError> {
        let kind = match hint {
            TypeHint::Auto => self.detect_kind(image)?,
            TypeHint::TrafficMap => ImageKind::TrafficMap,
            TypeHint::Chart => ImageKind::Chart,
            TypeHint::Screenshot => ImageKind::Screenshot,
            TypeHint::Table => ImageKind::Table,
            TypeHint::Generic => ImageKind::Generic,
        };
        info!("Resolved image kind: {kind:?}");

        let parts = Components {
            recognizer: self.recognizer.as_ref(),
            segmenter: &self.segmenter,
            detector: &self.detector,
        };
        processors::run(kind, image, &parts)
    }

    /// Classification pass: document-mode OCR over the grayscale raster plus
    /// the table-structure signal.
    fn detect_kind(&self, image: &DynamicImage) -> Result<ImageKind, ProcessError> {
        let gray = DynamicImage::ImageLuma8(image.to_luma8());
        let text = self
            .recognizer
            .recognize(&gray, RecognitionMode::Document)?;
        let has_table = self.detector.has_table_structure(image);
        Ok(self.classifier.classify(&text, has_table))
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, ProcessError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ProcessError::UnsupportedFormat(extension));
        }
        Ok(image::open(path)?)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
