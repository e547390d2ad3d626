//! Generic fallback processor: raw OCR text plus every numeric token, with
//! no further structuring.

use image::DynamicImage;
use tracing::info;

use crate::error::ProcessError;
use crate::extract;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{ExtractionResult, GenericRecord, ImageKind, Payload};

pub fn process(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
) -> Result<ExtractionResult, ProcessError> {
    let text = recognizer.recognize(image, RecognitionMode::Document)?;
    let numbers = extract::numeric_series(&text);
    let count = numbers.len();
    info!(numbers = count, "generic extraction");

    Ok(ExtractionResult::success(
        ImageKind::Generic,
        Payload::Generic(GenericRecord { text, numbers }),
        count,
    ))
}
