//! Screenshot processor: identifies the navigation app and scrapes ETA,
//! distance and congestion level from the recognized text.

use image::DynamicImage;
use tracing::info;

use crate::error::ProcessError;
use crate::extract;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{ExtractionResult, ImageKind, Payload, ScreenshotRecord, TrafficInfo};

pub fn process(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
) -> Result<ExtractionResult, ProcessError> {
    let text = recognizer.recognize(image, RecognitionMode::Block)?;

    let record = build_record(&text);
    let count = record.traffic_info.populated();
    info!(app = ?record.app_type, fields = count, "screenshot processed");

    Ok(ExtractionResult::success(
        ImageKind::Screenshot,
        Payload::Screenshot(record),
        count,
    ))
}

pub(crate) fn build_record(text: &str) -> ScreenshotRecord {
    ScreenshotRecord {
        app_type: extract::app_type(text),
        traffic_info: TrafficInfo {
            estimated_time: extract::time_estimate(text),
            distance: extract::distance(text),
            traffic_level: extract::traffic_level(text),
        },
    }
}
