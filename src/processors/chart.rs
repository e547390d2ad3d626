//! Chart processor: lifts the numeric series out of the recognized text and
//! tags it with the detected chart shape.

use image::DynamicImage;
use tracing::info;

use crate::error::ProcessError;
use crate::extract;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{ChartRecord, ChartType, ExtractionResult, ImageKind, Payload};
use crate::structure::StructureDetector;

/// Hour-aligned assumption: one data point per hour of the day.
const MAX_POINTS: usize = 24;

pub fn process(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
    detector: &StructureDetector,
) -> Result<ExtractionResult, ProcessError> {
    let text = recognizer.recognize(image, RecognitionMode::Block)?;
    let chart_type = detector.chart_type(image);

    let record = build_record(extract::numeric_series(&text), chart_type);
    let count = record.values.len();
    info!(values = count, ?chart_type, "chart processed");

    Ok(ExtractionResult::success(
        ImageKind::Chart,
        Payload::Chart(record),
        count,
    ))
}

pub(crate) fn build_record(mut values: Vec<f64>, chart_type: ChartType) -> ChartRecord {
    values.truncate(MAX_POINTS);
    let labels = (0..values.len()).map(|i| format!("Hour {i}")).collect();
    ChartRecord {
        values,
        labels,
        chart_type,
    }
}
