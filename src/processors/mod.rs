pub mod chart;
pub mod generic;
pub mod screenshot;
pub mod table;
pub mod traffic_map;
#[cfg(test)]
mod tests;

use image::DynamicImage;
use tracing::debug;

use crate::color::ColorSegmenter;
use crate::error::ProcessError;
use crate::ocr::Recognizer;
use crate::records::{ExtractionResult, ImageKind};
use crate::structure::StructureDetector;

/// Shared components handed to every type-specific processor.
pub struct Components<'a> {
    pub recognizer: &'a dyn Recognizer,
    pub segmenter: &'a ColorSegmenter,
    pub detector: &'a StructureDetector,
}

/// Dispatch to the processor matching the resolved image kind. Each
/// processor is terminal: it produces the final result for the call.
pub fn run(
    kind: ImageKind,
    image: &DynamicImage,
    parts: &Components<'_>,
) -> Result<ExtractionResult, ProcessError> {
    debug!(?kind, "dispatching processor");
    match kind {
        ImageKind::TrafficMap => traffic_map::process(image, parts.recognizer, parts.segmenter),
        ImageKind::Chart => chart::process(image, parts.recognizer, parts.detector),
        ImageKind::Screenshot => screenshot::process(image, parts.recognizer),
        ImageKind::Table => table::process(image, parts.recognizer),
        ImageKind::Generic | ImageKind::Error => generic::process(image, parts.recognizer),
    }
}
