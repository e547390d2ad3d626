//! Table processor: reconstructs rows from column-aligned OCR text. The
//! first valid line becomes the header; later lines zip against it.

use image::DynamicImage;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::ProcessError;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{ExtractionResult, ImageKind, Payload, TableRecord};

/// Column-aligned OCR output separates cells with runs of spaces or tabs.
static CELL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}|\t").unwrap());

pub fn process(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
) -> Result<ExtractionResult, ProcessError> {
    // Tables recognize better from the grayscale raster.
    let gray = DynamicImage::ImageLuma8(image.to_luma8());
    let text = recognizer.recognize(&gray, RecognitionMode::Block)?;

    let record = parse_table(&text);
    let count = record.rows.len();
    info!(rows = count, columns = record.columns.len(), "table processed");

    Ok(ExtractionResult::success(
        ImageKind::Table,
        Payload::Table(record),
        count,
    ))
}

/// Split text into cells and zip rows against the header. Lines yielding a
/// single cell are discarded; a cell-count mismatch against the header is
/// handled best-effort (surplus cells dropped, missing columns absent).
pub(crate) fn parse_table(text: &str) -> TableRecord {
    let mut lines: Vec<Vec<String>> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cells: Vec<String> = CELL_SPLIT.split(line).map(str::to_string).collect();
        if cells.len() > 1 {
            lines.push(cells);
        }
    }

    if lines.len() < 2 {
        return TableRecord {
            columns: Vec::new(),
            rows: Vec::new(),
            note: Some("no valid table structure detected".to_string()),
        };
    }

    let columns = lines[0].clone();
    let rows = lines[1..]
        .iter()
        .map(|cells| {
            columns
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect::<IndexMap<_, _>>()
        })
        .collect();

    TableRecord {
        columns,
        rows,
        note: None,
    }
}
