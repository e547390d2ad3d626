use std::io::Cursor;

use image::{DynamicImage, Rgb, RgbImage};

use crate::error::ProcessError;
use crate::ocr::{RecognitionMode, Recognizer};
use crate::records::{AppType, ChartType, Condition, ImageKind, Payload};
use crate::{Pipeline, TypeHint};

/// Canned-text recognizer so pipeline tests run without a Tesseract install.
struct FixedText(&'static str);

impl Recognizer for FixedText {
    fn recognize(
        &self,
        _image: &DynamicImage,
        _mode: RecognitionMode,
    ) -> Result<String, ProcessError> {
        Ok(self.0.to_string())
    }
}

fn pipeline(text: &'static str) -> Pipeline {
    Pipeline::with_recognizer(Box::new(FixedText(text)))
}

fn white_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255])))
}

#[test]
fn auto_hint_classifies_traffic_map_from_text() {
    let _ = tracing_subscriber::fmt::try_init();
    let result = pipeline("speed 45 km/h traffic map downtown").process(
        &white_image(),
        "<memory>",
        TypeHint::Auto,
    );
    assert_eq!(result.kind, ImageKind::TrafficMap);
    assert!(!result.is_error());
    // all-lowercase text yields no capitalized location names; an empty
    // extraction is still a success
    assert_eq!(result.extracted_count, Some(0));
}

#[test]
fn explicit_hints_are_honored() {
    let img = white_image();
    let p = pipeline("no keywords at all");
    for (hint, kind) in [
        (TypeHint::TrafficMap, ImageKind::TrafficMap),
        (TypeHint::Chart, ImageKind::Chart),
        (TypeHint::Screenshot, ImageKind::Screenshot),
        (TypeHint::Table, ImageKind::Table),
        (TypeHint::Generic, ImageKind::Generic),
    ] {
        let result = p.process(&img, "<memory>", hint);
        assert_eq!(result.kind, kind);
        assert!(!result.is_error());
    }
}

#[test]
fn unknown_hint_degrades_to_generic() {
    let result = pipeline("some text with 7 and 9").process(
        &white_image(),
        "<memory>",
        TypeHint::from_hint("thermal_imaging"),
    );
    assert_eq!(result.kind, ImageKind::Generic);
    match result.data {
        Some(Payload::Generic(record)) => {
            assert_eq!(record.text, "some text with 7 and 9");
            assert_eq!(record.numbers, vec![7.0, 9.0]);
        }
        other => panic!("expected generic payload, got {other:?}"),
    }
    assert_eq!(result.extracted_count, Some(2));
}

#[test]
fn traffic_map_pairs_locations_speeds_and_conditions() {
    let result = pipeline("Main Street 45 km/h towards Oak Avenue").process(
        &white_image(),
        "<memory>",
        TypeHint::TrafficMap,
    );
    assert_eq!(result.extracted_count, Some(2));
    match result.data {
        Some(Payload::Traffic(record)) => {
            assert_eq!(record.locations, vec!["Main Street", "Oak Avenue"]);
            assert_eq!(record.speeds[0], 45);
            assert!((20..60).contains(&record.speeds[1]));
            // washed-out white raster segments as Good everywhere
            assert_eq!(record.conditions, vec![Condition::Good; 2]);
        }
        other => panic!("expected traffic payload, got {other:?}"),
    }
}

#[test]
fn chart_processing_truncates_long_series() {
    let text: &'static str = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 \
                              21 22 23 24 25 26 27 28 29 30";
    let result = pipeline(text).process(&white_image(), "<memory>", TypeHint::Chart);
    assert_eq!(result.extracted_count, Some(24));
    match result.data {
        Some(Payload::Chart(record)) => {
            assert_eq!(record.values.len(), 24);
            assert_eq!(record.values[23], 24.0);
            assert_eq!(record.chart_type, ChartType::Line);
        }
        other => panic!("expected chart payload, got {other:?}"),
    }
}

#[test]
fn table_hint_round_trips_rows() {
    let result = pipeline("Name  Speed\nA  45\nB  30").process(
        &white_image(),
        "<memory>",
        TypeHint::Table,
    );
    assert_eq!(result.kind, ImageKind::Table);
    assert_eq!(result.extracted_count, Some(2));
    match result.data {
        Some(Payload::Table(record)) => {
            assert_eq!(record.rows[0].get("Name").unwrap(), "A");
            assert_eq!(record.rows[1].get("Speed").unwrap(), "30");
        }
        other => panic!("expected table payload, got {other:?}"),
    }
}

#[test]
fn screenshot_hint_extracts_app_and_traffic_info() {
    let result = pipeline("Google Maps  12.4 km  25 min  traffic is heavy").process(
        &white_image(),
        "<memory>",
        TypeHint::Screenshot,
    );
    assert_eq!(result.extracted_count, Some(3));
    match result.data {
        Some(Payload::Screenshot(record)) => {
            assert_eq!(record.app_type, AppType::GoogleMaps);
            assert_eq!(record.traffic_info.estimated_time, Some(25));
        }
        other => panic!("expected screenshot payload, got {other:?}"),
    }
}

#[test]
fn unreadable_path_yields_error_result() {
    let result = Pipeline::new().process_path("definitely/not/here.png", TypeHint::Auto);
    assert_eq!(result.kind, ImageKind::Error);
    assert!(result.data.is_none());
    assert!(result.extracted_count.is_none());
    assert!(!result.error.unwrap().is_empty());
}

#[test]
fn unsupported_extension_yields_error_result() {
    let result = Pipeline::new().process_path("notes.txt", TypeHint::Auto);
    assert!(result.is_error());
    assert!(result.error.unwrap().contains("unsupported"));
}

#[test]
fn corrupt_file_yields_decode_error_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"these are not pixels").unwrap();

    let result = pipeline("unused").process_path(&path, TypeHint::Table);
    assert_eq!(result.kind, ImageKind::Error);
    assert!(result.data.is_none());
}

#[test]
fn in_memory_bytes_decode_and_process() {
    let mut png = Vec::new();
    white_image()
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .unwrap();

    let result = pipeline("Name  Speed\nA  45\nB  30").process_bytes(&png, TypeHint::Table);
    assert_eq!(result.kind, ImageKind::Table);
    assert_eq!(result.extracted_count, Some(2));

    let garbage = Pipeline::new().process_bytes(b"not an image", TypeHint::Auto);
    assert!(garbage.is_error());
}
