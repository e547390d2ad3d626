use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Semantic label assigned to an image, plus the error sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    TrafficMap,
    Chart,
    Screenshot,
    Table,
    Generic,
    Error,
}

/// Color-coded traffic condition detected in a map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    Good,
    Moderate,
    Congested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Pie,
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    GoogleMaps,
    Waze,
    AppleMaps,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficLevel {
    Heavy,
    Moderate,
    Light,
}

/// Payload of a `traffic_map` result. The three sequences are index-aligned:
/// the i-th location, speed and condition describe one detected point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficRecord {
    pub locations: Vec<String>,
    pub speeds: Vec<u32>,
    pub conditions: Vec<Condition>,
}

/// Payload of a `chart` result: an ordered numeric series with matching
/// synthetic labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRecord {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    pub chart_type: ChartType,
}

/// Payload of a `table` result. Rows map column name to cell text and keep
/// the header's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    pub columns: Vec<String>,
    pub rows: Vec<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Traffic details scraped from a navigation-app screenshot. Any field may
/// be absent when the text carries no matching token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficInfo {
    pub estimated_time: Option<u32>,
    pub distance: Option<f64>,
    pub traffic_level: Option<TrafficLevel>,
}

impl TrafficInfo {
    /// Number of populated fields, used as the screenshot extraction count.
    pub fn populated(&self) -> usize {
        self.estimated_time.is_some() as usize
            + self.distance.is_some() as usize
            + self.traffic_level.is_some() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenshotRecord {
    pub app_type: AppType,
    pub traffic_info: TrafficInfo,
}

/// Fallback payload: raw recognized text plus every numeric token found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericRecord {
    pub text: String,
    pub numbers: Vec<f64>,
}

/// Type-specific structured data, one variant per image kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Traffic(TrafficRecord),
    Chart(ChartRecord),
    Table(TableRecord),
    Screenshot(ScreenshotRecord),
    Generic(GenericRecord),
}

/// Universal output envelope for one processing call.
///
/// A result is either a success (`data` populated, `error` absent) or an
/// error (`error` set, `data` and `extracted_count` absent), never both.
/// `timestamp` records when processing ran, not when the source image was
/// captured.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    #[serde(rename = "type")]
    pub kind: ImageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ExtractionResult {
    pub fn success(kind: ImageKind, data: Payload, extracted_count: usize) -> Self {
        Self {
            kind,
            data: Some(data),
            extracted_count: Some(extracted_count),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::Error,
            data: None,
            extracted_count: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
