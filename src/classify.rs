//! Image classifier: combines OCR keywords with the structure detector's
//! table signal into one of the fixed image-type labels.

use tracing::debug;

use crate::records::ImageKind;

/// Keyword lists driving classification. Defaults preserve the historical
/// priority ordering: traffic keywords gate the map/chart/screenshot
/// sub-checks, and table structure is only consulted when no traffic keyword
/// matched at all.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub traffic: Vec<&'static str>,
    pub map: Vec<&'static str>,
    pub chart: Vec<&'static str>,
    pub live: Vec<&'static str>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            traffic: vec!["speed", "km/h", "mph", "traffic", "congestion"],
            map: vec!["map", "route", "navigation", "street"],
            chart: vec!["chart", "graph", "data", "time"],
            live: vec!["camera", "live", "current"],
        }
    }
}

pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Pure decision procedure over the recognized text and the table
    /// signal; first match wins, ambiguity resolves to `Chart`.
    pub fn classify(&self, text: &str, has_table_structure: bool) -> ImageKind {
        let lower = text.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if any(&self.config.traffic) {
            if any(&self.config.map) {
                debug!("traffic + map keywords, classified as traffic map");
                return ImageKind::TrafficMap;
            }
            if any(&self.config.chart) {
                return ImageKind::Chart;
            }
            if any(&self.config.live) {
                return ImageKind::Screenshot;
            }
            // a lone traffic keyword falls through to the structural check
        }

        if has_table_structure {
            return ImageKind::Table;
        }

        ImageKind::Chart
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
