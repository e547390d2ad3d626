//! Color segmenter: classifies an image's dominant traffic condition by
//! counting pixels inside fixed HSV hue bands.

use image::DynamicImage;
use tracing::debug;

use crate::records::Condition;

/// Inclusive hue band, in OpenCV half-degree units (0-179).
#[derive(Debug, Clone, Copy)]
pub struct HueBand {
    pub min: u8,
    pub max: u8,
}

impl HueBand {
    fn contains(&self, hue: u8) -> bool {
        (self.min..=self.max).contains(&hue)
    }
}

/// Segmentation thresholds. Defaults mirror the classic map palette:
/// green = free-flowing, yellow/orange = moderate, red = congested.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub good: HueBand,
    pub moderate: HueBand,
    pub congested: HueBand,
    /// Pixels below either floor are too washed-out to vote.
    pub min_saturation: u8,
    pub min_value: u8,
    /// Length of the replicated condition list handed to map processing.
    pub slots: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            good: HueBand { min: 40, max: 80 },
            moderate: HueBand { min: 20, max: 39 },
            congested: HueBand { min: 0, max: 10 },
            min_saturation: 50,
            min_value: 50,
            slots: 5,
        }
    }
}

pub struct ColorSegmenter {
    config: SegmenterConfig,
}

impl ColorSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Single dominant condition across the whole raster. Red wins only when
    /// it outnumbers both green and yellow; ties fall back toward Good.
    pub fn dominant_condition(&self, image: &DynamicImage) -> Condition {
        let rgb = image.to_rgb8();
        let (mut green, mut yellow, mut red) = (0u64, 0u64, 0u64);

        for pixel in rgb.pixels() {
            let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
            if s < self.config.min_saturation || v < self.config.min_value {
                continue;
            }
            if self.config.good.contains(h) {
                green += 1;
            } else if self.config.moderate.contains(h) {
                yellow += 1;
            } else if self.config.congested.contains(h) {
                red += 1;
            }
        }

        debug!(green, yellow, red, "hue band pixel counts");

        if red > green && red > yellow {
            Condition::Congested
        } else if yellow > green {
            Condition::Moderate
        } else {
            Condition::Good
        }
    }

    /// Dominant condition replicated into a fixed-size list so map
    /// processing can index-align it against extracted locations. One global
    /// condition per image; regions are not segmented independently.
    pub fn conditions(&self, image: &DynamicImage) -> Vec<Condition> {
        vec![self.dominant_condition(image); self.config.slots]
    }
}

impl Default for ColorSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

/// RGB to HSV in OpenCV scale: hue 0-179 half-degrees, sat/val 0-255.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max * 255.0 };

    let mut h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    if h_deg < 0.0 {
        h_deg += 360.0;
    }

    ((h_deg / 2.0) as u8, s as u8, v as u8)
}
