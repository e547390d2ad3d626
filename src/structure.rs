//! Structure detector: pixel-geometry heuristics for table grids and chart
//! shapes. Works on a binarized view of the raster where dark pixels are
//! foreground (table rules and chart strokes are dark on light).

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use tracing::debug;

use crate::records::ChartType;

#[derive(Debug, Clone)]
pub struct StructureConfig {
    /// Length of the elongated structuring kernel used to isolate lines.
    pub kernel_len: u32,
    /// Surviving line pixels required, per orientation, to call it a table.
    pub line_pixel_threshold: u64,
    /// Gray values below this are foreground.
    pub binarize_threshold: u8,
    /// Contours with fewer boundary points than this are noise.
    pub min_contour_points: usize,
    /// Douglas-Peucker tolerance as a fraction of the contour arc length.
    pub approx_epsilon_frac: f64,
    /// Isoperimetric ratio above which an approximated contour reads as
    /// circular (1.0 = perfect circle, square = 0.785).
    pub circularity_threshold: f64,
    /// More quadrilaterals than this means a bar chart.
    pub bar_quad_count: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            kernel_len: 40,
            line_pixel_threshold: 100,
            binarize_threshold: 128,
            min_contour_points: 20,
            approx_epsilon_frac: 0.02,
            circularity_threshold: 0.85,
            bar_quad_count: 5,
        }
    }
}

pub struct StructureDetector {
    config: StructureConfig,
}

impl StructureDetector {
    pub fn new(config: StructureConfig) -> Self {
        Self { config }
    }

    /// True when both a horizontal and a vertical line skeleton survive
    /// morphological opening with the elongated kernels.
    pub fn has_table_structure(&self, image: &DynamicImage) -> bool {
        let mask = self.binarize(&image.to_luma8());
        let k = self.config.kernel_len as usize;

        let horizontal = opened_pixels(&mask, k, Axis::Horizontal);
        let vertical = opened_pixels(&mask, k, Axis::Vertical);
        debug!(horizontal, vertical, "line pixels after opening");

        horizontal > self.config.line_pixel_threshold
            && vertical > self.config.line_pixel_threshold
    }

    /// Chart-shape vote: a circular contour means pie, many quadrilaterals
    /// mean bar, anything else falls back to line.
    pub fn chart_type(&self, image: &DynamicImage) -> ChartType {
        let mask = self.binarize(&image.to_luma8());
        let mut quads = 0usize;

        for contour in find_contours::<i32>(&mask) {
            if contour.points.len() < self.config.min_contour_points {
                continue;
            }
            let arc = arc_length(&contour.points, true);
            let approx =
                approximate_polygon_dp(&contour.points, self.config.approx_epsilon_frac * arc, true);
            if approx.len() < 3 {
                continue;
            }
            if approx.len() > 4 && circularity(&approx) > self.config.circularity_threshold {
                debug!(vertices = approx.len(), "circular contour, pie chart");
                return ChartType::Pie;
            }
            if approx.len() == 4 {
                quads += 1;
            }
        }

        if quads > self.config.bar_quad_count {
            debug!(quads, "quadrilateral contours, bar chart");
            ChartType::Bar
        } else {
            ChartType::Line
        }
    }

    fn binarize(&self, gray: &GrayImage) -> GrayImage {
        let threshold = self.config.binarize_threshold;
        let mut mask = gray.clone();
        for pixel in mask.pixels_mut() {
            *pixel = Luma([if pixel[0] < threshold { 255 } else { 0 }]);
        }
        mask
    }
}

impl Default for StructureDetector {
    fn default() -> Self {
        Self::new(StructureConfig::default())
    }
}

enum Axis {
    Horizontal,
    Vertical,
}

/// Pixels surviving a morphological opening with a 1-D structuring element
/// of length `k` along `axis`. Opening with a 1-D kernel keeps exactly the
/// foreground runs of length >= k and erases the rest, so counting long runs
/// is equivalent to opening then counting nonzero.
fn opened_pixels(mask: &GrayImage, k: usize, axis: Axis) -> u64 {
    let (width, height) = mask.dimensions();
    let mut surviving = 0u64;

    let (outer, inner) = match axis {
        Axis::Horizontal => (height, width),
        Axis::Vertical => (width, height),
    };

    for o in 0..outer {
        let mut run = 0usize;
        for i in 0..=inner {
            let foreground = i < inner && {
                let (x, y) = match axis {
                    Axis::Horizontal => (i, o),
                    Axis::Vertical => (o, i),
                };
                mask.get_pixel(x, y)[0] > 0
            };
            if foreground {
                run += 1;
            } else {
                if run >= k {
                    surviving += run as u64;
                }
                run = 0;
            }
        }
    }
    surviving
}

/// Isoperimetric ratio 4*pi*A / P^2 of a closed polygon.
fn circularity(polygon: &[Point<i32>]) -> f64 {
    let perimeter = arc_length(polygon, true);
    if perimeter == 0.0 {
        return 0.0;
    }
    let mut doubled_area = 0f64;
    for (i, p) in polygon.iter().enumerate() {
        let q = polygon[(i + 1) % polygon.len()];
        doubled_area += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    let area = doubled_area.abs() / 2.0;
    4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
}
