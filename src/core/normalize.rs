//! Normalizer: device coordinates → unit square
//!
//! Each coordinate becomes `clamp(coord / bound, 0, 1)`. Pressure, tilt,
//! speed, direction and timestamp pass through unchanged. Never fails.

use crate::error::{GradeError, GradeResult};
use crate::types::{NormalizedPoint, NormalizedStroke, PageData, Point, Stroke};
use crate::{GradingConfig, MIN_STROKE_POINTS, RM_HEIGHT, RM_WIDTH};

/// Maps device coordinates of one capture surface into [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    width: f64,
    height: f64,
}

impl Default for Normalizer {
    /// reMarkable bounds
    fn default() -> Self {
        Self {
            width: RM_WIDTH,
            height: RM_HEIGHT,
        }
    }
}

impl Normalizer {
    /// Normalizer for a device with the given coordinate bounds
    pub fn new(width: f64, height: f64) -> GradeResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(GradeError::InvalidConfig(format!(
                "device bounds must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn from_config(config: &GradingConfig) -> GradeResult<Self> {
        Self::new(config.device_width, config.device_height)
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Normalize one raw coordinate pair
    pub fn normalize_coords(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x / self.width).clamp(0.0, 1.0),
            (y / self.height).clamp(0.0, 1.0),
        )
    }

    pub fn normalize_point(&self, point: &Point) -> NormalizedPoint {
        let (x, y) = self.normalize_coords(point.x, point.y);
        NormalizedPoint {
            x,
            y,
            pressure: point.pressure,
            tilt: point.tilt,
            speed: point.speed,
            direction: point.direction,
            timestamp: point.timestamp,
        }
    }

    pub fn normalize_stroke(&self, stroke: &Stroke) -> NormalizedStroke {
        stroke.normalize(self)
    }

    /// Normalize every stroke on a page, keeping order
    pub fn normalize_page(&self, page: &PageData) -> Vec<NormalizedStroke> {
        page.strokes.iter().map(|s| self.normalize_stroke(s)).collect()
    }
}

/// Anything that can be brought into the unit square.
///
/// Device bounds only scale raw input. Strokes that are already normalized
/// are clamped to [0, 1] and the normalizer's bounds are not consulted.
pub trait Normalize {
    fn normalize(&self, normalizer: &Normalizer) -> NormalizedStroke;
}

impl Normalize for Stroke {
    fn normalize(&self, normalizer: &Normalizer) -> NormalizedStroke {
        NormalizedStroke::new(self.points.iter().map(|p| normalizer.normalize_point(p)).collect())
    }
}

impl Normalize for NormalizedStroke {
    /// Already at unit scale: only clamps, so in-range strokes are unchanged.
    /// The normalizer is ignored.
    fn normalize(&self, _normalizer: &Normalizer) -> NormalizedStroke {
        let points = self
            .points
            .iter()
            .map(|p| NormalizedPoint {
                x: p.x.clamp(0.0, 1.0),
                y: p.y.clamp(0.0, 1.0),
                ..*p
            })
            .collect();
        NormalizedStroke {
            points,
            label: self.label.clone(),
        }
    }
}

/// Resample a stroke to exactly `target_length` points by linear
/// interpolation over a uniform index parameter. Every channel is
/// interpolated; endpoints and label are preserved.
pub fn resample_stroke(stroke: &NormalizedStroke, target_length: usize) -> GradeResult<NormalizedStroke> {
    if target_length < MIN_STROKE_POINTS {
        return Err(GradeError::InvalidConfig(format!(
            "target_length must be at least {}, got {}",
            MIN_STROKE_POINTS, target_length
        )));
    }

    let n = stroke.points.len();
    if n == 0 || n == target_length {
        return Ok(stroke.clone());
    }
    if n == 1 {
        return Ok(NormalizedStroke {
            points: vec![stroke.points[0]; target_length],
            label: stroke.label.clone(),
        });
    }

    let last = (n - 1) as f64;
    let points = (0..target_length)
        .map(|i| {
            let pos = i as f64 / (target_length - 1) as f64 * last;
            let lo = (pos.floor() as usize).min(n - 2);
            let t = pos - lo as f64;
            lerp_point(&stroke.points[lo], &stroke.points[lo + 1], t)
        })
        .collect();

    Ok(NormalizedStroke {
        points,
        label: stroke.label.clone(),
    })
}

fn lerp_point(a: &NormalizedPoint, b: &NormalizedPoint, t: f64) -> NormalizedPoint {
    let lerp = |u: f64, v: f64| u + t * (v - u);
    NormalizedPoint {
        x: lerp(a.x, b.x),
        y: lerp(a.y, b.y),
        pressure: lerp(a.pressure, b.pressure),
        tilt: lerp(a.tilt, b.tilt),
        speed: lerp(a.speed, b.speed),
        direction: lerp(a.direction, b.direction),
        timestamp: lerp(a.timestamp, b.timestamp),
    }
}

// =============================================================================
// TESTS
// =============================================================================
