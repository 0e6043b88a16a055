//! Planar geometry shared by feature extraction and comparison
//!
//! All helpers take `(x, y)` slices and never fail: degenerate input yields
//! the documented fallback instead of NaN.

use std::f64::consts::{PI, TAU};

use crate::GEOMETRY_EPSILON;

/// Wrap an angle difference into [-π, π)
pub fn wrap_angle(delta: f64) -> f64 {
    (delta + PI).rem_euclid(TAU) - PI
}

/// Euclidean distance between two points
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Axis-aligned extent of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// `None` for an empty slice
    pub fn of(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        let init = Self { min_x: x0, min_y: y0, max_x: x0, max_y: y0 };
        Some(rest.iter().fold(init, |b, &(x, y)| Self {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// height / width, 0 when the box has no width
    pub fn height_width_ratio(&self) -> f64 {
        safe_ratio(self.height(), self.width(), 0.0)
    }

    /// width / height, 0 when the box has no height
    pub fn width_height_ratio(&self) -> f64 {
        safe_ratio(self.width(), self.height(), 0.0)
    }
}

/// `num / den`, or `fallback` when `den` is below the geometry epsilon
pub fn safe_ratio(num: f64, den: f64, fallback: f64) -> f64 {
    if den < GEOMETRY_EPSILON {
        fallback
    } else {
        num / den
    }
}

/// Length of each consecutive segment
pub fn segment_lengths(points: &[(f64, f64)]) -> Vec<f64> {
    points.windows(2).map(|w| distance(w[0], w[1])).collect()
}

pub fn arc_length(points: &[(f64, f64)]) -> f64 {
    segment_lengths(points).iter().sum()
}

/// Tangent angle `atan2(dy, dx)` of each consecutive segment
pub fn segment_angles(points: &[(f64, f64)]) -> Vec<f64> {
    points
        .windows(2)
        .map(|w| (w[1].1 - w[0].1).atan2(w[1].0 - w[0].0))
        .collect()
}

/// Wrapped turn between each pair of consecutive segments
pub fn turn_angles(points: &[(f64, f64)]) -> Vec<f64> {
    segment_angles(points)
        .windows(2)
        .map(|w| wrap_angle(w[1] - w[0]))
        .collect()
}

/// Sum of absolute wrapped turns; 0 for fewer than 3 points
pub fn total_turning(points: &[(f64, f64)]) -> f64 {
    turn_angles(points).iter().map(|t| t.abs()).sum()
}

/// Angles of the first and last segment; `(0, 0)` for fewer than 2 points
pub fn endpoint_angles(points: &[(f64, f64)]) -> (f64, f64) {
    let angles = segment_angles(points);
    match (angles.first(), angles.last()) {
        (Some(&start), Some(&end)) => (start, end),
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        for k in -20..=20 {
            let w = wrap_angle(k as f64 * 0.7);
            assert!((-PI..PI).contains(&w), "wrap({}) = {}", k as f64 * 0.7, w);
        }
    }

    #[test]
    fn test_wrap_angle_across_discontinuity() {
        // From just below +π to just above -π is a small left turn
        let delta = (-PI + 0.1) - (PI - 0.1);
        assert!((wrap_angle(delta) - 0.2).abs() < 1e-12);
        assert!((wrap_angle(-delta) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_angle_identity_inside_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(1.0) - 1.0).abs() < 1e-12);
        assert!((wrap_angle(PI) + PI).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let b = BoundingBox::of(&[(0.1, 0.5), (0.4, 0.1), (0.2, 0.9)]).unwrap();
        assert!((b.width() - 0.3).abs() < 1e-12);
        assert!((b.height() - 0.8).abs() < 1e-12);
        assert!(BoundingBox::of(&[]).is_none());
    }

    #[test]
    fn test_zero_width_ratio_falls_back() {
        let b = BoundingBox::of(&[(0.5, 0.1), (0.5, 0.9)]).unwrap();
        assert_eq!(b.height_width_ratio(), 0.0);
        assert!((b.width_height_ratio() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_turning_of_right_angle() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        assert!((total_turning(&pts) - PI / 2.0).abs() < 1e-12);
        assert_eq!(total_turning(&pts[..2]), 0.0);
    }

    #[test]
    fn test_endpoint_angles_degenerate() {
        assert_eq!(endpoint_angles(&[(0.3, 0.3)]), (0.0, 0.0));
        assert_eq!(endpoint_angles(&[]), (0.0, 0.0));
    }
}
