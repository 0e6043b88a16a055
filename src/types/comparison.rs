//! Deviation metrics between a user stroke and a reference stroke

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{
    SIMILARITY_WEIGHT_ANGLE, SIMILARITY_WEIGHT_CURVATURE, SIMILARITY_WEIGHT_SHAPE,
    SIMILARITY_WEIGHT_SIZE,
};

/// Result of comparing one user stroke to one reference stroke.
/// Lower distances and deviations are better; a size ratio of 1 is ideal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Dynamic time warping distance (cumulative)
    pub dtw_distance: f64,
    /// Discrete Fréchet distance (worst matched pair)
    pub frechet_distance: f64,
    /// user bbox diagonal / reference bbox diagonal
    pub size_ratio: f64,
    /// |total turning(user) - total turning(reference)|, radians
    pub curvature_deviation: f64,
    /// Mean wrapped start/end angle difference, radians
    pub angle_deviation: f64,
    /// |height/width(user) - height/width(reference)|
    pub proportion_error: f64,
}

impl ComparisonResult {
    /// Weighted blend in [0, 1], higher is more similar. Each term floors at
    /// zero so one bad dimension cannot drive the total negative.
    pub fn overall_similarity(&self) -> f64 {
        let shape = (1.0 - self.dtw_distance).max(0.0);
        let size = (1.0 - (1.0 - self.size_ratio).abs()).max(0.0);
        let curve = (1.0 - self.curvature_deviation).max(0.0);
        let angle = (1.0 - self.angle_deviation / PI).max(0.0);

        SIMILARITY_WEIGHT_SHAPE * shape
            + SIMILARITY_WEIGHT_SIZE * size
            + SIMILARITY_WEIGHT_CURVATURE * curve
            + SIMILARITY_WEIGHT_ANGLE * angle
    }

    /// True when every metric is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.dtw_distance,
            self.frechet_distance,
            self.size_ratio,
            self.curvature_deviation,
            self.angle_deviation,
            self.proportion_error,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect() -> ComparisonResult {
        ComparisonResult {
            dtw_distance: 0.0,
            frechet_distance: 0.0,
            size_ratio: 1.0,
            curvature_deviation: 0.0,
            angle_deviation: 0.0,
            proportion_error: 0.0,
        }
    }

    #[test]
    fn test_perfect_similarity_is_one() {
        assert!((perfect().overall_similarity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_terrible_similarity_floors_at_zero() {
        let awful = ComparisonResult {
            dtw_distance: 50.0,
            frechet_distance: 3.0,
            size_ratio: 9.0,
            curvature_deviation: 12.0,
            angle_deviation: PI,
            proportion_error: 4.0,
        };
        assert_eq!(awful.overall_similarity(), 0.0);
    }

    #[test]
    fn test_single_bad_dimension_only_costs_its_weight() {
        let c = ComparisonResult {
            dtw_distance: 10.0,
            ..perfect()
        };
        assert!((c.overall_similarity() - 0.6).abs() < 1e-12);
    }
}
