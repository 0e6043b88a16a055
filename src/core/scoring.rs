//! Scorer: comparison metrics → dimension scores, weighted overall, grade

use tracing::debug;

use crate::types::{AttemptScore, ComparisonResult};
use crate::{
    SCORE_WEIGHT_ANGLE, SCORE_WEIGHT_SHAPE, SCORE_WEIGHT_SIZE, SCORE_WEIGHT_SMOOTHNESS,
    SHAPE_DISTANCE_GAIN, SMOOTHNESS_CURVATURE_GAIN,
};

/// Score an attempt from its comparison to the reference. Pure and
/// deterministic; every score lands in [0, 1].
pub fn score_attempt(comparison: &ComparisonResult) -> AttemptScore {
    let shape_score = (1.0 - comparison.dtw_distance * SHAPE_DISTANCE_GAIN).max(0.0);
    let size_score = (1.0 - (1.0 - comparison.size_ratio).abs()).max(0.0);
    // angle_deviation is already in radians, at most π
    let angle_score = (1.0 - comparison.angle_deviation).max(0.0);
    let smoothness_score =
        (1.0 - comparison.curvature_deviation * SMOOTHNESS_CURVATURE_GAIN).max(0.0);

    let overall_score = SCORE_WEIGHT_SHAPE * shape_score
        + SCORE_WEIGHT_SIZE * size_score
        + SCORE_WEIGHT_ANGLE * angle_score
        + SCORE_WEIGHT_SMOOTHNESS * smoothness_score;

    let score = AttemptScore {
        shape_score,
        size_score,
        angle_score,
        smoothness_score,
        overall_score,
    };
    debug!(overall = overall_score, grade = %score.grade(), "scored attempt");
    score
}
