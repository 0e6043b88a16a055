//! Feature extraction: 15 geometric descriptors of one stroke
//!
//! Captures shape, size and dynamics for classical classifier baselines.

use crate::core::geometry::{
    distance, safe_ratio, segment_angles, segment_lengths, turn_angles, BoundingBox,
};
use crate::error::{GradeError, GradeResult};
use crate::types::{GeometricFeatures, NormalizedStroke};
use crate::MIN_STROKE_POINTS;

/// Extract geometric features from a normalized stroke.
///
/// Fails with `InsufficientData` below two points, where no segment
/// direction or length exists.
pub fn extract_features(stroke: &NormalizedStroke) -> GradeResult<GeometricFeatures> {
    let n = stroke.points.len();
    if n < MIN_STROKE_POINTS {
        return Err(GradeError::InsufficientData {
            required: MIN_STROKE_POINTS,
            actual: n,
        });
    }

    let xy = stroke.xy();
    let bbox = BoundingBox::of(&xy).ok_or(GradeError::InsufficientData {
        required: MIN_STROKE_POINTS,
        actual: n,
    })?;

    let total_arc_length: f64 = segment_lengths(&xy).iter().sum();
    let direct_distance = distance(xy[0], xy[n - 1]);
    let straightness = safe_ratio(direct_distance, total_arc_length, 1.0);

    let angles = segment_angles(&xy);
    let start_angle = angles[0];
    let end_angle = angles[angles.len() - 1];

    let turns = turn_angles(&xy);
    let total_angle_change: f64 = turns.iter().map(|t| t.abs()).sum();
    let mean_curvature = if turns.is_empty() {
        0.0
    } else {
        total_angle_change / turns.len() as f64
    };

    let pressures: Vec<f64> = stroke.points.iter().map(|p| p.pressure).collect();
    let (mean_pressure, std_pressure) = mean_and_std(&pressures);
    let mean_speed = stroke.points.iter().map(|p| p.speed).sum::<f64>() / n as f64;

    Ok(GeometricFeatures {
        bbox_width: bbox.width(),
        bbox_height: bbox.height(),
        bbox_aspect_ratio: bbox.width_height_ratio(),
        total_arc_length,
        direct_distance,
        straightness,
        start_angle,
        end_angle,
        total_angle_change,
        mean_curvature,
        height_width_ratio: bbox.height_width_ratio(),
        point_count: n,
        mean_pressure,
        std_pressure,
        mean_speed,
    })
}

/// Mean and population standard deviation of a non-empty slice
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

// =============================================================================
// TESTS
// =============================================================================
