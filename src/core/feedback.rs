//! Feedback generator: metrics → ordered coaching statements
//!
//! Rules run in a fixed order and each adds at most one line. The overall
//! banner always fires, so feedback is never empty.

use crate::core::scoring::score_attempt;
use crate::types::{AttemptScore, ComparisonResult};
use crate::{
    FEEDBACK_ANGLE_MAX, FEEDBACK_CURVATURE_MAX, FEEDBACK_GOOD_MIN, FEEDBACK_PROPORTION_MAX,
    FEEDBACK_RECOGNIZABLE_MIN, FEEDBACK_SHAPE_MIN, FEEDBACK_SIZE_TOO_LARGE,
    FEEDBACK_SIZE_TOO_SMALL, GEOMETRY_EPSILON,
};

/// Generate feedback for one attempt, most important first.
///
/// `score` is computed from `comparison` when not supplied.
pub fn generate_feedback(
    comparison: &ComparisonResult,
    label: &str,
    score: Option<&AttemptScore>,
) -> Vec<String> {
    let computed;
    let score = match score {
        Some(s) => s,
        None => {
            computed = score_attempt(comparison);
            &computed
        }
    };

    let mut feedback = Vec::with_capacity(6);

    // 1. Overall banner
    feedback.push(if score.overall_score >= FEEDBACK_GOOD_MIN {
        format!("Your '{}' stroke looks good.", label)
    } else if score.overall_score >= FEEDBACK_RECOGNIZABLE_MIN {
        format!("Your '{}' is recognizable but could be improved.", label)
    } else {
        format!("Your '{}' needs more practice. Here's what to focus on:", label)
    });

    // 2. Size
    if let Some(line) = size_advice(comparison.size_ratio, label) {
        feedback.push(line);
    }

    // 3. Entry angle
    if comparison.angle_deviation > FEEDBACK_ANGLE_MAX {
        feedback.push(
            "The starting angle is off. Check the reference and try to match the entry direction."
                .to_string(),
        );
    }

    // 4. Curvature
    if comparison.curvature_deviation > FEEDBACK_CURVATURE_MAX {
        feedback.push(
            "The curve should be smoother. Try to maintain a consistent arc.".to_string(),
        );
    }

    // 5. Proportion
    if comparison.proportion_error > FEEDBACK_PROPORTION_MAX {
        feedback.push(
            "The height-to-width ratio doesn't match the reference. Pay attention to the proportions."
                .to_string(),
        );
    }

    // 6. Shape
    if score.shape_score < FEEDBACK_SHAPE_MIN {
        feedback.push(
            "The overall shape is quite different from the reference. Try tracing the reference stroke a few times first."
                .to_string(),
        );
    }

    feedback
}

/// Percent change needed to bring the attempt to reference size
fn size_advice(size_ratio: f64, label: &str) -> Option<String> {
    if size_ratio > FEEDBACK_SIZE_TOO_LARGE {
        let shrink = (1.0 - 1.0 / size_ratio) * 100.0;
        Some(format!(
            "Your '{}' is too large. Try to shrink it by about {:.0}%.",
            label, shrink
        ))
    } else if size_ratio < FEEDBACK_SIZE_TOO_SMALL {
        if size_ratio < GEOMETRY_EPSILON {
            return Some(format!(
                "Your '{}' is too small. Try to enlarge it to match the reference.",
                label
            ));
        }
        let enlarge = (1.0 / size_ratio - 1.0) * 100.0;
        Some(format!(
            "Your '{}' is too small. Try to enlarge it by about {:.0}%.",
            label, enlarge
        ))
    } else {
        None
    }
}

// =============================================================================
// TESTS
// =============================================================================
