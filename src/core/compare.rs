//! Comparator: shape distances and geometric deviations between a user
//! stroke and a reference stroke
//!
//! Only the `(x, y)` channel is used. DTW and Fréchet are O(n·m) in time;
//! callers should cap point counts before comparing long strokes.

use tracing::debug;

use crate::core::geometry::{distance, endpoint_angles, total_turning, wrap_angle, BoundingBox};
use crate::error::{GradeError, GradeResult};
use crate::types::{ComparisonResult, NormalizedStroke};
use crate::MIN_STROKE_POINTS;

/// Compare a user's attempt to the canonical reference.
///
/// Both strokes need at least two points; degenerate geometry beyond that
/// falls back to documented defaults and never produces NaN.
pub fn compare_strokes(
    user: &NormalizedStroke,
    reference: &NormalizedStroke,
) -> GradeResult<ComparisonResult> {
    for stroke in [user, reference] {
        if stroke.len() < MIN_STROKE_POINTS {
            return Err(GradeError::InsufficientData {
                required: MIN_STROKE_POINTS,
                actual: stroke.len(),
            });
        }
    }

    let u = user.xy();
    let r = reference.xy();

    let result = ComparisonResult {
        dtw_distance: dtw_distance(&u, &r),
        frechet_distance: frechet_distance(&u, &r),
        size_ratio: size_ratio(&u, &r),
        curvature_deviation: curvature_deviation(&u, &r),
        angle_deviation: angle_deviation(&u, &r),
        proportion_error: proportion_error(&u, &r),
    };

    debug!(
        user_points = u.len(),
        reference_points = r.len(),
        dtw = result.dtw_distance,
        frechet = result.frechet_distance,
        size_ratio = result.size_ratio,
        "compared strokes"
    );

    Ok(result)
}

/// Classic dynamic time warping with Euclidean point cost and no banding.
///
/// Keeps two rows of the `(n+1) × (m+1)` cost table. Infinite when either
/// sequence is empty.
pub fn dtw_distance(a: &[(f64, f64)], b: &[(f64, f64)]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::INFINITY;
    }

    let m = b.len();
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for &pa in a {
        curr[0] = f64::INFINITY;
        for (j, &pb) in b.iter().enumerate() {
            let best = prev[j + 1].min(curr[j]).min(prev[j]);
            curr[j + 1] = distance(pa, pb) + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

/// Discrete Fréchet distance, filled bottom-up over the full `n × m`
/// coupling table. Infinite when either sequence is empty.
pub fn frechet_distance(a: &[(f64, f64)], b: &[(f64, f64)]) -> f64 {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return f64::INFINITY;
    }

    let mut ca = vec![0.0_f64; n * m];
    let at = |i: usize, j: usize| i * m + j;

    for i in 0..n {
        for j in 0..m {
            let d = distance(a[i], b[j]);
            ca[at(i, j)] = match (i, j) {
                (0, 0) => d,
                (_, 0) => ca[at(i - 1, 0)].max(d),
                (0, _) => ca[at(0, j - 1)].max(d),
                _ => {
                    let reach = ca[at(i - 1, j)]
                        .min(ca[at(i - 1, j - 1)])
                        .min(ca[at(i, j - 1)]);
                    reach.max(d)
                }
            };
        }
    }

    ca[at(n - 1, m - 1)]
}

/// user bbox diagonal / reference bbox diagonal; 1 when the reference has
/// no extent
pub fn size_ratio(user: &[(f64, f64)], reference: &[(f64, f64)]) -> f64 {
    let diag = |pts: &[(f64, f64)]| BoundingBox::of(pts).map_or(0.0, |b| b.diagonal());
    let ref_size = diag(reference);
    if ref_size < crate::GEOMETRY_EPSILON {
        return 1.0;
    }
    diag(user) / ref_size
}

/// Absolute difference of total wrapped turning
pub fn curvature_deviation(user: &[(f64, f64)], reference: &[(f64, f64)]) -> f64 {
    (total_turning(user) - total_turning(reference)).abs()
}

/// Mean of the wrapped start-angle and end-angle differences
pub fn angle_deviation(user: &[(f64, f64)], reference: &[(f64, f64)]) -> f64 {
    let (u_start, u_end) = endpoint_angles(user);
    let (r_start, r_end) = endpoint_angles(reference);

    let start_dev = wrap_angle(u_start - r_start).abs();
    let end_dev = wrap_angle(u_end - r_end).abs();

    (start_dev + end_dev) / 2.0
}

/// Absolute difference of height/width ratios
pub fn proportion_error(user: &[(f64, f64)], reference: &[(f64, f64)]) -> f64 {
    let aspect = |pts: &[(f64, f64)]| BoundingBox::of(pts).map_or(0.0, |b| b.height_width_ratio());
    (aspect(user) - aspect(reference)).abs()
}

// =============================================================================
// TESTS
// =============================================================================
