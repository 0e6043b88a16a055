//! Integration tests for the grading pipeline
//!
//! Tests the full path: raw stroke → normalize → segment → compare → score → feedback

use pretty_assertions::assert_eq;
use strokegrade::core::{
    compare_strokes, extract_features, generate_feedback, score_attempt, segment_glyphs,
    Grader, Normalize, Normalizer,
};
use strokegrade::types::{
    ComparisonResult, Grade, NormalizedPoint, NormalizedStroke, PageData, Point, Stroke,
};
use strokegrade::{GradeError, GradingConfig, RM_HEIGHT, RM_WIDTH};

fn make_line(x_start: f64, y_start: f64, x_end: f64, y_end: f64, n: usize) -> NormalizedStroke {
    NormalizedStroke::new(
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                NormalizedPoint::at(x_start + t * (x_end - x_start), y_start + t * (y_end - y_start))
            })
            .collect(),
    )
}

/// Quarter circle arc, centred at (cx, cy)
fn make_arc(cx: f64, cy: f64, radius: f64, n: usize) -> NormalizedStroke {
    NormalizedStroke::new(
        (0..n)
            .map(|i| {
                let theta = std::f64::consts::FRAC_PI_2 * i as f64 / (n - 1) as f64;
                NormalizedPoint::at(cx + radius * theta.cos(), cy + radius * theta.sin())
            })
            .collect(),
    )
}

/// Uniformly scale a stroke about its first point
fn scaled(stroke: &NormalizedStroke, k: f64) -> NormalizedStroke {
    let origin = stroke.points[0];
    NormalizedStroke::new(
        stroke
            .points
            .iter()
            .map(|p| NormalizedPoint::at(origin.x + k * (p.x - origin.x), origin.y + k * (p.y - origin.y)))
            .collect(),
    )
}

fn assert_report_finite(comparison: &ComparisonResult) {
    let score = score_attempt(comparison);
    assert!(comparison.is_finite(), "{:?}", comparison);
    assert!(score.is_finite(), "{:?}", score);
    assert!(comparison.overall_similarity().is_finite());
}

// =============================================================================
// END-TO-END
// =============================================================================

/// Identical 10-point lines grade as an A with affirming feedback
#[test]
fn test_identical_lines_end_to_end() {
    let stroke = make_line(0.1, 0.1, 0.5, 0.5, 10);

    let comparison = compare_strokes(&stroke, &stroke).unwrap();
    let score = score_attempt(&comparison);
    let feedback = generate_feedback(&comparison, "t", Some(&score));

    assert!(score.shape_score > 0.95);
    assert!(score.overall_score > 0.9);
    assert_eq!(score.grade(), Grade::A);
    assert!(feedback[0].contains("looks good"), "{:?}", feedback);
}

/// Raw device strokes go through normalization before grading
#[test]
fn test_raw_stroke_through_grader() {
    let normalizer = Normalizer::default();
    let raw = Stroke::new(
        (0..12)
            .map(|i| Point::at(140.0 + 50.0 * i as f64, 187.0 + 60.0 * i as f64))
            .collect(),
    );
    let attempt = raw.normalize(&normalizer);
    let reference = raw.normalize(&normalizer).with_label("d");

    let grader = Grader::new(GradingConfig::default()).unwrap();
    let report = grader.grade(&attempt, &reference, None).unwrap();

    assert_eq!(report.label, "d");
    assert_eq!(report.grade, Grade::A);
    assert_eq!(report.feedback.len(), 1);
}

/// A wobbly curve against a straight reference collects several pieces of advice
#[test]
fn test_curve_against_line_gets_advice() {
    let reference = make_line(0.2, 0.2, 0.6, 0.2, 20);
    let attempt = make_arc(0.2, 0.2, 0.4, 20);

    let comparison = compare_strokes(&attempt, &reference).unwrap();
    let score = score_attempt(&comparison);
    let feedback = generate_feedback(&comparison, "t", Some(&score));

    assert!(score.overall_score < 0.9);
    assert!(comparison.angle_deviation > 0.3);
    assert!(feedback.len() >= 3, "{:?}", feedback);
    assert!(feedback.iter().any(|f| f.contains("starting angle")));
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_self_comparison_is_perfect() {
    for stroke in [
        make_line(0.1, 0.9, 0.7, 0.2, 15),
        make_arc(0.3, 0.3, 0.25, 30),
        make_line(0.5, 0.1, 0.5, 0.9, 2),
    ] {
        let c = compare_strokes(&stroke, &stroke).unwrap();
        assert!(c.dtw_distance.abs() < 1e-9);
        assert!((c.size_ratio - 1.0).abs() < 1e-9);
        assert!(c.curvature_deviation.abs() < 1e-9);
    }
}

#[test]
fn test_size_ratio_tracks_scale_factor() {
    let base = make_arc(0.1, 0.1, 0.3, 25);
    for k in [0.25, 0.5, 1.5, 2.0] {
        let copy = scaled(&base, k);
        let forward = compare_strokes(&copy, &base).unwrap();
        let backward = compare_strokes(&base, &copy).unwrap();
        assert!((forward.size_ratio - k).abs() < 1e-9, "k={} got {}", k, forward.size_ratio);
        assert!((backward.size_ratio - 1.0 / k).abs() < 1e-9);
        // Scaling keeps the shape's turning
        assert!(forward.curvature_deviation < 1e-9);
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = Normalizer::default();
    let raw = Stroke::new(vec![
        Point::at(0.0, 0.0),
        Point::at(RM_WIDTH / 3.0, RM_HEIGHT / 4.0),
        Point::at(RM_WIDTH * 1.2, -40.0),
    ]);
    let once = normalizer.normalize_stroke(&raw);
    let twice = once.normalize(&normalizer);
    assert_eq!(once, twice);
}

#[test]
fn test_feature_extraction_point_count_contract() {
    let single = NormalizedStroke::new(vec![NormalizedPoint::at(0.4, 0.4)]);
    assert!(matches!(
        extract_features(&single),
        Err(GradeError::InsufficientData { required: 2, actual: 1 })
    ));
    assert!(extract_features(&make_line(0.1, 0.1, 0.2, 0.3, 2)).is_ok());
}

#[test]
fn test_similarity_always_in_unit_range() {
    let strokes = [
        make_line(0.1, 0.1, 0.5, 0.5, 10),
        make_line(0.9, 0.9, 0.0, 0.0, 7),
        make_arc(0.5, 0.5, 0.4, 40),
        make_arc(0.0, 0.0, 0.01, 3),
        NormalizedStroke::new(vec![NormalizedPoint::at(0.5, 0.5); 4]),
    ];
    for u in &strokes {
        for r in &strokes {
            let c = compare_strokes(u, r).unwrap();
            let sim = c.overall_similarity();
            assert!((0.0..=1.0).contains(&sim), "similarity {} out of range", sim);
            assert_report_finite(&c);
        }
    }
}

/// Every number crossing the output boundary is finite, even on
/// degenerate geometry
#[test]
fn test_outputs_are_finite_on_degenerate_strokes() {
    let dot = NormalizedStroke::new(vec![NormalizedPoint::at(0.0, 0.0); 2]);
    let vertical = make_line(0.5, 0.0, 0.5, 1.0, 5);
    let horizontal = make_line(0.0, 0.5, 1.0, 0.5, 5);

    let grader = Grader::new(GradingConfig::default()).unwrap();
    for (u, r) in [(&dot, &dot), (&dot, &vertical), (&vertical, &horizontal), (&horizontal, &dot)] {
        let report = grader.grade(u, r, Some("p")).unwrap();
        assert_report_finite(&report.comparison);
        assert!(report.similarity.is_finite());
        assert!(!report.feedback.is_empty());
        let f = extract_features(u).unwrap();
        assert!(f.to_array().iter().all(|v| v.is_finite()));
    }
}

// =============================================================================
// SEGMENTATION
// =============================================================================

#[test]
fn test_segmentation_scenarios() {
    assert!(segment_glyphs(&[], 0.05).is_empty());

    let first = make_line(0.1, 0.1, 0.3, 0.3, 2);
    let near = make_line(0.32, 0.3, 0.4, 0.4, 2);
    let far = make_line(0.9, 0.3, 0.95, 0.4, 2);

    let close = [first.clone(), near];
    let groups = segment_glyphs(&close, 0.05);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);

    let apart = [first, far];
    let groups = segment_glyphs(&apart, 0.05);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 1);
    assert_eq!(groups[1].len(), 1);
}

/// Grading a page isolates failures per glyph
#[test]
fn test_page_grading_skips_bad_groups() {
    let reference = make_line(0.1, 0.1, 0.2, 0.2, 10).with_label("t");
    let to_device = |x: f64, y: f64| Point::at(x * RM_WIDTH, y * RM_HEIGHT);

    let page = PageData {
        page_id: "practice-1".to_string(),
        strokes: vec![
            // Glyph 1: two touching strokes
            Stroke::new((0..5).map(|i| to_device(0.1 + 0.01 * i as f64, 0.1 + 0.01 * i as f64)).collect()),
            Stroke::new((0..5).map(|i| to_device(0.15 + 0.01 * i as f64, 0.15 + 0.01 * i as f64)).collect()),
            // Glyph 2: a lone dot far away
            Stroke::new(vec![to_device(0.8, 0.8)]),
            // Empty stroke is ignored
            Stroke::default(),
            // Glyph 3: a line elsewhere
            Stroke::new((0..10).map(|i| to_device(0.5 + 0.01 * i as f64, 0.5 + 0.01 * i as f64)).collect()),
        ],
        layer: 0,
    };

    let grader = Grader::new(GradingConfig::default()).unwrap();
    let report = grader.grade_page(&page, &reference, None).unwrap();

    assert_eq!(report.page_id, "practice-1");
    assert_eq!(report.group_count, 3);
    assert_eq!(report.graded.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].group_index, 1);
    assert!(report.skipped[0].reason.contains("insufficient data"));
    assert!(report.graded.iter().all(|r| r.label == "t"));
    assert!(report.mean_overall().unwrap() > 0.0);
}

/// A reference that cannot be compared is the caller's error, not every glyph's
#[test]
fn test_page_grading_rejects_single_point_reference() {
    let page = PageData {
        page_id: "practice-2".to_string(),
        strokes: vec![Stroke::new(
            (0..10)
                .map(|i| Point::at((0.1 + 0.01 * i as f64) * RM_WIDTH, 0.1 * RM_HEIGHT))
                .collect(),
        )],
        layer: 0,
    };
    let reference = NormalizedStroke::new(vec![NormalizedPoint::at(0.3, 0.3)]);

    let grader = Grader::new(GradingConfig::default()).unwrap();
    let result = grader.grade_page(&page, &reference, Some("t"));

    assert!(matches!(
        result,
        Err(GradeError::InsufficientData { required: 2, actual: 1 })
    ));
}

/// Reports serialize and deserialize
#[test]
fn test_report_json_round_trip() {
    let stroke = make_line(0.1, 0.1, 0.5, 0.5, 10);
    let grader = Grader::new(GradingConfig::default()).unwrap();
    let report = grader.grade(&stroke, &stroke, Some("a")).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"grade\":\"A\""));
    assert!(json.contains("\"feedback\""));
    assert!(json.contains("\"dtw_distance\""));

    let back: strokegrade::types::GradeReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.grade, Grade::A);
    assert_eq!(back.feedback, report.feedback);
}

#[test]
fn test_parseable_output_format() {
    let stroke = make_line(0.1, 0.1, 0.5, 0.5, 10);
    let grader = Grader::new(GradingConfig::default()).unwrap();
    let report = grader.grade(&stroke, &stroke, Some("a")).unwrap();

    let formatted = report.to_parseable_string();
    assert!(formatted.contains("label=a"));
    assert!(formatted.contains("grade=A"));
    assert!(formatted.contains("overall="));
    assert!(formatted.contains("feedback=1"));
}
