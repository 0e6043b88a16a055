//! Grader: the comparison → scoring → feedback chain behind one facade
//!
//! Holds only read-only configuration, so one instance can grade
//! independent attempts from many threads.

use tracing::{info, warn};

use crate::core::compare::compare_strokes;
use crate::core::features::extract_features;
use crate::core::feedback::generate_feedback;
use crate::core::normalize::{resample_stroke, Normalizer};
use crate::core::scoring::score_attempt;
use crate::core::segment::{GlyphGroup, Segmenter};
use crate::error::{GradeError, GradeResult};
use crate::types::{
    BatchReport, GeometricFeatures, GradeReport, GreggPrimitive, NormalizedStroke, PageData,
    SkippedAttempt,
};
use crate::{GradingConfig, MIN_STROKE_POINTS};

/// Label used when neither caller nor strokes name the glyph
const UNLABELLED: &str = "stroke";

#[derive(Debug, Clone)]
pub struct Grader {
    config: GradingConfig,
    normalizer: Normalizer,
    segmenter: Segmenter,
}

impl Grader {
    pub fn new(config: GradingConfig) -> GradeResult<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: Normalizer::from_config(&config)?,
            segmenter: Segmenter::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Grade one attempt against a reference.
    ///
    /// The label is taken from the argument, then the reference, then the
    /// attempt itself. With `strict_labels` set it must name a shorthand
    /// primitive.
    pub fn grade(
        &self,
        user: &NormalizedStroke,
        reference: &NormalizedStroke,
        label: Option<&str>,
    ) -> GradeResult<GradeReport> {
        self.check_point_cap(user)?;
        self.check_point_cap(reference)?;

        let label = label
            .or(reference.label.as_deref())
            .or(user.label.as_deref())
            .unwrap_or(UNLABELLED);
        self.check_label(label)?;

        let comparison = compare_strokes(user, reference)?;
        let score = score_attempt(&comparison);
        let feedback = generate_feedback(&comparison, label, Some(&score));
        let report = GradeReport::new(label, comparison, score, feedback);

        info!(
            label = %report.label,
            grade = %report.grade,
            overall = report.score.overall_score,
            "graded attempt"
        );
        Ok(report)
    }

    /// Grade every glyph on a raw page against one reference.
    ///
    /// Strokes are normalized and gap-segmented; each group's strokes are
    /// joined in temporal order into one attempt. Groups that cannot be
    /// graded are reported in `skipped` and do not abort the batch. A
    /// reference that cannot be compared fails the whole call.
    pub fn grade_page(
        &self,
        page: &PageData,
        reference: &NormalizedStroke,
        label: Option<&str>,
    ) -> GradeResult<BatchReport> {
        self.check_reference(reference)?;
        if let Some(label) = label.or(reference.label.as_deref()) {
            self.check_label(label)?;
        }

        let strokes = self.normalizer.normalize_page(page);
        let groups = self.segmenter.by_gap(&strokes);

        let mut report = BatchReport {
            page_id: page.page_id.clone(),
            group_count: groups.len(),
            ..BatchReport::default()
        };

        for (group_index, group) in groups.iter().enumerate() {
            let attempt = merge_group(group);
            match self.grade(&attempt, reference, label) {
                Ok(graded) => report.graded.push(graded),
                Err(err) if err.is_per_attempt() => {
                    warn!(page = %page.page_id, group_index, error = %err, "skipped glyph group");
                    report.skipped.push(SkippedAttempt {
                        group_index,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            page = %report.page_id,
            groups = report.group_count,
            graded = report.graded.len(),
            skipped = report.skipped.len(),
            "graded page"
        );
        Ok(report)
    }

    /// Gap-based segmentation with the configured threshold
    pub fn segment<'a>(&self, strokes: &'a [NormalizedStroke]) -> Vec<GlyphGroup<'a>> {
        self.segmenter.by_gap(strokes)
    }

    pub fn features(&self, stroke: &NormalizedStroke) -> GradeResult<GeometricFeatures> {
        extract_features(stroke)
    }

    /// Features of the stroke after resampling to `target_length` points
    pub fn resampled_features(&self, stroke: &NormalizedStroke) -> GradeResult<GeometricFeatures> {
        let resampled = self.resample(stroke)?;
        extract_features(&resampled)
    }

    pub fn resample(&self, stroke: &NormalizedStroke) -> GradeResult<NormalizedStroke> {
        resample_stroke(stroke, self.config.target_length)
    }

    fn check_label(&self, label: &str) -> GradeResult<()> {
        if self.config.strict_labels {
            label.parse::<GreggPrimitive>()?;
        }
        Ok(())
    }

    fn check_reference(&self, reference: &NormalizedStroke) -> GradeResult<()> {
        if reference.len() < MIN_STROKE_POINTS {
            return Err(GradeError::InsufficientData {
                required: MIN_STROKE_POINTS,
                actual: reference.len(),
            });
        }
        self.check_point_cap(reference)
    }

    fn check_point_cap(&self, stroke: &NormalizedStroke) -> GradeResult<()> {
        if stroke.len() > self.config.max_points {
            return Err(GradeError::TooManyPoints {
                limit: self.config.max_points,
                actual: stroke.len(),
            });
        }
        Ok(())
    }
}

/// Join a glyph group's strokes, in order, into one attempt
pub fn merge_group(group: &[&NormalizedStroke]) -> NormalizedStroke {
    NormalizedStroke {
        points: group.iter().flat_map(|s| s.points.iter().copied()).collect(),
        label: group.iter().find_map(|s| s.label.clone()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
