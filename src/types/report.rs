//! Report structures handed to the CLI and HTTP layers

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{AttemptScore, ComparisonResult, Grade, GreggPrimitive};

/// Everything produced for one graded attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// When the attempt was graded
    pub timestamp: DateTime<Utc>,
    /// Glyph the attempt was graded as
    pub label: String,
    /// Shorthand primitive named by `label`, if it is one
    #[serde(default)]
    pub primitive: Option<GreggPrimitive>,
    pub comparison: ComparisonResult,
    /// Derived from `comparison`, included for consumers
    pub similarity: f64,
    pub score: AttemptScore,
    pub grade: Grade,
    /// Most important first, never empty
    pub feedback: Vec<String>,
}

impl GradeReport {
    pub fn new(
        label: impl Into<String>,
        comparison: ComparisonResult,
        score: AttemptScore,
        feedback: Vec<String>,
    ) -> Self {
        let label = label.into();
        Self {
            timestamp: Utc::now(),
            primitive: label.parse().ok(),
            label,
            similarity: comparison.overall_similarity(),
            grade: score.grade(),
            comparison,
            score,
            feedback,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let headline = format!(
            "[{}] '{}' overall={:.3} | shape={:.2} size={:.2} angle={:.2} smooth={:.2}",
            self.grade,
            self.label,
            self.score.overall_score,
            self.score.shape_score,
            self.score.size_score,
            self.score.angle_score,
            self.score.smoothness_score,
        );
        let mut out = headline.color(self.grade.color()).bold().to_string();
        for line in &self.feedback {
            out.push('\n');
            out.push_str(&format!("  {} {}", "•".dimmed(), line));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "label={} | grade={} | overall={:.3} | dtw={:.4} | frechet={:.4} | size_ratio={:.3} | feedback={}",
            self.label,
            self.grade,
            self.score.overall_score,
            self.comparison.dtw_distance,
            self.comparison.frechet_distance,
            self.comparison.size_ratio,
            self.feedback.len(),
        )
    }
}

/// Why one glyph group of a page was not graded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAttempt {
    /// Index of the glyph group within the page
    pub group_index: usize,
    pub reason: String,
}

/// Result of grading every glyph group on a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub page_id: String,
    pub group_count: usize,
    pub graded: Vec<GradeReport>,
    pub skipped: Vec<SkippedAttempt>,
}

impl BatchReport {
    /// Mean overall score over graded attempts, `None` if nothing was graded
    pub fn mean_overall(&self) -> Option<f64> {
        if self.graded.is_empty() {
            return None;
        }
        let sum: f64 = self.graded.iter().map(|r| r.score.overall_score).sum();
        Some(sum / self.graded.len() as f64)
    }
}
