//! Error types for the grading pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradeError {
    /// Stroke is too short for direction or length to exist
    #[error("insufficient data: stroke has {actual} point(s), at least {required} required")]
    InsufficientData { required: usize, actual: usize },

    /// Stroke exceeds the configured point cap
    #[error("stroke has {actual} points, limit is {limit}")]
    TooManyPoints { limit: usize, actual: usize },

    #[error("configuration error: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GradeError {
    /// True for errors caused by one attempt's geometry, which batch
    /// grading skips instead of aborting
    pub fn is_per_attempt(&self) -> bool {
        matches!(
            self,
            GradeError::InsufficientData { .. } | GradeError::TooManyPoints { .. }
        )
    }
}

pub type GradeResult<T> = Result<T, GradeError>;
