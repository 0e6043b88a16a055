//! Runtime configuration
//!
//! Only segmentation, resampling, the point cap, label strictness, device
//! bounds and the server address are tunable. Scoring weights and feedback thresholds are
//! constants in the crate root.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::{GradeError, GradeResult};
use crate::{
    DEFAULT_GAP_THRESHOLD, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_MAX_POINTS,
    DEFAULT_TARGET_LENGTH, MIN_STROKE_POINTS, RM_HEIGHT, RM_WIDTH,
};

/// Prefix for environment overrides, e.g. `STROKEGRADE_GAP_THRESHOLD`
const ENV_PREFIX: &str = "STROKEGRADE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Device coordinate bounds used by the normalizer
    pub device_width: f64,
    pub device_height: f64,
    /// Gap-based segmentation threshold (normalized units)
    pub gap_threshold: f64,
    /// Grid-based segmentation layout
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Fixed length for resampled strokes
    pub target_length: usize,
    /// Largest stroke the comparator will accept
    pub max_points: usize,
    /// Reject labels outside the shorthand primitive set
    pub strict_labels: bool,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            device_width: RM_WIDTH,
            device_height: RM_HEIGHT,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            target_length: DEFAULT_TARGET_LENGTH,
            max_points: DEFAULT_MAX_POINTS,
            strict_labels: false,
            host: "127.0.0.1".to_owned(),
            port: 3000,
            log_level: "info".to_owned(),
        }
    }
}

impl GradingConfig {
    /// Load configuration from environment variables on top of the defaults.
    /// Loads `.env` if present.
    pub fn from_env() -> GradeResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let config = Self {
            device_width: parse_var_or("DEVICE_WIDTH", defaults.device_width)?,
            device_height: parse_var_or("DEVICE_HEIGHT", defaults.device_height)?,
            gap_threshold: parse_var_or("GAP_THRESHOLD", defaults.gap_threshold)?,
            grid_rows: parse_var_or("GRID_ROWS", defaults.grid_rows)?,
            grid_cols: parse_var_or("GRID_COLS", defaults.grid_cols)?,
            target_length: parse_var_or("TARGET_LENGTH", defaults.target_length)?,
            max_points: parse_var_or("MAX_POINTS", defaults.max_points)?,
            strict_labels: parse_var_or("STRICT_LABELS", defaults.strict_labels)?,
            host: get_var_or("HOST", &defaults.host),
            port: parse_var_or("PORT", defaults.port)?,
            log_level: get_var_or("LOG_LEVEL", &defaults.log_level),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> GradeResult<()> {
        if !(self.device_width > 0.0 && self.device_height > 0.0) {
            return Err(GradeError::InvalidConfig(format!(
                "device bounds must be positive, got {}x{}",
                self.device_width, self.device_height
            )));
        }
        if !(self.gap_threshold >= 0.0) {
            return Err(GradeError::InvalidConfig(format!(
                "gap_threshold must be non-negative, got {}",
                self.gap_threshold
            )));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(GradeError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if self.target_length < MIN_STROKE_POINTS {
            return Err(GradeError::InvalidConfig(format!(
                "target_length must be at least {}, got {}",
                MIN_STROKE_POINTS, self.target_length
            )));
        }
        if self.max_points < MIN_STROKE_POINTS {
            return Err(GradeError::InvalidConfig(format!(
                "max_points must be at least {}, got {}",
                MIN_STROKE_POINTS, self.max_points
            )));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(format!("{ENV_PREFIX}{key}")).unwrap_or_else(|_| default.to_owned())
}

fn parse_var_or<T>(key: &str, default: T) -> GradeResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(format!("{ENV_PREFIX}{key}")) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| GradeError::InvalidConfig(format!("invalid {ENV_PREFIX}{key}: {e}"))),
        Err(_) => Ok(default),
    }
}
