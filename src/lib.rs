//! strokegrade: grades handwritten pen strokes against reference glyphs
//!
//! Pipeline: raw stroke → Normalizer → Segmenter → Comparator → Scorer → Feedback

pub mod config;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::GradingConfig;
pub use error::{GradeError, GradeResult};

// =============================================================================
// DEVICE - reMarkable coordinate space
// =============================================================================

/// Horizontal extent of the capture surface in device units
pub const RM_WIDTH: f64 = 1404.0;

/// Vertical extent of the capture surface in device units
pub const RM_HEIGHT: f64 = 1872.0;

// =============================================================================
// GEOMETRY GUARDS
// =============================================================================

/// Extents, lengths and diagonals below this are treated as zero
pub const GEOMETRY_EPSILON: f64 = 1e-8;

/// Fewest points for which segment direction and length exist
pub const MIN_STROKE_POINTS: usize = 2;

/// Number of entries in a feature vector
pub const FEATURE_COUNT: usize = 15;

// =============================================================================
// SEGMENTATION DEFAULTS
// =============================================================================

/// Endpoint gap (normalized units) above which a new glyph starts
pub const DEFAULT_GAP_THRESHOLD: f64 = 0.05;

/// Grid layout for practice sheets
pub const DEFAULT_GRID_ROWS: usize = 4;
pub const DEFAULT_GRID_COLS: usize = 4;

/// Point count for fixed-length resampling
pub const DEFAULT_TARGET_LENGTH: usize = 64;

/// Point cap per stroke before comparison (bounds O(n·m) work)
pub const DEFAULT_MAX_POINTS: usize = 512;

// =============================================================================
// SIMILARITY WEIGHTS (sum = 1.0)
// =============================================================================

pub const SIMILARITY_WEIGHT_SHAPE: f64 = 0.4;
pub const SIMILARITY_WEIGHT_SIZE: f64 = 0.2;
pub const SIMILARITY_WEIGHT_CURVATURE: f64 = 0.2;
pub const SIMILARITY_WEIGHT_ANGLE: f64 = 0.2;

// =============================================================================
// SCORE WEIGHTS (sum = 1.0) - shape matters most
// =============================================================================

pub const SCORE_WEIGHT_SHAPE: f64 = 0.40;
pub const SCORE_WEIGHT_SIZE: f64 = 0.25;
pub const SCORE_WEIGHT_ANGLE: f64 = 0.20;
pub const SCORE_WEIGHT_SMOOTHNESS: f64 = 0.15;

/// DTW distance multiplier for the shape score
pub const SHAPE_DISTANCE_GAIN: f64 = 2.0;

/// Curvature deviation multiplier for the smoothness score
pub const SMOOTHNESS_CURVATURE_GAIN: f64 = 0.5;

// =============================================================================
// GRADE BANDS - inclusive at the lower edge
// =============================================================================

pub const GRADE_A_MIN: f64 = 0.9;
pub const GRADE_B_MIN: f64 = 0.8;
pub const GRADE_C_MIN: f64 = 0.7;
pub const GRADE_D_MIN: f64 = 0.6;

// =============================================================================
// FEEDBACK THRESHOLDS
// =============================================================================

/// Overall score for the affirming banner
pub const FEEDBACK_GOOD_MIN: f64 = 0.9;

/// Overall score for the "recognizable" banner
pub const FEEDBACK_RECOGNIZABLE_MIN: f64 = 0.7;

/// Size ratio bounds outside which size advice is given
pub const FEEDBACK_SIZE_TOO_LARGE: f64 = 1.3;
pub const FEEDBACK_SIZE_TOO_SMALL: f64 = 0.7;

/// Start/end angle deviation (radians)
pub const FEEDBACK_ANGLE_MAX: f64 = 0.3;

/// Total curvature deviation (radians)
pub const FEEDBACK_CURVATURE_MAX: f64 = 0.5;

/// Height/width ratio error
pub const FEEDBACK_PROPORTION_MAX: f64 = 0.3;

/// Shape score below which tracing is suggested
pub const FEEDBACK_SHAPE_MIN: f64 = 0.6;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
