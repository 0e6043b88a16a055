//! Core modules for strokegrade

pub mod api;
pub mod compare;
pub mod features;
pub mod feedback;
pub mod geometry;
pub mod grader;
pub mod normalize;
pub mod scoring;
pub mod segment;

pub use api::{create_router, run_server};
pub use compare::{compare_strokes, dtw_distance, frechet_distance};
pub use features::extract_features;
pub use feedback::generate_feedback;
pub use geometry::wrap_angle;
pub use grader::{merge_group, Grader};
pub use normalize::{resample_stroke, Normalize, Normalizer};
pub use scoring::score_attempt;
pub use segment::{segment_by_grid, segment_glyphs, GlyphGroup, GridCell, Segmenter};
