//! Core types for strokegrade

mod comparison;
mod features;
mod primitive;
mod report;
mod score;
mod stroke;

pub use comparison::ComparisonResult;
pub use features::GeometricFeatures;
pub use primitive::GreggPrimitive;
pub use report::{BatchReport, GradeReport, SkippedAttempt};
pub use score::{AttemptScore, Grade};
pub use stroke::{NormalizedPoint, NormalizedStroke, PageData, PenType, Point, Stroke, StrokeColor};
