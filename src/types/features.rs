//! Hand-crafted geometric descriptors of a single stroke

use serde::{Deserialize, Serialize};

use crate::FEATURE_COUNT;

/// Fixed set of 15 features consumed by classical classifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricFeatures {
    // Bounding box
    pub bbox_width: f64,
    pub bbox_height: f64,
    /// width / height
    pub bbox_aspect_ratio: f64,

    // Path
    pub total_arc_length: f64,
    /// Start to end, straight line
    pub direct_distance: f64,
    /// direct_distance / total_arc_length
    pub straightness: f64,

    // Angles (radians)
    pub start_angle: f64,
    pub end_angle: f64,
    /// Sum of absolute wrapped turns between segments
    pub total_angle_change: f64,
    /// Mean absolute wrapped turn
    pub mean_curvature: f64,

    /// height / width
    pub height_width_ratio: f64,
    pub point_count: usize,

    // Dynamics
    pub mean_pressure: f64,
    pub std_pressure: f64,
    pub mean_speed: f64,
}

impl GeometricFeatures {
    /// Flat vector in the canonical feature order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.bbox_width,
            self.bbox_height,
            self.bbox_aspect_ratio,
            self.total_arc_length,
            self.direct_distance,
            self.straightness,
            self.start_angle,
            self.end_angle,
            self.total_angle_change,
            self.mean_curvature,
            self.height_width_ratio,
            self.point_count as f64,
            self.mean_pressure,
            self.std_pressure,
            self.mean_speed,
        ]
    }

    /// Feature names, index-aligned with `to_array`
    pub fn names() -> [&'static str; FEATURE_COUNT] {
        [
            "bbox_width",
            "bbox_height",
            "bbox_aspect_ratio",
            "total_arc_length",
            "direct_distance",
            "straightness",
            "start_angle",
            "end_angle",
            "total_angle_change",
            "mean_curvature",
            "height_width_ratio",
            "point_count",
            "mean_pressure",
            "std_pressure",
            "mean_speed",
        ]
    }
}
