//! Stroke and point types, raw and normalized

use serde::{Deserialize, Serialize};

/// Pen types reported by the capture device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenType {
    Ballpoint,
    Marker,
    #[default]
    Fineliner,
    Pencil,
    MechanicalPencil,
    Brush,
    Highlighter,
    Eraser,
    Calligraphy,
}

/// Stroke colors reported by the capture device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeColor {
    #[default]
    Black,
    Grey,
    White,
}

/// A single captured point in device units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in [0, 1]
    pub pressure: f64,
    /// Stylus tilt (radians)
    pub tilt: f64,
    pub speed: f64,
    /// Tangent angle (radians)
    pub direction: f64,
    /// Effective brush width
    pub width: f64,
    /// Seconds since stroke start
    pub timestamp: f64,
}

impl Point {
    /// Point with only the spatial channels set
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// One continuous pen-down gesture. Point order is temporal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub pen_type: PenType,
    pub color: StrokeColor,
    pub brush_size: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            pen_type: PenType::default(),
            color: StrokeColor::default(),
            brush_size: 1.0,
        }
    }
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }
}

/// A point with coordinates in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
    pub tilt: f64,
    pub speed: f64,
    pub direction: f64,
    pub timestamp: f64,
}

impl NormalizedPoint {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Euclidean distance in the unit square
    pub fn distance_to(&self, other: &NormalizedPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A stroke in normalized coordinates, optionally labelled with its glyph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedStroke {
    pub points: Vec<NormalizedPoint>,
    /// Ground-truth glyph identity, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl NormalizedStroke {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&NormalizedPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&NormalizedPoint> {
        self.points.last()
    }

    /// Spatial channels only
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    /// One row per point: `[x, y, pressure, tilt, speed, direction]`
    pub fn to_rows(&self) -> Vec<[f64; 6]> {
        self.points
            .iter()
            .map(|p| [p.x, p.y, p.pressure, p.tilt, p.speed, p.direction])
            .collect()
    }

    /// Mean of all point coordinates, `None` for an empty stroke
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some((sx / n, sy / n))
    }
}

/// All strokes captured on one page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub page_id: String,
    pub strokes: Vec<Stroke>,
    /// Layer index on the device (0-4)
    pub layer: u8,
}
