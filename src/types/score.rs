//! Graded score for one attempt

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::{GRADE_A_MIN, GRADE_B_MIN, GRADE_C_MIN, GRADE_D_MIN};

/// Letter grade derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Band lookup, inclusive at each lower edge
    pub fn from_score(overall: f64) -> Self {
        if overall >= GRADE_A_MIN {
            Grade::A
        } else if overall >= GRADE_B_MIN {
            Grade::B
        } else if overall >= GRADE_C_MIN {
            Grade::C
        } else if overall >= GRADE_D_MIN {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Terminal color for the grade
    pub fn color(&self) -> Color {
        match self {
            Grade::A => Color::Green,
            Grade::B => Color::BrightGreen,
            Grade::C => Color::Yellow,
            Grade::D => Color::BrightRed,
            Grade::F => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dimension scores and their weighted blend, all in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptScore {
    /// From DTW distance
    pub shape_score: f64,
    /// From bbox diagonal ratio
    pub size_score: f64,
    /// From start/end angle deviation
    pub angle_score: f64,
    /// From curvature deviation
    pub smoothness_score: f64,
    pub overall_score: f64,
}

impl AttemptScore {
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall_score)
    }

    pub fn is_finite(&self) -> bool {
        [
            self.shape_score,
            self.size_score,
            self.angle_score,
            self.smoothness_score,
            self.overall_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
