//! Gregg shorthand primitives: the closed set of glyph labels

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GradeError;

/// Stroke primitives of the first shorthand unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreggPrimitive {
    // Circles (vowels)
    A,
    E,
    O,
    // Straight and curved lines
    T,
    D,
    N,
    M,
    // Curves
    R,
    L,
    K,
    G,
    // Special
    S,
    P,
    B,
    F,
    V,
}

impl GreggPrimitive {
    pub const ALL: [GreggPrimitive; 16] = [
        GreggPrimitive::A,
        GreggPrimitive::E,
        GreggPrimitive::O,
        GreggPrimitive::T,
        GreggPrimitive::D,
        GreggPrimitive::N,
        GreggPrimitive::M,
        GreggPrimitive::R,
        GreggPrimitive::L,
        GreggPrimitive::K,
        GreggPrimitive::G,
        GreggPrimitive::S,
        GreggPrimitive::P,
        GreggPrimitive::B,
        GreggPrimitive::F,
        GreggPrimitive::V,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GreggPrimitive::A => "a",
            GreggPrimitive::E => "e",
            GreggPrimitive::O => "o",
            GreggPrimitive::T => "t",
            GreggPrimitive::D => "d",
            GreggPrimitive::N => "n",
            GreggPrimitive::M => "m",
            GreggPrimitive::R => "r",
            GreggPrimitive::L => "l",
            GreggPrimitive::K => "k",
            GreggPrimitive::G => "g",
            GreggPrimitive::S => "s",
            GreggPrimitive::P => "p",
            GreggPrimitive::B => "b",
            GreggPrimitive::F => "f",
            GreggPrimitive::V => "v",
        }
    }

    /// Shape the primitive is written as
    pub fn description(&self) -> &'static str {
        match self {
            GreggPrimitive::A | GreggPrimitive::E => "small circle",
            GreggPrimitive::O => "large circle",
            GreggPrimitive::T => "short forward straight",
            GreggPrimitive::D => "long forward straight",
            GreggPrimitive::N => "short curved line",
            GreggPrimitive::M => "long curved line",
            GreggPrimitive::R => "short forward curve",
            GreggPrimitive::L => "long forward curve",
            GreggPrimitive::K => "short backward curve",
            GreggPrimitive::G => "long backward curve",
            GreggPrimitive::S => "small comma-shaped curve",
            GreggPrimitive::P => "short backward straight",
            GreggPrimitive::B => "long backward straight",
            GreggPrimitive::F => "short curve, left motion",
            GreggPrimitive::V => "long curve, left motion",
        }
    }
}

impl FromStr for GreggPrimitive {
    type Err = GradeError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| GradeError::Input(format!("unknown glyph label '{}'", s)))
    }
}

impl std::fmt::Display for GreggPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
