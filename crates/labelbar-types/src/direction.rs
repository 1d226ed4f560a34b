//! Three-way label values.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Direction label: down, flat or up.
///
/// Serialized and exported as the integers `-1`, `0` and `1`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    /// Price moved down (or the lower barrier was hit first).
    #[display("down")]
    Down,
    /// No move, or neither barrier was touched.
    #[display("flat")]
    Flat,
    /// Price moved up (or the upper barrier was hit first).
    #[display("up")]
    Up,
}

impl Direction {
    /// Returns the sign of `value`, or `None` for NaN.
    ///
    /// Zero (including negative zero) maps to [`Direction::Flat`].
    #[must_use]
    pub fn from_sign(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Up)
        } else if value < 0.0 {
            Some(Self::Down)
        } else if value == 0.0 {
            Some(Self::Flat)
        } else {
            None
        }
    }

    /// Classifies `value` against a symmetric dead band of `±threshold`.
    ///
    /// Values strictly above `threshold` are up, strictly below
    /// `-threshold` are down, anything else is flat. NaN yields `None`.
    #[must_use]
    pub fn from_threshold(value: f64, threshold: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value > threshold {
            Some(Self::Up)
        } else if value < -threshold {
            Some(Self::Down)
        } else {
            Some(Self::Flat)
        }
    }

    /// Returns the label as `-1`, `0` or `1`.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Down => -1,
            Self::Flat => 0,
            Self::Up => 1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Down),
            0 => Ok(Self::Flat),
            1 => Ok(Self::Up),
            other => Err(format!("invalid direction label {other}, expected -1, 0 or 1")),
        }
    }
}
