//! Resampling interval definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// A bar interval expressed in whole minutes.
///
/// Bucket boundaries are multiples of the interval since the Unix epoch,
/// which lines up with wall-clock boundaries for every interval that
/// divides a day evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Interval(u32);

impl Interval {
    /// 1-minute bars.
    pub const MINUTE_1: Self = Self(1);
    /// 5-minute bars.
    pub const MINUTE_5: Self = Self(5);
    /// 15-minute bars.
    pub const MINUTE_15: Self = Self(15);
    /// 30-minute bars.
    pub const MINUTE_30: Self = Self(30);
    /// 1-hour bars.
    pub const HOUR_1: Self = Self(60);
    /// 4-hour bars.
    pub const HOUR_4: Self = Self(240);
    /// Daily bars.
    pub const DAY_1: Self = Self(MINUTES_PER_DAY);

    /// Creates an interval of `minutes` minutes, or `None` for zero.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes == 0 { None } else { Some(Self(minutes)) }
    }

    /// Returns the interval length in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns the interval length in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.0 as i64 * 60_000
    }

    /// Returns how many `finer` bars make up one bar of this interval.
    ///
    /// Returns `None` when `finer` does not divide this interval evenly.
    #[must_use]
    pub const fn bars_per(&self, finer: Self) -> Option<u32> {
        if self.0 % finer.0 == 0 {
            Some(self.0 / finer.0)
        } else {
            None
        }
    }

    /// Returns the start of the bucket containing `timestamp`.
    #[must_use]
    pub fn bucket_start(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let step = self.milliseconds();
        let floored = timestamp.timestamp_millis().div_euclid(step) * step;
        DateTime::from_timestamp_millis(floored).unwrap_or(timestamp)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::MINUTE_15
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.0
    }
}

impl TryFrom<u32> for Interval {
    type Error = IntervalParseError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes).ok_or_else(|| IntervalParseError(minutes.to_string()))
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % MINUTES_PER_DAY == 0 {
            write!(f, "{}d", self.0 / MINUTES_PER_DAY)
        } else if self.0 % MINUTES_PER_HOUR == 0 {
            write!(f, "{}h", self.0 / MINUTES_PER_HOUR)
        } else {
            write!(f, "{}m", self.0)
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let err = || IntervalParseError(s.to_string());

        // Accept both "15m" and "m15" spellings, plus pandas-style "15min".
        let (count, unit) = if let Some(rest) = lower.strip_suffix("min") {
            (rest, "m")
        } else if let Some(idx) = lower.find(|c: char| !c.is_ascii_digit()) {
            if idx == 0 {
                let digits = lower.trim_start_matches(|c: char| !c.is_ascii_digit());
                (digits, &lower[..lower.len() - digits.len()])
            } else {
                (&lower[..idx], &lower[idx..])
            }
        } else {
            (lower.as_str(), "m")
        };

        let count: u32 = count.parse().map_err(|_| err())?;
        let per_unit = match unit {
            "m" => 1,
            "h" => MINUTES_PER_HOUR,
            "d" => MINUTES_PER_DAY,
            _ => return Err(err()),
        };

        count
            .checked_mul(per_unit)
            .and_then(Self::from_minutes)
            .ok_or_else(err)
    }
}

/// Error returned when parsing an invalid interval string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid interval '{}', expected a positive count of minutes, hours or days (e.g. 15m, 1h, h4, 1d)",
            self.0
        )
    }
}

impl std::error::Error for IntervalParseError {}
