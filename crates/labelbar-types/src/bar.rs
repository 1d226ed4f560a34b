//! Bar (OHLC observation) representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read access to the open/high/low/close fields of a bar-like record.
///
/// Implemented by raw [`Bar`]s and by resampled bars so the pattern
/// detector can run on either.
pub trait Ohlc {
    /// Bar open time.
    fn timestamp(&self) -> DateTime<Utc>;
    /// Opening price.
    fn open(&self) -> f64;
    /// Highest price.
    fn high(&self) -> f64;
    /// Lowest price.
    fn low(&self) -> f64;
    /// Closing price.
    fn close(&self) -> f64;

    /// Returns true if the bar closed above its open.
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    /// Returns true if the bar closed below its open.
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Returns true if all four prices are finite.
    fn is_complete(&self) -> bool {
        self.open().is_finite()
            && self.high().is_finite()
            && self.low().is_finite()
            && self.close().is_finite()
    }
}

/// One side (ask or bid) of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Opening price on this side.
    pub open: f64,
    /// Highest price on this side.
    pub high: f64,
    /// Lowest price on this side.
    pub low: f64,
    /// Closing price on this side.
    pub close: f64,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub const fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Returns the field-wise mid point between two sides.
    #[must_use]
    pub fn mid(&self, other: &Self) -> Self {
        Self {
            open: (self.open + other.open) / 2.0,
            high: (self.high + other.high) / 2.0,
            low: (self.low + other.low) / 2.0,
            close: (self.close + other.close) / 2.0,
        }
    }
}

/// A single time-sampled price observation.
///
/// Prices are plain `f64`; a missing price is stored as NaN and every
/// analysis pass treats a non-finite price as "no data" for the
/// derivations that need it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time (UTC), serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the bar.
    pub high: f64,
    /// Lowest price during the bar.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Ask side, when the source quotes both sides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<Quote>,
    /// Bid side, when the source quotes both sides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Quote>,
    /// Traded volume, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    /// Creates a new bar without ask/bid detail or volume.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            ask: None,
            bid: None,
            volume: None,
        }
    }

    /// Creates a bar from ask and bid sides; OHLC is the mid price.
    #[must_use]
    pub fn from_sides(timestamp: DateTime<Utc>, ask: Quote, bid: Quote, volume: Option<f64>) -> Self {
        let mid = ask.mid(&bid);
        Self {
            timestamp,
            open: mid.open,
            high: mid.high,
            low: mid.low,
            close: mid.close,
            ask: Some(ask),
            bid: Some(bid),
            volume,
        }
    }

    /// Sets the traded volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Returns the timestamp as epoch milliseconds.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

impl Ohlc for Bar {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_from_sides_mid_price() {
        let ask = Quote::new(2001.0, 2003.0, 2000.0, 2002.0);
        let bid = Quote::new(1999.0, 2001.0, 1998.0, 2000.0);
        let bar = Bar::from_sides(ts(), ask, bid, Some(42.0));

        assert!((bar.open - 2000.0).abs() < 1e-10);
        assert!((bar.high - 2002.0).abs() < 1e-10);
        assert!((bar.low - 1999.0).abs() < 1e-10);
        assert!((bar.close - 2001.0).abs() < 1e-10);
        assert_eq!(bar.volume, Some(42.0));
        assert!((bar.ask.unwrap().close - bar.bid.unwrap().close - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_direction_helpers() {
        let up = Bar::new(ts(), 10.0, 12.0, 9.0, 11.0);
        let down = Bar::new(ts(), 11.0, 12.0, 9.0, 10.0);
        assert!(up.is_bullish());
        assert!(!up.is_bearish());
        assert!(down.is_bearish());
    }

    #[test]
    fn test_incomplete_bar() {
        let bar = Bar::new(ts(), 10.0, f64::NAN, 9.0, 11.0);
        assert!(!bar.is_complete());
        assert!(Bar::new(ts(), 10.0, 12.0, 9.0, 11.0).is_complete());
    }

    #[test]
    fn test_serialize_millis() {
        let bar = Bar::new(ts(), 1.0, 2.0, 0.5, 1.5);
        let json = serde_json::to_string(&bar).unwrap();
        assert!(json.contains(&format!("\"timestamp\":{}", ts().timestamp_millis())));
        assert!(!json.contains("ask"));

        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bar);
    }
}
