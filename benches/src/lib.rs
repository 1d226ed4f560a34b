//! Benchmark utilities for labelbar.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use labelbar_lib::{Bar, PriceSeries};

/// Benchmark sizes: name and number of one-minute bars.
pub const SIZES: &[(&str, usize)] = &[("1-day", 1_440), ("1-week", 7_200), ("1-month", 30_000)];

/// First timestamp of every synthetic series.
#[must_use]
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Deterministic one-minute random walk at gold price scale.
///
/// Uses a xorshift generator so runs are comparable across machines.
#[must_use]
pub fn random_walk(len: usize) -> PriceSeries {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 2001) as f64 / 1000.0 - 1.0
    };

    let mut close = 2650.0;
    (0..len)
        .map(|i| {
            let open = close;
            close += next();
            let high = open.max(close) + next().abs();
            let low = open.min(close) - next().abs();
            Bar::new(start() + TimeDelta::minutes(i as i64), open, high, low, close)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_walk_is_ordered_and_valid() {
        let series = random_walk(500);
        assert_eq!(series.len(), 500);
        assert!(series.bars().windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(series.iter().all(|b| b.low <= b.open.min(b.close)));
        assert!(series.iter().all(|b| b.high >= b.open.max(b.close)));
        assert_eq!(random_walk(50), random_walk(50));
    }
}
