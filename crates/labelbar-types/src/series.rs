//! Time-ordered bar sequences.

use chrono::{DateTime, Utc};

use crate::{Bar, DateRange};

/// An ordered sequence of bars, ascending by timestamp.
///
/// [`PriceSeries::new`] trusts the caller's ordering; use
/// [`PriceSeries::from_unsorted`] when rows may arrive out of order or
/// contain duplicate timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Creates a series from bars already sorted by timestamp.
    #[must_use]
    pub const fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    /// Creates a series by sorting bars and dropping duplicate timestamps.
    ///
    /// When two bars share a timestamp the one appearing later in the
    /// input wins.
    #[must_use]
    pub fn from_unsorted(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self { bars: deduped }
    }

    /// Returns the bars as a slice.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Consumes the series, returning the bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series holds no bars.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// Returns the closing prices in order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Returns the timestamp of the first bar.
    #[must_use]
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.first().map(|b| b.timestamp)
    }

    /// Returns the timestamp of the last bar.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(|b| b.timestamp)
    }

    /// Returns the bars that fall inside the range's session bounds.
    #[must_use]
    pub fn filter_range(&self, range: &DateRange) -> Self {
        Self {
            bars: self
                .bars
                .iter()
                .filter(|b| range.contains_instant(b.timestamp))
                .copied()
                .collect(),
        }
    }

    /// Merges another series into this one.
    ///
    /// Bars from `newer` replace bars with the same timestamp.
    #[must_use]
    pub fn merge(self, newer: Self) -> Self {
        let mut bars = self.bars;
        bars.extend(newer.bars);
        Self::from_unsorted(bars)
    }
}

impl From<Vec<Bar>> for PriceSeries {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}

impl FromIterator<Bar> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PriceSeries {
    type Item = Bar;
    type IntoIter = std::vec::IntoIter<Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn bar_at(hour: u32, minute: u32, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, hour, minute, 0).unwrap();
        Bar::new(ts, close, close, close, close)
    }

    #[test]
    fn test_from_unsorted_sorts_and_dedups() {
        let series = PriceSeries::from_unsorted(vec![
            bar_at(10, 2, 3.0),
            bar_at(10, 0, 1.0),
            bar_at(10, 1, 2.0),
            bar_at(10, 1, 2.5),
        ]);

        assert_eq!(series.closes(), vec![1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_merge_newer_wins() {
        let old = PriceSeries::new(vec![bar_at(10, 0, 1.0), bar_at(10, 1, 2.0)]);
        let new = PriceSeries::new(vec![bar_at(10, 1, 9.0), bar_at(10, 2, 3.0)]);

        let merged = old.merge(new);
        assert_eq!(merged.closes(), vec![1.0, 9.0, 3.0]);
        assert_eq!(merged.last_timestamp(), Some(bar_at(10, 2, 0.0).timestamp));
    }

    #[test]
    fn test_filter_range_uses_session_cutoff() {
        let series = PriceSeries::new(vec![bar_at(5, 59, 1.0), bar_at(6, 0, 2.0), bar_at(12, 0, 3.0)]);
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let range = DateRange::new(day, next).unwrap();

        assert_eq!(series.filter_range(&range).closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first_timestamp(), None);
        assert_eq!(series.last_timestamp(), None);
    }
}
