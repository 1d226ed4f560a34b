//! Pattern hit-rate summary.

use serde::Serialize;

use crate::PatternRow;

/// Outcome of a pattern scan.
///
/// Rates are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PatternReport {
    /// Number of bars completing the pattern.
    pub pattern_count: usize,
    /// Share of pattern bars followed by a profit hit.
    pub pattern_success_rate: Option<f64>,
    /// Share of all bars followed by a profit hit.
    pub general_success_rate: Option<f64>,
    /// Number of bars scanned.
    pub total_intervals: usize,
    /// `pattern_count / total_intervals`.
    pub pattern_frequency: Option<f64>,
}

impl PatternReport {
    /// Summarizes annotated rows.
    ///
    /// Rows whose profit check is undefined are left out of both success
    /// rates.
    #[must_use]
    pub fn from_rows(rows: &[PatternRow]) -> Self {
        let pattern_count = rows.iter().filter(|r| r.pattern).count();
        let total_intervals = rows.len();

        Self {
            pattern_count,
            pattern_success_rate: hit_rate(rows.iter().filter(|r| r.pattern)),
            general_success_rate: hit_rate(rows.iter()),
            total_intervals,
            pattern_frequency: ratio(pattern_count, total_intervals),
        }
    }

    /// Returns how much more often the pattern hits than the baseline.
    #[must_use]
    pub fn edge(&self) -> Option<f64> {
        Some(self.pattern_success_rate? - self.general_success_rate?)
    }
}

fn hit_rate<'a>(rows: impl Iterator<Item = &'a PatternRow>) -> Option<f64> {
    let (hits, defined) = rows
        .filter_map(|r| r.profit_hit)
        .fold((0usize, 0usize), |(h, d), hit| (h + usize::from(hit), d + 1));
    ratio(hits, defined)
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}
