//! Label distribution statistics.

use labelbar_types::Direction;
use serde::Serialize;

/// Share of each label value over the defined cells of a label column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelSummary {
    /// Number of defined labels.
    pub count: usize,
    /// Fraction of defined labels equal to up.
    pub fraction_up: f64,
    /// Fraction of defined labels equal to down.
    pub fraction_down: f64,
    /// Fraction of defined labels equal to flat.
    pub fraction_flat: f64,
}

/// Summarizes the defined subset of a label column.
///
/// An all-undefined column yields a zero count with all fractions `0.0`.
#[must_use]
pub fn summarize(labels: &[Option<Direction>]) -> LabelSummary {
    let (mut up, mut down, mut flat) = (0usize, 0usize, 0usize);
    for label in labels.iter().flatten() {
        match label {
            Direction::Up => up += 1,
            Direction::Down => down += 1,
            Direction::Flat => flat += 1,
        }
    }

    let count = up + down + flat;
    let fraction = |k: usize| if count == 0 { 0.0 } else { k as f64 / count as f64 };
    LabelSummary {
        count,
        fraction_up: fraction(up),
        fraction_down: fraction(down),
        fraction_flat: fraction(flat),
    }
}

/// Mean length of runs of equal consecutive labels.
///
/// Undefined cells are removed first; they do not break a run. Returns
/// `0.0` when nothing is defined.
#[must_use]
pub fn average_run_length<T: PartialEq>(labels: &[Option<T>]) -> f64 {
    let mut defined = 0usize;
    let mut runs = 0usize;
    let mut previous: Option<&T> = None;

    for label in labels.iter().flatten() {
        defined += 1;
        if previous != Some(label) {
            runs += 1;
        }
        previous = Some(label);
    }

    if runs == 0 { 0.0 } else { defined as f64 / runs as f64 }
}

/// Distribution and stability of one label column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetStats {
    /// Label distribution.
    pub summary: LabelSummary,
    /// Mean run length of equal consecutive labels.
    pub average_run_length: f64,
}

impl TargetStats {
    /// Computes both statistics for a label column.
    #[must_use]
    pub fn of(labels: &[Option<Direction>]) -> Self {
        Self {
            summary: summarize(labels),
            average_run_length: average_run_length(labels),
        }
    }
}

/// Statistics for every label column of a [`LabelSet`](crate::LabelSet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelReport {
    /// First-touch label statistics.
    pub touch: TargetStats,
    /// Trend label statistics.
    pub trend: TargetStats,
    /// Regime label statistics.
    pub regime: TargetStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const UP: Option<Direction> = Some(Direction::Up);
    const DOWN: Option<Direction> = Some(Direction::Down);
    const FLAT: Option<Direction> = Some(Direction::Flat);

    #[test]
    fn test_summarize_fractions() {
        let summary = summarize(&[UP, UP, DOWN, FLAT]);
        assert_eq!(summary.count, 4);
        assert_abs_diff_eq!(summary.fraction_up, 0.5);
        assert_abs_diff_eq!(summary.fraction_down, 0.25);
        assert_abs_diff_eq!(summary.fraction_flat, 0.25);
    }

    #[test]
    fn test_summarize_skips_undefined() {
        let summary = summarize(&[None, UP, None, DOWN]);
        assert_eq!(summary.count, 2);
        assert_abs_diff_eq!(summary.fraction_up, 0.5);
        assert_abs_diff_eq!(summary.fraction_flat, 0.0);
    }

    #[test]
    fn test_summarize_all_undefined() {
        let summary = summarize(&[None, None]);
        assert_eq!(summary.count, 0);
        assert_abs_diff_eq!(summary.fraction_up, 0.0);
        assert_abs_diff_eq!(summary.fraction_down, 0.0);
        assert_abs_diff_eq!(summary.fraction_flat, 0.0);
    }

    #[test]
    fn test_average_run_length() {
        let labels = [UP, UP, UP, DOWN, DOWN, FLAT];
        assert_abs_diff_eq!(average_run_length(&labels), 2.0);
    }

    #[test]
    fn test_undefined_does_not_break_runs() {
        let labels = [UP, None, UP, None, DOWN, None];
        assert_abs_diff_eq!(average_run_length(&labels), 1.5);
    }

    #[test]
    fn test_run_length_edge_cases() {
        assert_abs_diff_eq!(average_run_length::<Direction>(&[]), 0.0);
        assert_abs_diff_eq!(average_run_length::<Direction>(&[None, None]), 0.0);
        assert_abs_diff_eq!(average_run_length(&[FLAT]), 1.0);
    }

    #[test]
    fn test_target_stats() {
        let stats = TargetStats::of(&[DOWN, DOWN, None, UP]);
        assert_eq!(stats.summary.count, 3);
        assert_abs_diff_eq!(stats.average_run_length, 1.5);
    }
}
