//! Close-to-close trend label.

use labelbar_types::{Bar, Direction};

/// Computes `sign(close[i + horizon] - close[i])` for every bar.
///
/// A zero difference is [`Direction::Flat`]. The label is `None` past the
/// end of the series or when either close is NaN.
#[must_use]
pub fn trend(bars: &[Bar], horizon: usize) -> Vec<Option<Direction>> {
    (0..bars.len())
        .map(|i| {
            let later = bars.get(i.checked_add(horizon)?)?;
            Direction::from_sign(later.close - bars[i].close)
        })
        .collect()
}
