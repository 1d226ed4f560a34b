//! First-touch barrier label.

use labelbar_types::{Bar, Direction};

/// Computes the first-touch label for every bar.
///
/// For bar `i` the entry price is `close[i]`. The next `horizon` bars are
/// scanned in order; the first bar whose high reaches
/// `entry + threshold` yields [`Direction::Up`], the first whose low
/// reaches `entry - threshold` yields [`Direction::Down`]. The upper
/// barrier is checked first, so a bar touching both counts as up. If no
/// bar touches either barrier the label is [`Direction::Flat`].
///
/// The label is `None` when fewer than `horizon` bars follow `i` or when
/// the entry close is not finite. A NaN high or low inside the window
/// simply never touches its barrier.
#[must_use]
pub fn first_touch(bars: &[Bar], horizon: usize, threshold: f64) -> Vec<Option<Direction>> {
    (0..bars.len())
        .map(|i| touch_at(bars, i, horizon, threshold))
        .collect()
}

fn touch_at(bars: &[Bar], i: usize, horizon: usize, threshold: f64) -> Option<Direction> {
    let last = i.checked_add(horizon)?;
    if last >= bars.len() {
        return None;
    }

    let entry = bars[i].close;
    if !entry.is_finite() {
        return None;
    }

    let upper = entry + threshold;
    let lower = entry - threshold;
    for bar in &bars[i + 1..=last] {
        if bar.high >= upper {
            return Some(Direction::Up);
        }
        if bar.low <= lower {
            return Some(Direction::Down);
        }
    }
    Some(Direction::Flat)
}
