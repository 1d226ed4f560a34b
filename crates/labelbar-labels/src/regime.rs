//! Forward regression slope and regime label.

use labelbar_types::Direction;

/// Ordinary-least-squares slope of `values` against positions `0..len`.
///
/// Returns `None` for fewer than two points or if any value is not finite.
#[must_use]
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;
    let (mut num, mut den) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    Some(num / den)
}

/// Computes the forward regression slope starting at every bar.
///
/// The slope at `i` fits `closes[i..i + window]` against `0..window`.
/// Bars with fewer than `window` values remaining, and windows holding a
/// non-finite value, get `None`.
///
/// Runs in O(n): the sums of `y` and `x * y` are slid along the series
/// rather than refitted per window. Values are taken relative to an
/// anchor price and the sums are rebuilt from scratch every `window`
/// steps, which keeps rounding drift well below `1e-9` on price-scale
/// inputs.
#[must_use]
pub fn rolling_slopes(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut slopes = vec![None; n];
    if window < 2 || n < window {
        return slopes;
    }

    let mut sums = WindowSums::new(window);
    for start in 0..=n - window {
        if start % window == 0 {
            sums.rebuild(&closes[start..start + window]);
        } else {
            sums.slide(closes[start - 1], closes[start + window - 1]);
        }
        slopes[start] = sums.slope();
    }
    slopes
}

/// Classifies each slope against `±threshold`; `None` stays `None`.
#[must_use]
pub fn regime(slopes: &[Option<f64>], threshold: f64) -> Vec<Option<Direction>> {
    slopes
        .iter()
        .map(|s| s.and_then(|slope| Direction::from_threshold(slope, threshold)))
        .collect()
}

/// Running sums over one regression window.
#[derive(Debug)]
struct WindowSums {
    len: f64,
    x_mean: f64,
    sxx: f64,
    anchor: f64,
    sum_y: f64,
    sum_xy: f64,
    non_finite: usize,
}

impl WindowSums {
    fn new(window: usize) -> Self {
        let len = window as f64;
        Self {
            len,
            x_mean: (len - 1.0) / 2.0,
            // Sum of (x - mean)^2 over 0..n is n(n^2 - 1)/12.
            sxx: len * (len * len - 1.0) / 12.0,
            anchor: 0.0,
            sum_y: 0.0,
            sum_xy: 0.0,
            non_finite: 0,
        }
    }

    fn rebuild(&mut self, values: &[f64]) {
        self.anchor = values.iter().copied().find(|v| v.is_finite()).unwrap_or(0.0);
        self.sum_y = 0.0;
        self.sum_xy = 0.0;
        self.non_finite = 0;
        for (x, &y) in values.iter().enumerate() {
            if !y.is_finite() {
                self.non_finite += 1;
            }
            let d = self.offset(y);
            self.sum_y += d;
            self.sum_xy += x as f64 * d;
        }
    }

    /// Drops the value at position 0 and appends one at position `len - 1`.
    fn slide(&mut self, outgoing: f64, incoming: f64) {
        if !outgoing.is_finite() {
            self.non_finite -= 1;
        }
        if !incoming.is_finite() {
            self.non_finite += 1;
        }
        let d_out = self.offset(outgoing);
        let d_in = self.offset(incoming);

        let remaining = self.sum_y - d_out;
        self.sum_xy = self.sum_xy - remaining + (self.len - 1.0) * d_in;
        self.sum_y = remaining + d_in;
    }

    /// Value relative to the anchor; non-finite values contribute zero.
    fn offset(&self, value: f64) -> f64 {
        if value.is_finite() {
            value - self.anchor
        } else {
            0.0
        }
    }

    fn slope(&self) -> Option<f64> {
        (self.non_finite == 0).then(|| (self.sum_xy - self.x_mean * self.sum_y) / self.sxx)
    }
}
