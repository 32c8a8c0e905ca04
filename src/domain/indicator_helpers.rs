//! Shared helper functions for indicator calculations.
//!
//! Every series produced here has the same length as its input. Positions
//! that are not yet defined hold `f64::NAN`, and NaN is contagious through
//! the rolling windows.

use crate::domain::ohlcv::PriceBar;

/// Simple (unweighted) rolling mean over a fixed window.
///
/// The first `window - 1` positions are NaN, as is any position whose window
/// contains a NaN.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for i in (window - 1)..values.len() {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        out[i] = sum / window as f64;
    }

    out
}

/// Per-bar true range. Bar 0 has no previous close and is NaN.
pub fn true_range_series(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                f64::NAN
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

/// `numerator / denominator`, or NaN when the denominator is NaN or zero.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.is_nan() || denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}
