//! Directional movement, directional indicators, and ADX.
//!
//! All averages here are simple rolling means over [`DI_PERIOD`] bars, not
//! Wilder smoothing.
//!
//! [`DI_PERIOD`]: super::DI_PERIOD

use crate::domain::indicator_helpers::{guarded_ratio, rolling_mean};
use crate::domain::ohlcv::PriceBar;

/// Parallel +DM / -DM series.
///
/// At most one of the two is non-zero on any bar. Equal up and down moves
/// cancel to 0/0. Bar 0 has no previous bar and is NaN in both.
pub fn directional_movement(bars: &[PriceBar]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = Vec::with_capacity(bars.len());
    let mut minus_dm = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            plus_dm.push(f64::NAN);
            minus_dm.push(f64::NAN);
            continue;
        }

        let (up, down) = bar.directional_moves(&bars[i - 1]);
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    (plus_dm, minus_dm)
}

/// `100 * mean(dm) / atr` per bar; NaN where the ATR is NaN or zero.
pub fn directional_indicator(dm: &[f64], atr: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(dm, period)
        .iter()
        .zip(atr)
        .map(|(&mean_dm, &atr)| 100.0 * guarded_ratio(mean_dm, atr))
        .collect()
}

/// DX = 100 * |+DI - -DI| / (+DI + -DI).
///
/// A zero DI sum means no directional movement at all and yields 0.
pub fn directional_index(plus_di: f64, minus_di: f64) -> f64 {
    if plus_di.is_nan() || minus_di.is_nan() {
        return f64::NAN;
    }
    let sum = plus_di + minus_di;
    if sum == 0.0 {
        return 0.0;
    }
    100.0 * (plus_di - minus_di).abs() / sum
}

pub fn dx_series(plus_di: &[f64], minus_di: &[f64]) -> Vec<f64> {
    plus_di
        .iter()
        .zip(minus_di)
        .map(|(&p, &m)| directional_index(p, m))
        .collect()
}

pub fn adx_series(dx: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(dx, period)
}
