//! Indicator engine.
//!
//! Turns a price series into a per-bar [`IndicatorFrame`] (EMAs, true range,
//! ATR, directional movement, DI, DX, ADX, relative volume) and exposes the
//! latest row as an [`IndicatorSnapshot`]. Everything is recomputed from
//! scratch on every call.

pub mod directional;
pub mod ema;

use chrono::NaiveDate;
use std::fmt;

use crate::domain::error::SwingError;
use crate::domain::indicator_helpers::{guarded_ratio, rolling_mean, true_range_series};
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::PriceSeries;

pub const EMA_FAST: usize = 9;
pub const EMA_MID: usize = 21;
pub const EMA_SLOW: usize = 50;
/// Window for ATR, DI and ADX means.
pub const DI_PERIOD: usize = 14;
pub const VOLUME_PERIOD: usize = 20;
/// Shortest series that yields a usable snapshot.
pub const MIN_BARS: usize = 50;

/// Every derived value for one bar.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: i64,
    pub ema9: f64,
    pub ema21: f64,
    pub ema50: f64,
    pub tr: f64,
    pub atr: f64,
    pub plus_dm: f64,
    pub minus_dm: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub dx: f64,
    pub adx: f64,
    pub volume_mean: f64,
    pub rvol: f64,
}

#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        self.rows.last().map(IndicatorSnapshot::from)
    }

    /// The last `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[IndicatorRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }
}

/// Technical state at the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub ema9: f64,
    pub ema21: f64,
    pub ema50: f64,
    pub atr: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub adx: f64,
    pub rvol: f64,
    pub current_price: f64,
}

impl IndicatorSnapshot {
    /// ema9 > ema21 > ema50
    pub fn ema_aligned(&self) -> bool {
        self.ema9 > self.ema21 && self.ema21 > self.ema50
    }

    pub fn price_above_ema9(&self) -> bool {
        self.current_price > self.ema9
    }

    /// True when no field the decision rules read is NaN.
    pub fn is_complete(&self) -> bool {
        [
            self.ema9,
            self.ema21,
            self.ema50,
            self.atr,
            self.plus_di,
            self.minus_di,
            self.adx,
            self.rvol,
            self.current_price,
        ]
        .iter()
        .all(|v| !v.is_nan())
    }
}

impl From<&IndicatorRow> for IndicatorSnapshot {
    fn from(row: &IndicatorRow) -> Self {
        Self {
            date: row.date,
            ema9: row.ema9,
            ema21: row.ema21,
            ema50: row.ema50,
            atr: row.atr,
            plus_di: row.plus_di,
            minus_di: row.minus_di,
            adx: row.adx,
            rvol: row.rvol,
            current_price: row.close,
        }
    }
}

impl fmt::Display for IndicatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} close={:.2} ema9={:.2} ema21={:.2} ema50={:.2} atr={:.2} +di={:.1} -di={:.1} adx={:.1} rvol={:.2}",
            self.date,
            self.current_price,
            self.ema9,
            self.ema21,
            self.ema50,
            self.atr,
            self.plus_di,
            self.minus_di,
            self.adx,
            self.rvol,
        )
    }
}

/// Result of running the engine over a well-formed series.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    Snapshot(IndicatorSnapshot),
    InsufficientData { bars: usize, minimum: usize },
}

impl SnapshotOutcome {
    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        match self {
            SnapshotOutcome::Snapshot(s) => Some(s),
            SnapshotOutcome::InsufficientData { .. } => None,
        }
    }

    /// Outcome for a ticker whose price data could not be fetched at all.
    pub fn no_data() -> Self {
        SnapshotOutcome::InsufficientData {
            bars: 0,
            minimum: MIN_BARS,
        }
    }
}

/// Validates `bars` and computes every indicator row.
///
/// Works on series of any length; rows whose warm-up has not elapsed hold NaN.
pub fn compute_frame(bars: Vec<PriceBar>) -> Result<IndicatorFrame, SwingError> {
    let series = PriceSeries::new(bars)?;
    Ok(frame_from_series(&series))
}

/// Validates `bars` and returns the snapshot at the last bar, or
/// `InsufficientData` when fewer than [`MIN_BARS`] bars are available.
pub fn compute_snapshot(bars: Vec<PriceBar>) -> Result<SnapshotOutcome, SwingError> {
    let series = PriceSeries::new(bars)?;
    if series.len() < MIN_BARS {
        return Ok(SnapshotOutcome::InsufficientData {
            bars: series.len(),
            minimum: MIN_BARS,
        });
    }

    let frame = frame_from_series(&series);
    match frame.latest() {
        Some(snapshot) => {
            tracing::debug!(%snapshot, "computed indicator snapshot");
            Ok(SnapshotOutcome::Snapshot(snapshot))
        }
        None => Ok(SnapshotOutcome::no_data()),
    }
}

fn frame_from_series(series: &PriceSeries) -> IndicatorFrame {
    let bars = series.bars();
    let closes = series.closes();

    let ema9 = ema::calculate_ema(&closes, EMA_FAST);
    let ema21 = ema::calculate_ema(&closes, EMA_MID);
    let ema50 = ema::calculate_ema(&closes, EMA_SLOW);

    let tr = true_range_series(bars);
    let atr = rolling_mean(&tr, DI_PERIOD);

    let (plus_dm, minus_dm) = directional::directional_movement(bars);
    let plus_di = directional::directional_indicator(&plus_dm, &atr, DI_PERIOD);
    let minus_di = directional::directional_indicator(&minus_dm, &atr, DI_PERIOD);
    let dx = directional::dx_series(&plus_di, &minus_di);
    let adx = directional::adx_series(&dx, DI_PERIOD);

    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    let volume_mean = rolling_mean(&volumes, VOLUME_PERIOD);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            volume: bar.volume,
            ema9: ema9[i],
            ema21: ema21[i],
            ema50: ema50[i],
            tr: tr[i],
            atr: atr[i],
            plus_dm: plus_dm[i],
            minus_dm: minus_dm[i],
            plus_di: plus_di[i],
            minus_di: minus_di[i],
            dx: dx[i],
            adx: adx[i],
            volume_mean: volume_mean[i],
            rvol: guarded_ratio(volumes[i], volume_mean[i]),
        })
        .collect();

    IndicatorFrame { rows }
}
