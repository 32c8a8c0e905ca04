//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One trading session as delivered by the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// Upward and downward raw moves relative to the previous bar:
    /// `(high - prev.high, prev.low - low)`.
    pub fn directional_moves(&self, prev: &PriceBar) -> (f64, f64) {
        (self.high - prev.high, prev.low - self.low)
    }
}
