#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use swingscreen::domain::error::SwingError;
use swingscreen::domain::fundamentals::FundamentalsMetrics;
pub use swingscreen::domain::ohlcv::PriceBar;
use swingscreen::ports::data_port::DataPort;
use swingscreen::ports::fundamentals_port::FundamentalsPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        ticker: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, SwingError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(SwingError::Fetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub struct MockFundamentalsPort {
    pub data: HashMap<String, FundamentalsMetrics>,
}

impl MockFundamentalsPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_metrics(
        mut self,
        ticker: &str,
        sector: &str,
        debt_to_equity: f64,
        trailing_pe: f64,
    ) -> Self {
        self.data.insert(
            ticker.to_string(),
            FundamentalsMetrics {
                ticker: ticker.to_string(),
                sector: Some(sector.to_string()),
                debt_to_equity: Some(debt_to_equity),
                trailing_pe: Some(trailing_pe),
            },
        );
        self
    }
}

impl FundamentalsPort for MockFundamentalsPort {
    fn fetch_fundamentals(
        &self,
        ticker: &str,
    ) -> Result<Option<FundamentalsMetrics>, SwingError> {
        Ok(self.data.get(ticker).cloned())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn start_date() -> NaiveDate {
    date(2024, 1, 1)
}

/// Bar with a two-point range centred on `close`.
pub fn make_bar(day: usize, close: f64, volume: i64) -> PriceBar {
    PriceBar {
        date: start_date() + Days::new(day as u64),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume,
    }
}

/// Uptrend that steps +1.3 then -0.7. Settles at ADX 30 with +DI above -DI
/// and the EMAs stacked. The last bar's volume is `last_volume`, all others
/// trade 900.
pub fn zigzag_uptrend(count: usize, last_volume: i64) -> Vec<PriceBar> {
    let mut close = 100.0;
    (0..count)
        .map(|i| {
            if i > 0 {
                close += if i % 2 == 1 { 1.3 } else { -0.7 };
            }
            let volume = if i + 1 == count { last_volume } else { 900 };
            make_bar(i, close, volume)
        })
        .collect()
}

/// Flip-flops between two fixed bars; +DI and -DI stay equal, so ADX is 0.
pub fn sideways(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let close = if i % 2 == 0 { 101.0 } else { 99.0 };
            make_bar(i, close, 900)
        })
        .collect()
}

pub fn last_date(bars: &[PriceBar]) -> NaiveDate {
    bars.last().map(|b| b.date).unwrap_or_else(start_date)
}
