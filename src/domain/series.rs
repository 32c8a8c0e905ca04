//! Validated, date-ordered price series.
//!
//! Callers are expected to hand bars over in ascending date order, but not
//! every data source does, so [`PriceSeries::new`] sorts before validating.
//! Anything still malformed after the sort is a [`SwingError::Data`].

use crate::domain::error::SwingError;
use crate::domain::ohlcv::PriceBar;

#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<PriceBar>) -> Result<Self, SwingError> {
        bars.sort_by_key(|b| b.date);

        for (i, bar) in bars.iter().enumerate() {
            validate_bar(bar)?;
            if i > 0 && bars[i - 1].date == bar.date {
                return Err(SwingError::data(format!(
                    "duplicate bar for {}",
                    bar.date
                )));
            }
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

fn validate_bar(bar: &PriceBar) -> Result<(), SwingError> {
    let prices = [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
    ];
    for (name, value) in prices {
        if !value.is_finite() || value <= 0.0 {
            return Err(SwingError::data(format!(
                "non-positive {} ({}) on {}",
                name, value, bar.date
            )));
        }
    }

    if bar.high < bar.open.max(bar.close).max(bar.low) {
        return Err(SwingError::data(format!(
            "high {} below open/close/low on {}",
            bar.high, bar.date
        )));
    }
    if bar.low > bar.open.min(bar.close).min(bar.high) {
        return Err(SwingError::data(format!(
            "low {} above open/close/high on {}",
            bar.low, bar.date
        )));
    }

    if bar.volume < 0 {
        return Err(SwingError::data(format!(
            "negative volume ({}) on {}",
            bar.volume, bar.date
        )));
    }

    Ok(())
}
