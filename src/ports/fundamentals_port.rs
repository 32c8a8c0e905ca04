//! Fundamentals access port.

use crate::domain::error::SwingError;
use crate::domain::fundamentals::FundamentalsMetrics;

pub trait FundamentalsPort {
    /// `Ok(None)` when the provider has no record for `ticker`.
    fn fetch_fundamentals(&self, ticker: &str)
    -> Result<Option<FundamentalsMetrics>, SwingError>;
}
