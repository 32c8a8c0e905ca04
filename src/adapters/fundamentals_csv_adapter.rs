//! CSV fundamentals adapter.
//!
//! A single file with header `ticker,sector,debt_to_equity,trailing_pe`.
//! Empty cells are missing values.

use crate::domain::error::SwingError;
use crate::domain::fundamentals::FundamentalsMetrics;
use crate::ports::fundamentals_port::FundamentalsPort;
use std::collections::HashMap;
use std::path::Path;

pub struct FundamentalsCsvAdapter {
    by_ticker: HashMap<String, FundamentalsMetrics>,
}

impl FundamentalsCsvAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SwingError> {
        let path = path.as_ref();
        let rdr = csv::Reader::from_path(path).map_err(|e| SwingError::Fetch {
            ticker: "*".into(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_reader(rdr)
    }

    pub fn from_string(content: &str) -> Result<Self, SwingError> {
        Self::from_reader(csv::Reader::from_reader(content.as_bytes()))
    }

    fn from_reader<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, SwingError> {
        let mut by_ticker = HashMap::new();
        for row in rdr.deserialize::<FundamentalsMetrics>() {
            let mut metrics = row.map_err(|e| SwingError::Fetch {
                ticker: "*".into(),
                reason: format!("fundamentals CSV parse error: {}", e),
            })?;
            metrics.ticker = metrics.ticker.trim().to_uppercase();
            metrics.sector = metrics.sector.filter(|s| !s.trim().is_empty());
            by_ticker.insert(metrics.ticker.clone(), metrics);
        }
        Ok(Self { by_ticker })
    }

    pub fn len(&self) -> usize {
        self.by_ticker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ticker.is_empty()
    }
}

impl FundamentalsPort for FundamentalsCsvAdapter {
    fn fetch_fundamentals(
        &self,
        ticker: &str,
    ) -> Result<Option<FundamentalsMetrics>, SwingError> {
        Ok(self.by_ticker.get(&ticker.to_uppercase()).cloned())
    }
}
