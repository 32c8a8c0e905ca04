//! CSV file price data adapter.
//!
//! One file per ticker, `<base_path>/<TICKER>.csv`, with header
//! `date,open,high,low,close,volume`.

use crate::domain::error::SwingError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn field<T>(record: &csv::StringRecord, index: usize, name: &str, ticker: &str) -> Result<T, SwingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| SwingError::Fetch {
        ticker: ticker.to_string(),
        reason: format!("missing {} column", name),
    })?;
    raw.trim().parse().map_err(|e| SwingError::Fetch {
        ticker: ticker.to_string(),
        reason: format!("invalid {} value {:?}: {}", name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, SwingError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| SwingError::Fetch {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SwingError::Fetch {
                ticker: ticker.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str: String = field(&record, 0, "date", ticker)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                SwingError::Fetch {
                    ticker: ticker.to_string(),
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(PriceBar {
                date,
                open: field(&record, 1, "open", ticker)?,
                high: field(&record, 2, "high", ticker)?,
                low: field(&record, 3, "low", ticker)?,
                close: field(&record, 4, "close", ticker)?,
                volume: field(&record, 5, "volume", ticker)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";

        fs::write(path.join("RELIANCE.csv"), csv_content).unwrap();
        fs::write(
            path.join("BROKEN.csv"),
            "date,open,high,low,close,volume\n2024-01-15,abc,110.0,90.0,105.0,50000\n",
        )
        .unwrap();

        (dir, path)
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn fetch_series_returns_sorted_bars() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_series("RELIANCE", jan(15), jan(17)).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, jan(15));
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000);
        assert_eq!(bars[2].date, jan(17));
    }

    #[test]
    fn fetch_series_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_series("RELIANCE", jan(16), jan(16)).unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, jan(16));
    }

    #[test]
    fn fetch_series_errors_for_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_series("XYZ", jan(1), jan(31));
        assert!(matches!(result, Err(SwingError::Fetch { ticker, .. }) if ticker == "XYZ"));
    }

    #[test]
    fn fetch_series_errors_for_bad_number() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_series("BROKEN", jan(1), jan(31)).unwrap_err();
        assert!(err.to_string().contains("invalid open value"));
    }
}
