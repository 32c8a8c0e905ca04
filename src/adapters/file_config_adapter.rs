//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn sections(&self) -> Vec<String> {
        self.config.sections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[data]
prices_dir = ./data/prices
fundamentals = ./data/fundamentals.csv
lookback_days = 120

[evaluator]
adx_threshold = 25
volume_threshold = 0.3

[sector:Banking]
debt_equity_max = 10
pe_max = 15
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "prices_dir"),
            Some("./data/prices".to_string())
        );
        assert_eq!(adapter.get_int("data", "lookback_days", 100), 120);
        assert_eq!(adapter.get_double("evaluator", "volume_threshold", 1.5), 0.3);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[data]\nlookback_days = soon\n").unwrap();
        assert_eq!(adapter.get_int("data", "lookback_days", 42), 42);
        assert_eq!(adapter.get_int("data", "missing", 7), 7);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[evaluator]\nadx_threshold = strong\n").unwrap();
        assert_eq!(adapter.get_double("evaluator", "adx_threshold", 25.0), 25.0);
        assert_eq!(adapter.get_double("evaluator", "missing", 99.9), 99.9);
    }

    #[test]
    fn sections_are_lowercased() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        let sections = adapter.sections();
        assert!(sections.contains(&"data".to_string()));
        assert!(sections.contains(&"sector:banking".to_string()));
        assert_eq!(adapter.get_double("sector:banking", "pe_max", 0.0), 15.0);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[watchlist]\ntickers = INFY,TCS\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("watchlist", "tickers"),
            Some("INFY,TCS".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
