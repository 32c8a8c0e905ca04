//! Fundamentals screen: sector-relative debt and valuation checks.
//!
//! Sector names are matched after trimming and case-folding; anything
//! unknown (or missing) falls back to the `default` entry.

use serde::Deserialize;

pub const DEFAULT_SECTOR: &str = "default";

/// Debt-to-equity assumed when the provider omits it.
pub const MISSING_DEBT_TO_EQUITY: f64 = 0.0;
/// Trailing P/E assumed when the provider omits it.
pub const MISSING_TRAILING_PE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorThresholds {
    pub debt_equity_max: f64,
    pub pe_max: f64,
}

impl SectorThresholds {
    pub const fn new(debt_equity_max: f64, pe_max: f64) -> Self {
        Self {
            debt_equity_max,
            pe_max,
        }
    }
}

const BUILTIN_SECTORS: &[(&str, SectorThresholds)] = &[
    ("Technology", SectorThresholds::new(0.5, 35.0)),
    ("Software", SectorThresholds::new(0.6, 50.0)),
    ("Semiconductors", SectorThresholds::new(0.7, 30.0)),
    ("Banking", SectorThresholds::new(10.0, 15.0)),
    ("Financial Services", SectorThresholds::new(3.0, 30.0)),
    ("Insurance", SectorThresholds::new(0.9, 18.0)),
    ("Pharmaceuticals", SectorThresholds::new(0.8, 25.0)),
    ("Biotechnology", SectorThresholds::new(1.0, 50.0)),
    ("Healthcare", SectorThresholds::new(0.7, 30.0)),
    ("Automobile", SectorThresholds::new(1.5, 12.0)),
    ("Consumer Durables", SectorThresholds::new(1.0, 20.0)),
    ("Retail", SectorThresholds::new(1.2, 18.0)),
    ("Construction", SectorThresholds::new(2.0, 10.0)),
    ("Metals & Mining", SectorThresholds::new(1.8, 8.0)),
    ("Oil & Gas", SectorThresholds::new(1.5, 10.0)),
    ("Utilities", SectorThresholds::new(2.5, 18.0)),
    ("Telecom", SectorThresholds::new(2.2, 15.0)),
    ("FMCG", SectorThresholds::new(0.8, 25.0)),
];

const BUILTIN_DEFAULT: SectorThresholds = SectorThresholds::new(0.8, 25.0);

pub fn normalize_sector(sector: &str) -> String {
    sector.trim().to_lowercase()
}

/// Ordered sector → threshold mapping with a named fallback entry.
#[derive(Debug, Clone)]
pub struct SectorTable {
    entries: Vec<(String, SectorThresholds)>,
    default: SectorThresholds,
}

impl Default for SectorTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_SECTORS
                .iter()
                .map(|(name, t)| (normalize_sector(name), *t))
                .collect(),
            default: BUILTIN_DEFAULT,
        }
    }
}

impl SectorTable {
    pub fn empty(default: SectorThresholds) -> Self {
        Self {
            entries: Vec::new(),
            default,
        }
    }

    /// Inserts or replaces an entry. The name `default` replaces the fallback.
    pub fn set(&mut self, sector: &str, thresholds: SectorThresholds) {
        let key = normalize_sector(sector);
        if key == DEFAULT_SECTOR {
            self.default = thresholds;
            return;
        }
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = thresholds,
            None => self.entries.push((key, thresholds)),
        }
    }

    /// Returns the matched (normalized) sector name and its thresholds.
    pub fn lookup(&self, sector: Option<&str>) -> (&str, SectorThresholds) {
        let key = sector.map(normalize_sector).unwrap_or_default();
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(name, t)| (name.as_str(), *t))
            .unwrap_or((DEFAULT_SECTOR, self.default))
    }

    pub fn default_thresholds(&self) -> SectorThresholds {
        self.default
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, SectorThresholds)> {
        self.entries.iter().map(|(name, t)| (name.as_str(), *t))
    }
}

/// Raw fundamentals as reported by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FundamentalsMetrics {
    pub ticker: String,
    pub sector: Option<String>,
    pub debt_to_equity: Option<f64>,
    pub trailing_pe: Option<f64>,
}

/// Pass/fail outcome of the fundamentals checks for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalsScreen {
    pub ticker: String,
    /// Sector entry that supplied the thresholds.
    pub sector: String,
    pub debt_to_equity: f64,
    pub trailing_pe: f64,
    pub thresholds: SectorThresholds,
    pub debt_ok: bool,
    pub pe_ok: bool,
}

impl FundamentalsScreen {
    pub fn passed(&self) -> bool {
        self.debt_ok && self.pe_ok
    }
}

pub fn screen(metrics: &FundamentalsMetrics, table: &SectorTable) -> FundamentalsScreen {
    let (sector, thresholds) = table.lookup(metrics.sector.as_deref());
    let debt_to_equity = metrics.debt_to_equity.unwrap_or(MISSING_DEBT_TO_EQUITY);
    let trailing_pe = metrics.trailing_pe.unwrap_or(MISSING_TRAILING_PE);

    FundamentalsScreen {
        ticker: metrics.ticker.clone(),
        sector: sector.to_string(),
        debt_to_equity,
        trailing_pe,
        thresholds,
        debt_ok: debt_to_equity < thresholds.debt_equity_max,
        pe_ok: trailing_pe < thresholds.pe_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(sector: Option<&str>, de: Option<f64>, pe: Option<f64>) -> FundamentalsMetrics {
        FundamentalsMetrics {
            ticker: "INFY".into(),
            sector: sector.map(String::from),
            debt_to_equity: de,
            trailing_pe: pe,
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = SectorTable::default();
        let (name, t) = table.lookup(Some("  BANKING "));
        assert_eq!(name, "banking");
        assert_eq!(t, SectorThresholds::new(10.0, 15.0));
    }

    #[test]
    fn lookup_unknown_falls_back_to_default() {
        let table = SectorTable::default();
        let (name, t) = table.lookup(Some("Shipping"));
        assert_eq!(name, DEFAULT_SECTOR);
        assert_eq!(t, BUILTIN_DEFAULT);
    }

    #[test]
    fn lookup_missing_sector_uses_default() {
        let table = SectorTable::default();
        assert_eq!(table.lookup(None).0, DEFAULT_SECTOR);
    }

    #[test]
    fn set_overrides_and_adds() {
        let mut table = SectorTable::default();
        table.set("Banking", SectorThresholds::new(8.0, 12.0));
        table.set("Shipping", SectorThresholds::new(1.1, 9.0));
        assert_eq!(table.lookup(Some("banking")).1, SectorThresholds::new(8.0, 12.0));
        assert_eq!(table.lookup(Some("SHIPPING")).1, SectorThresholds::new(1.1, 9.0));
        assert_eq!(table.entries().count(), BUILTIN_SECTORS.len() + 1);
    }

    #[test]
    fn set_default_replaces_fallback() {
        let mut table = SectorTable::empty(SectorThresholds::new(1.0, 1.0));
        table.set("Default", SectorThresholds::new(2.0, 30.0));
        assert_eq!(table.default_thresholds(), SectorThresholds::new(2.0, 30.0));
        assert_eq!(table.entries().count(), 0);
    }

    #[test]
    fn screen_passes_within_thresholds() {
        let table = SectorTable::default();
        let s = screen(&metrics(Some("Technology"), Some(0.2), Some(28.0)), &table);
        assert!(s.debt_ok);
        assert!(s.pe_ok);
        assert!(s.passed());
        assert_eq!(s.sector, "technology");
    }

    #[test]
    fn screen_thresholds_are_strict() {
        let table = SectorTable::default();
        let s = screen(&metrics(Some("Technology"), Some(0.5), Some(35.0)), &table);
        assert!(!s.debt_ok);
        assert!(!s.pe_ok);
    }

    #[test]
    fn screen_missing_values_use_provider_defaults() {
        let table = SectorTable::default();
        let s = screen(&metrics(None, None, None), &table);
        assert_eq!(s.debt_to_equity, MISSING_DEBT_TO_EQUITY);
        assert_eq!(s.trailing_pe, MISSING_TRAILING_PE);
        assert!(s.debt_ok);
        // default pe_max is 25, so a missing P/E fails
        assert!(!s.pe_ok);
    }

    #[test]
    fn screen_high_debt_fails() {
        let table = SectorTable::default();
        let s = screen(&metrics(Some("Retail"), Some(3.4), Some(10.0)), &table);
        assert!(!s.debt_ok);
        assert!(s.pe_ok);
        assert!(!s.passed());
    }
}
