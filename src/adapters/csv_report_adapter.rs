//! CSV decision export.
//!
//! Numbers are rounded to two decimals; risk columns are blank for non-BUY
//! rows.

use crate::domain::decision::{Decision, DecisionKind, RiskLevels};
use crate::domain::error::SwingError;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct DecisionRecord<'a> {
    ticker: &'a str,
    decision: DecisionKind,
    reason: &'a str,
    entry: Option<f64>,
    stop_loss: Option<f64>,
    target: Option<f64>,
    adx: Option<f64>,
    rvol: Option<f64>,
    atr: Option<f64>,
    risk_reward: Option<f64>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl<'a> From<&'a Decision> for DecisionRecord<'a> {
    fn from(d: &'a Decision) -> Self {
        let level = |f: fn(&RiskLevels) -> f64| {
            d.levels.as_ref().map(|l| round2(f(l)))
        };
        Self {
            ticker: &d.ticker,
            decision: d.kind,
            reason: &d.reason,
            entry: level(|l| l.entry),
            stop_loss: level(|l| l.stop_loss),
            target: level(|l| l.target),
            adx: level(|l| l.adx),
            rvol: level(|l| l.rvol),
            atr: level(|l| l.atr),
            risk_reward: level(|l| l.risk_reward),
        }
    }
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn write_to<W: std::io::Write>(decisions: &[Decision], out: W) -> Result<(), SwingError> {
        let mut wtr = csv::Writer::from_writer(out);
        for d in decisions {
            wtr.serialize(DecisionRecord::from(d))
                .map_err(|e| SwingError::Io(std::io::Error::other(e)))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, decisions: &[Decision], output_path: &Path) -> Result<(), SwingError> {
        let file = std::fs::File::create(output_path)?;
        Self::write_to(decisions, file)
    }
}
