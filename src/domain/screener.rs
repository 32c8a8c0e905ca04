//! Watchlist screening pipeline.
//!
//! For each ticker: fundamentals screen, then (only if it passed) price fetch
//! and indicator snapshot, then the decision rules. A failed or empty fetch
//! counts as missing data and ends in a REJECT; malformed price data is
//! returned as an error for that ticker.

use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use crate::domain::decision::{self, Decision, EvaluatorConfig};
use crate::domain::error::SwingError;
use crate::domain::fundamentals::{self, FundamentalsScreen, SectorTable};
use crate::domain::indicator::{self, SnapshotOutcome};
use crate::ports::data_port::DataPort;
use crate::ports::fundamentals_port::FundamentalsPort;

pub const DEFAULT_LOOKBACK_DAYS: u64 = 100;

/// Everything produced while evaluating one ticker.
#[derive(Debug, Clone)]
pub struct TickerEvaluation {
    pub fundamentals: Option<FundamentalsScreen>,
    /// `None` when the fundamentals screen short-circuited the evaluation.
    pub technicals: Option<SnapshotOutcome>,
    pub decision: Decision,
}

pub struct Screener<'a> {
    data_port: &'a dyn DataPort,
    fundamentals_port: &'a dyn FundamentalsPort,
    sectors: SectorTable,
    config: EvaluatorConfig,
    lookback_days: u64,
}

impl<'a> Screener<'a> {
    pub fn new(
        data_port: &'a dyn DataPort,
        fundamentals_port: &'a dyn FundamentalsPort,
        sectors: SectorTable,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            data_port,
            fundamentals_port,
            sectors,
            config,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, days: u64) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn evaluate_ticker(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<TickerEvaluation, SwingError> {
        let screen = self.screen_fundamentals(ticker);

        if !screen.as_ref().is_some_and(FundamentalsScreen::passed) {
            let decision = decision::evaluate(
                ticker,
                screen.as_ref(),
                &SnapshotOutcome::no_data(),
                &self.config,
            );
            return Ok(TickerEvaluation {
                fundamentals: screen,
                technicals: None,
                decision,
            });
        }

        let outcome = self.technicals(ticker, as_of)?;
        let decision = decision::evaluate(ticker, screen.as_ref(), &outcome, &self.config);

        Ok(TickerEvaluation {
            fundamentals: screen,
            technicals: Some(outcome),
            decision,
        })
    }

    /// Evaluates every ticker; one ticker's failure does not stop the rest.
    pub fn evaluate_watchlist(
        &self,
        tickers: &[String],
        as_of: NaiveDate,
    ) -> Vec<(String, Result<TickerEvaluation, SwingError>)> {
        info!(count = tickers.len(), %as_of, "screening watchlist");
        tickers
            .iter()
            .map(|ticker| {
                let result = self.evaluate_ticker(ticker, as_of);
                if let Err(e) = &result {
                    warn!(%ticker, error = %e, "evaluation failed");
                }
                (ticker.clone(), result)
            })
            .collect()
    }

    fn screen_fundamentals(&self, ticker: &str) -> Option<FundamentalsScreen> {
        match self.fundamentals_port.fetch_fundamentals(ticker) {
            Ok(Some(metrics)) => Some(fundamentals::screen(&metrics, &self.sectors)),
            Ok(None) => {
                warn!(%ticker, "no fundamentals on record");
                None
            }
            Err(e) => {
                warn!(%ticker, error = %e, "fundamentals fetch failed");
                None
            }
        }
    }

    fn technicals(&self, ticker: &str, as_of: NaiveDate) -> Result<SnapshotOutcome, SwingError> {
        let start = as_of
            .checked_sub_days(Days::new(self.lookback_days))
            .unwrap_or(NaiveDate::MIN);

        match self.data_port.fetch_series(ticker, start, as_of) {
            Ok(bars) => indicator::compute_snapshot(bars),
            Err(e) => {
                warn!(%ticker, error = %e, "price fetch failed");
                Ok(SnapshotOutcome::no_data())
            }
        }
    }
}
