//! Decision evaluator.
//!
//! Rules are checked strictly in order and the first match wins:
//!
//! 1. Fundamentals absent or failing → REJECT "Fundamentals"
//! 2. Insufficient data or any NaN in the snapshot → REJECT "Technical data"
//! 3. ADX above threshold, +DI > -DI, EMA 9 > 21 > 50, RVOL above threshold → BUY
//! 4. ADX below the weak-trend threshold → WAIT
//! 5. Otherwise → HOLD
//!
//! Later rules rely on the guards of earlier ones: rules 3 to 5 never see a
//! NaN.

use std::fmt;

use serde::Serialize;

use crate::domain::fundamentals::FundamentalsScreen;
use crate::domain::indicator::{IndicatorSnapshot, SnapshotOutcome};

pub const REASON_FUNDAMENTALS: &str = "Fundamentals";
pub const REASON_TECHNICAL_DATA: &str = "Technical data";
pub const REASON_CONFIRMATION: &str = "Waiting for confirmation";

/// Thresholds and multiples used by the rule cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorConfig {
    /// BUY requires ADX strictly above this.
    pub adx_threshold: f64,
    /// WAIT when ADX is strictly below this.
    pub weak_trend_threshold: f64,
    /// BUY requires RVOL strictly above this.
    pub volume_threshold: f64,
    pub stop_atr_multiple: f64,
    pub target_atr_multiple: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            adx_threshold: 25.0,
            weak_trend_threshold: 20.0,
            volume_threshold: 1.5,
            stop_atr_multiple: 2.0,
            target_atr_multiple: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionKind {
    Buy,
    Hold,
    Wait,
    Reject,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionKind::Buy => "BUY",
            DecisionKind::Hold => "HOLD",
            DecisionKind::Wait => "WAIT",
            DecisionKind::Reject => "REJECT",
        };
        f.write_str(s)
    }
}

/// Entry, exit and context values attached to a BUY.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub adx: f64,
    pub rvol: f64,
    pub atr: f64,
    /// Infinite when the stop sits on the entry (zero ATR).
    pub risk_reward: f64,
}

impl RiskLevels {
    fn from_snapshot(snapshot: &IndicatorSnapshot, config: &EvaluatorConfig) -> Self {
        let entry = snapshot.current_price;
        let stop_loss = entry - config.stop_atr_multiple * snapshot.atr;
        let target = entry + config.target_atr_multiple * snapshot.atr;
        let risk = entry - stop_loss;
        let risk_reward = if risk == 0.0 {
            f64::INFINITY
        } else {
            (target - entry) / risk
        };

        Self {
            entry,
            stop_loss,
            target,
            adx: snapshot.adx,
            rvol: snapshot.rvol,
            atr: snapshot.atr,
            risk_reward,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub ticker: String,
    pub kind: DecisionKind,
    /// Empty for BUY.
    pub reason: String,
    /// Present for BUY only.
    pub levels: Option<RiskLevels>,
}

impl Decision {
    fn non_buy(ticker: &str, kind: DecisionKind, reason: impl Into<String>) -> Self {
        Self {
            ticker: ticker.to_string(),
            kind,
            reason: reason.into(),
            levels: None,
        }
    }

    pub fn reject(ticker: &str, reason: &str) -> Self {
        Self::non_buy(ticker, DecisionKind::Reject, reason)
    }

    pub fn is_buy(&self) -> bool {
        self.kind == DecisionKind::Buy
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.levels {
            Some(l) => write!(
                f,
                "{} {}: entry {:.2}, stop {:.2}, target {:.2}, R:R 1:{:.2}, ADX {:.2}, RVOL {:.2}x, ATR {:.2}",
                self.ticker,
                self.kind,
                l.entry,
                l.stop_loss,
                l.target,
                l.risk_reward,
                l.adx,
                l.rvol,
                l.atr,
            ),
            None => write!(f, "{} {}: {}", self.ticker, self.kind, self.reason),
        }
    }
}

pub fn weak_trend_reason(config: &EvaluatorConfig) -> String {
    format!("Weak trend (ADX < {})", config.weak_trend_threshold)
}

pub fn evaluate(
    ticker: &str,
    fundamentals: Option<&FundamentalsScreen>,
    outcome: &SnapshotOutcome,
    config: &EvaluatorConfig,
) -> Decision {
    let decision = match fundamentals {
        Some(f) if f.debt_ok && f.pe_ok => evaluate_technicals(ticker, outcome, config),
        _ => Decision::reject(ticker, REASON_FUNDAMENTALS),
    };
    tracing::debug!(ticker, kind = %decision.kind, reason = %decision.reason, "evaluated");
    decision
}

fn evaluate_technicals(
    ticker: &str,
    outcome: &SnapshotOutcome,
    config: &EvaluatorConfig,
) -> Decision {
    let snapshot = match outcome.snapshot() {
        Some(s) if s.is_complete() => s,
        _ => return Decision::reject(ticker, REASON_TECHNICAL_DATA),
    };

    let adx_ok = snapshot.adx > config.adx_threshold;
    let trend_up = snapshot.plus_di > snapshot.minus_di;
    let volume_ok = snapshot.rvol > config.volume_threshold;

    if adx_ok && trend_up && snapshot.ema_aligned() && volume_ok {
        return Decision {
            ticker: ticker.to_string(),
            kind: DecisionKind::Buy,
            reason: String::new(),
            levels: Some(RiskLevels::from_snapshot(snapshot, config)),
        };
    }

    if snapshot.adx < config.weak_trend_threshold {
        return Decision::non_buy(ticker, DecisionKind::Wait, weak_trend_reason(config));
    }

    Decision::non_buy(ticker, DecisionKind::Hold, REASON_CONFIRMATION)
}
