//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod indicator;
pub mod indicator_helpers;
pub mod fundamentals;
pub mod decision;
pub mod screener;
pub mod watchlist;
pub mod config_validation;
pub mod error;
