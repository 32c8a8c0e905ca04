//! Watchlist parsing.

use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("watchlist is empty")]
    Empty,
}

/// Parses a comma-separated ticker list, upper-casing each entry.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, WatchlistError> {
    if input.trim().is_empty() {
        return Err(WatchlistError::Empty);
    }

    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(WatchlistError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(WatchlistError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        let result = parse_tickers("RELIANCE,TATASTEEL,HDFCBANK").unwrap();
        assert_eq!(result, vec!["RELIANCE", "TATASTEEL", "HDFCBANK"]);
    }

    #[test]
    fn parse_with_whitespace() {
        let result = parse_tickers("  INFY , TCS ,WIPRO").unwrap();
        assert_eq!(result, vec!["INFY", "TCS", "WIPRO"]);
    }

    #[test]
    fn parse_uppercases() {
        let result = parse_tickers("infy,tcs").unwrap();
        assert_eq!(result, vec!["INFY", "TCS"]);
    }

    #[test]
    fn parse_single() {
        assert_eq!(parse_tickers("INFY").unwrap(), vec!["INFY"]);
    }

    #[test]
    fn parse_empty_token() {
        let result = parse_tickers("INFY,,TCS");
        assert!(matches!(result, Err(WatchlistError::EmptyToken)));
    }

    #[test]
    fn parse_duplicate_is_case_insensitive() {
        let result = parse_tickers("INFY,TCS,infy");
        assert!(matches!(result, Err(WatchlistError::DuplicateTicker(s)) if s == "INFY"));
    }

    #[test]
    fn parse_blank_input() {
        assert!(matches!(parse_tickers("   "), Err(WatchlistError::Empty)));
    }
}
