//! Domain error types.

use crate::domain::watchlist::WatchlistError;

/// Top-level error type for swingscreen.
///
/// A series that is merely too short is not an error: it is reported as
/// [`SnapshotOutcome::InsufficientData`](crate::domain::indicator::SnapshotOutcome).
#[derive(Debug, thiserror::Error)]
pub enum SwingError {
    #[error("malformed price data: {reason}")]
    Data { reason: String },

    #[error("fetch failed for {ticker}: {reason}")]
    Fetch { ticker: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SwingError {
    pub(crate) fn data(reason: impl Into<String>) -> Self {
        SwingError::Data {
            reason: reason.into(),
        }
    }
}

impl From<&SwingError> for std::process::ExitCode {
    fn from(err: &SwingError) -> Self {
        let code: u8 = match err {
            SwingError::Io(_) => 1,
            SwingError::ConfigParse { .. }
            | SwingError::ConfigMissing { .. }
            | SwingError::ConfigInvalid { .. } => 2,
            SwingError::Fetch { .. } => 3,
            SwingError::Watchlist(_) => 4,
            SwingError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
