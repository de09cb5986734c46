use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteError>;

/// Failures surfaced by quoting, planning and the token registry.
///
/// Quoting never returns `NoLiquidityRoute`: an empty pool is a zero quote.
/// `Network` means the answer could not be determined at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("no liquidity route for the requested pair")]
    NoLiquidityRoute,

    #[error("token storage error: {0}")]
    Persistence(String),
}

impl QuoteError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    // context names the read that failed, e.g. "getPair"
    pub fn network(context: &str, err: impl Display) -> Self {
        Self::Network(format!("{context}: {err}"))
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Short message for end users, without transport details.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid input",
            Self::Network(_) => "Network error, try again",
            Self::NoLiquidityRoute => "No market for this pair",
            Self::Persistence(_) => "Could not save token list",
        }
    }
}

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
