//! Error types for the ticker poller

use thiserror::Error;

/// Errors that can occur when fetching a ticker snapshot
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with something other than 200 OK
    #[error("{status}")]
    HttpStatus { status: u16 },

    /// Body was not a ticker document
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Creates an HttpStatus error
    pub fn http_status(status: u16) -> Self {
        Self::HttpStatus { status }
    }

    /// Creates a Decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Short machine-friendly label used in logs and events
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Decode(_) => "decode",
        }
    }
}

/// Errors that can occur when summarizing a snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    /// Snapshot carried no currencies
    #[error("No buy prices in snapshot, statistics skipped")]
    EmptySnapshot,
}
