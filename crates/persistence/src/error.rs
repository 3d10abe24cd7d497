//! Errors raised while talking to the hosted backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// Base URL or key missing; only single-row reads report it.
    #[error("database not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Row not found")]
    NotFound,
}

impl DataError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        DataError::Decode(err.to_string())
    }

    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        DataError::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::decode(err)
    }
}
