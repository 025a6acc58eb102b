//! Error types for failure handling across the lookup pipeline
//!
//! Every failure a search session can run into is funneled through one enum
//! so the presentation layer has a single message field to render. Errors are
//! categorized by their source (local validation, transport, decoding,
//! configuration) and none of them are fatal: the session stays interactive
//! after any of these is surfaced.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinseekError {
    #[error("{0}")]
    InvalidPincode(String),
    #[error("Lookup request failed: {0}")]
    NetworkError(String),
    #[error("Failed to decode lookup response: {0}")]
    ParseError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for PinseekError {
    fn from(err: std::io::Error) -> Self {
        PinseekError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for PinseekError {
    fn from(err: reqwest::Error) -> Self {
        PinseekError::NetworkError(err.to_string())
    }
}
