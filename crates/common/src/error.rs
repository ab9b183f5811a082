//! Common error types.

use thiserror::Error;

/// Errors surfaced by media detection.
///
/// Runtime detection failures (bad status codes, transport errors,
/// unrecognised content types) are never errors; they produce an
/// undetermined outcome plus a diagnostic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown detection method: {0}")]
    UnknownStrategy(String),
}

pub type DetectResult<T> = Result<T, DetectError>;

impl DetectError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn unknown_strategy(id: impl Into<String>) -> Self {
        Self::UnknownStrategy(id.into())
    }
}
