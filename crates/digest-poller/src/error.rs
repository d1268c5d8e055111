//! Error type for the fetch/emit boundary and configuration loading.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollerError {
    /// Transport-level failure talking to the calendar API or a webhook
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Calendar API answered with a non-success status
    #[error("calendar API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Webhook answered with a non-success status
    #[error("webhook returned {status}: {body}")]
    Webhook { status: StatusCode, body: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for PollerError {
    fn from(err: config::ConfigError) -> Self {
        PollerError::Config(err.to_string())
    }
}

pub type PollerResult<T> = Result<T, PollerError>;
