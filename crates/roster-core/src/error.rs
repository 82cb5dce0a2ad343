//! Error types for roster-core

use thiserror::Error;

/// Main error type for roster-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Token acquisition failed: {0}")]
    Token(String),

    #[error("Connector API error: {0}")]
    Api(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Malformed activity: {0}")]
    Activity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Webhook error: {0}")]
    Webhook(String),
}

/// Result type alias for roster-core
pub type Result<T> = std::result::Result<T, Error>;
