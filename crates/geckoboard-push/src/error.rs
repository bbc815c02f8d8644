//! Error types for push operations

use thiserror::Error;

/// Result type alias for push operations
pub type Result<T> = std::result::Result<T, PushError>;

/// Message returned when a push is attempted without an API key
pub const API_KEY_NOT_CONFIGURED: &str = "Api key not configured.";

/// Errors that can occur while pushing a widget update
#[derive(Error, Debug)]
pub enum PushError {
    /// API key missing or empty; raised before any network attempt
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body (or a payload fragment) could not be (de)serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote service rejected the push
    #[error("Push rejected: {0}")]
    Api(String),

    /// A widget value cannot be represented on the wire (NaN or infinite)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Chart template referenced a placeholder that was not supplied
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Discriminant of a [`PushError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Serialization,
    Api,
    InvalidValue,
    Template,
    InvalidUrl,
}

impl PushError {
    /// Error raised when the API key is unset or empty
    pub fn api_key_not_configured() -> Self {
        Self::Configuration(API_KEY_NOT_CONFIGURED.to_string())
    }

    /// Create an API error from the remote-supplied message
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// The kind of failure, without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Api(_) => ErrorKind::Api,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::Template(_) => ErrorKind::Template,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
        }
    }

    /// Human-readable message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            Self::Configuration(msg)
            | Self::Api(msg)
            | Self::InvalidValue(msg)
            | Self::Template(msg) => msg.clone(),
            Self::Transport(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
            Self::InvalidUrl(e) => e.to_string(),
        }
    }
}
