//! Error taxonomy and user-facing message classification.
//!
//! Library code returns typed errors. At the session boundary every failure
//! becomes one displayable string; `user_message` owns that mapping.

use serde::Serialize;
use thiserror::Error;

/// Anything that can go wrong between composing a prompt and holding clean text.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Gemini API key missing")]
    MissingApiKey,

    #[error("API request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Gemini API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Prompt blocked by Gemini: {0}")]
    Blocked(String),

    #[error("Could not parse Gemini response: {0}")]
    Decode(String),

    #[error("Generated content was empty")]
    Empty,

    #[error("Generated content was empty after sanitization")]
    EmptyAfterSanitize,
}

impl GenerateError {
    /// HTTP status of the failed call, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenerateError::Http { status, .. } => Some(*status),
            GenerateError::Transport { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the request never got a usable answer from the network.
    pub fn is_network(&self) -> bool {
        match self {
            GenerateError::Transport { source } => {
                source.is_connect() || source.is_timeout() || source.is_request()
            }
            _ => false,
        }
    }

    /// Worth another attempt: network trouble, rate limiting or a server error.
    pub fn is_retryable(&self) -> bool {
        self.is_network() || matches!(self.status(), Some(429) | Some(500..=599))
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(source: reqwest::Error) -> Self {
        GenerateError::Transport { source }
    }
}

/// Saving the field value back to the host failed.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Failed to write field value to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize field value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Host rejected field value: {0}")]
    Rejected(String),
}

/// The error shell carried by a failed generation result.
///
/// Keeps the raw message alongside whatever transport details the
/// classifier needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationFailure {
    pub message: String,
    pub status: Option<u16>,
    pub network: bool,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            network: false,
        }
    }
}

impl From<&GenerateError> for GenerationFailure {
    fn from(err: &GenerateError) -> Self {
        Self {
            message: err.to_string(),
            status: err.status(),
            network: err.is_network(),
        }
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub const AUTH_MESSAGE: &str = "Authentication failed. Please check your API keys.";
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const SERVER_MESSAGE: &str = "Server error. Please try again later.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";
pub const EDIT_FAILED_MESSAGE: &str = "Failed to save edit.";

/// Map a failure to the single string the user sees.
///
/// Status codes win over message text; anything unrecognised passes
/// through unchanged.
pub fn user_message(failure: &GenerationFailure) -> String {
    match failure.status {
        Some(401) | Some(403) => return AUTH_MESSAGE.to_string(),
        Some(429) => return RATE_LIMIT_MESSAGE.to_string(),
        Some(s) if s >= 500 => return SERVER_MESSAGE.to_string(),
        _ => {}
    }

    if failure.network || failure.message.to_lowercase().contains("network") {
        return NETWORK_MESSAGE.to_string();
    }

    if failure.message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        failure.message.clone()
    }
}
