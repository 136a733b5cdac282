//! Error types for Workspace Builder
//!
//! This module provides the error hierarchy for all components using
//! `thiserror`. The library propagates errors with `?`; the HTTP layer
//! collapses every failure into an empty result list and a log line.

use thiserror::Error;

/// The main error type for Workspace Builder operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote automation service errors
    #[error("Automation error: {0}")]
    Automation(#[from] AutomationError),

    /// Link extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Errors from the remote session-oriented automation API
#[derive(Error, Debug)]
pub enum AutomationError {
    /// API credential missing from the environment
    #[error("Automation API credential is not set")]
    MissingCredential,

    /// Failed to create a remote browsing session
    #[error("Failed to create session: {0}")]
    SessionCreateFailed(String),

    /// The service rejected or failed a step instruction
    #[error("Step failed for session {session_id}: {message}")]
    StepFailed {
        /// The remote session the step was issued against
        session_id: String,
        /// Detail reported by the service or transport
        message: String,
    },

    /// Non-2xx response from the automation API
    #[error("Automation API returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body did not match any expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Link extraction errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No usable link in the response
    #[error("No qualifying link found: {0}")]
    NoLink(String),
}

/// Result type alias for Workspace Builder operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}
