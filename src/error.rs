//! Error types for Clientele
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Clientele operations
///
/// Covers configuration loading, backend transport failures, malformed
/// backend responses, and controller precondition violations.
#[derive(Error, Debug)]
pub enum ClienteleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text, possibly empty
        body: String,
    },

    /// The request exceeded the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The backend response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An action needed a roster selection but none was made
    #[error("No client selected")]
    NoSelection,

    /// An action needed an open session but none is bound
    #[error("No active session")]
    NoActiveSession,

    /// A second session was requested while one is already bound
    #[error("A session is already open: {0}")]
    SessionAlreadyOpen(String),

    /// The session was closed and the controller cannot open another
    #[error("The session has ended")]
    SessionEnded,

    /// A send was started while the previous one is still outstanding
    #[error("A message is already being sent")]
    SendInFlight,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Clientele operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
