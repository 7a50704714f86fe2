//! Domain error types
//!
//! Every stage of an export either completes or fails with exactly one
//! [`DepotError`]. The orchestrator propagates these unchanged; the CLI maps
//! them onto process exit codes through [`DepotError::exit_code`].

use std::time::Duration;
use thiserror::Error;

/// Main Depot error type
#[derive(Debug, Error)]
pub enum DepotError {
    /// Bad or missing local input (files, arguments, metadata)
    #[error("Input error: {0}")]
    Input(String),

    /// Network failure, non-2xx HTTP status or malformed service response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service rejected the dataset's content
    #[error("{}", format_validation(.messages))]
    Validation {
        /// Service-provided messages, in the order received
        messages: Vec<String>,
    },

    /// The service reported an internal failure while importing
    #[error("Remote error: {0}")]
    Remote(String),

    /// No terminal status was observed before the polling timeout
    #[error(
        "Timed out after {:.1}s polling for import completion; the import status remains unknown",
        .elapsed.as_secs_f64()
    )]
    Timeout {
        /// Wall-clock time spent polling
        elapsed: Duration,
    },

    /// Polling stopped by a shutdown request
    #[error("Export cancelled before the import reached a terminal state")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local I/O failures outside of input handling (working directory)
    #[error("I/O error: {0}")]
    Io(String),
}

fn format_validation(messages: &[String]) -> String {
    let mut lines = vec!["Export failed. Dataset had validation problems:".to_string()];
    lines.extend(messages.iter().cloned());
    lines.join("\n")
}

/// Coarse classification of a [`DepotError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Transport,
    Validation,
    Remote,
    Timeout,
    Cancelled,
    Configuration,
    Io,
}

impl ErrorKind {
    /// Whether the user can fix the problem by changing what they export
    pub fn is_user_correctable(self) -> bool {
        matches!(self, ErrorKind::Input | ErrorKind::Validation)
    }
}

impl DepotError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DepotError::Input(_) => ErrorKind::Input,
            DepotError::Transport(_) => ErrorKind::Transport,
            DepotError::Validation { .. } => ErrorKind::Validation,
            DepotError::Remote(_) => ErrorKind::Remote,
            DepotError::Timeout { .. } => ErrorKind::Timeout,
            DepotError::Cancelled => ErrorKind::Cancelled,
            DepotError::Configuration(_) => ErrorKind::Configuration,
            DepotError::Io(_) => ErrorKind::Io,
        }
    }

    /// Process exit code used by the CLI
    ///
    /// User-correctable failures live in 10-19, operational ones in 20-29.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::Input => 10,
            ErrorKind::Validation => 11,
            ErrorKind::Transport => 20,
            ErrorKind::Remote => 21,
            ErrorKind::Timeout => 22,
            ErrorKind::Io => 23,
            ErrorKind::Cancelled => 130,
        }
    }
}

impl From<std::io::Error> for DepotError {
    fn from(err: std::io::Error) -> Self {
        DepotError::Io(err.to_string())
    }
}

// Service payloads are the only JSON we parse at runtime
impl From<serde_json::Error> for DepotError {
    fn from(err: serde_json::Error) -> Self {
        DepotError::Transport(format!("Malformed JSON: {err}"))
    }
}

impl From<toml::de::Error> for DepotError {
    fn from(err: toml::de::Error) -> Self {
        DepotError::Configuration(format!("TOML parse error: {err}"))
    }
}
