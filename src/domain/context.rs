//! Error context extension trait
//!
//! Works like `anyhow::Context` but keeps the [`DepotError`] variant, so a
//! failure annotated deep in the archive code still maps onto the right
//! exit code.
//!
//! # Examples
//!
//! ```rust
//! use depot::domain::{DepotError, Result};
//! use depot::domain::context::ResultExt;
//!
//! fn read_manifest(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read manifest {path}"))
//! }
//! ```

use crate::domain::errors::DepotError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Prefix the error message with `context`
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Lazily computed variant of [`ResultExt::context`]
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DepotError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| annotate(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| annotate(e.into(), f()))
    }
}

/// Prefixes the message of string-carrying variants.
///
/// Validation messages come from the service verbatim and are never altered;
/// timeouts and cancellations carry no message.
fn annotate(error: DepotError, context: impl std::fmt::Display) -> DepotError {
    match error {
        DepotError::Input(msg) => DepotError::Input(format!("{context}: {msg}")),
        DepotError::Transport(msg) => DepotError::Transport(format!("{context}: {msg}")),
        DepotError::Remote(msg) => DepotError::Remote(format!("{context}: {msg}")),
        DepotError::Configuration(msg) => {
            DepotError::Configuration(format!("{context}: {msg}"))
        }
        DepotError::Io(msg) => DepotError::Io(format!("{context}: {msg}")),
        other => other,
    }
}
