//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output on stderr
//! - Configurable log levels (overridable with `RUST_LOG`)
//! - Optional JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use depot::logging::init_logging;
//! use depot::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(job_id = "J1", "Dataset submitted");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an export stage transition
///
/// # Example
///
/// ```no_run
/// use depot::log_export_stage;
///
/// log_export_stage!("dataset_u123_t1700000000000_p42", "packaging");
/// ```
#[macro_export]
macro_rules! log_export_stage {
    ($export_root:expr, $stage:expr) => {
        tracing::info!(
            export_root = %$export_root,
            stage = %$stage,
            "Export stage"
        );
    };
}

/// Log a non-terminal status poll
///
/// # Example
///
/// ```no_run
/// use depot::log_poll_attempt;
/// use std::time::Duration;
///
/// log_poll_attempt!("J1", 3, "in-progress", Duration::from_millis(2250));
/// ```
#[macro_export]
macro_rules! log_poll_attempt {
    ($job_id:expr, $attempt:expr, $status:expr, $next_wait:expr) => {
        tracing::debug!(
            job_id = %$job_id,
            attempt = $attempt,
            status = %$status,
            next_wait_ms = $next_wait.as_millis() as u64,
            "Import not finished yet"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use depot::log_error_with_context;
/// use depot::domain::DepotError;
///
/// let error = DepotError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = ?$error.kind(),
            context = $context,
            "Error occurred"
        );
    };
}
