//! Configuration schema types
//!
//! This module defines the configuration structure for Depot. Every section
//! except `[service]` may be omitted from the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main Depot configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote import service connection
    pub service: ServiceConfig,

    /// Status polling behaviour
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DepotConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate()?;
        self.polling.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Parent directory for per-export working directories
    /// (system temp dir when unset)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }

    /// Parent directory for working directories
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            work_dir: None,
        }
    }
}

/// Remote import service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (scheme, host and any path prefix)
    pub base_url: String,

    /// Resource path datasets are posted to, relative to `base_url`
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Headers attached verbatim to every request (tokens, cookies)
    ///
    /// Values are held as secrets and never logged.
    #[serde(default)]
    pub headers: BTreeMap<String, SecretString>,

    /// Header that carries the exporting user's id, if the service wants one
    #[serde(default)]
    pub user_id_header: Option<String>,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("service.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("service.base_url must start with http:// or https://".to_string());
        }

        if self.resource.trim_matches('/').is_empty() {
            return Err("service.resource cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("service.timeout_seconds must be > 0".to_string());
        }

        for name in self.headers.keys() {
            if name.trim().is_empty() {
                return Err("service.headers cannot contain an empty header name".to_string());
            }
        }

        Ok(())
    }

    /// URL datasets are submitted to
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/')
        )
    }

    /// URL a submitted job's status is read from
    ///
    /// The job id is appended as a single percent-encoded path segment.
    pub fn job_url(&self, job_id: &str) -> String {
        let collection = self.collection_url();
        match url::Url::parse(&collection) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(job_id);
                }
                url.to_string()
            }
            Err(_) => format!("{}/{}", collection, job_id),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            resource: default_resource(),
            headers: BTreeMap::new(),
            user_id_header: None,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Status polling configuration
///
/// Intervals are in seconds. The n-th wait between polls is
/// `min(initial_interval_secs * backoff_factor^(n-1), max_interval_secs)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// First wait between polls
    #[serde(default = "default_initial_interval_secs")]
    pub initial_interval_secs: f64,

    /// Multiplier applied after every non-terminal poll
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,

    /// Upper bound for the wait between polls
    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: f64,

    /// Overall polling timeout (10 x max_interval_secs when unset)
    #[serde(default)]
    pub timeout_secs: Option<f64>,
}

impl PollingConfig {
    fn validate(&self) -> Result<(), String> {
        let values = [
            ("initial_interval_secs", Some(self.initial_interval_secs)),
            ("backoff_factor", Some(self.backoff_factor)),
            ("max_interval_secs", Some(self.max_interval_secs)),
            ("timeout_secs", self.timeout_secs),
        ];
        for (name, value) in values {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(format!("polling.{name} must be a finite number"));
            }
        }

        if !(self.initial_interval_secs > 0.0) {
            return Err("polling.initial_interval_secs must be > 0".to_string());
        }
        if !(self.backoff_factor >= 1.0) {
            return Err("polling.backoff_factor must be >= 1.0".to_string());
        }
        if self.max_interval_secs < self.initial_interval_secs {
            return Err(
                "polling.max_interval_secs must be >= polling.initial_interval_secs".to_string(),
            );
        }
        if self.max_interval_secs > MAX_POLL_INTERVAL_SECS {
            return Err(format!(
                "polling.max_interval_secs must be <= {MAX_POLL_INTERVAL_SECS}"
            ));
        }
        if let Some(timeout) = self.timeout_secs {
            if !(timeout > 0.0) {
                return Err("polling.timeout_secs must be > 0".to_string());
            }
            if timeout < self.max_interval_secs {
                return Err(
                    "polling.timeout_secs must be >= polling.max_interval_secs".to_string(),
                );
            }
            if timeout > MAX_POLL_TIMEOUT_SECS {
                return Err(format!(
                    "polling.timeout_secs must be <= {MAX_POLL_TIMEOUT_SECS}"
                ));
            }
        }
        Ok(())
    }

    pub fn initial_interval(&self) -> Duration {
        seconds(self.initial_interval_secs)
    }

    pub fn max_interval(&self) -> Duration {
        seconds(self.max_interval_secs)
    }

    /// Effective polling timeout
    pub fn timeout(&self) -> Duration {
        seconds(
            self.timeout_secs
                .unwrap_or(self.max_interval_secs * TIMEOUT_INTERVALS),
        )
    }
}

/// Converts seconds to a `Duration`, saturating instead of panicking on
/// values `validate` would reject
pub(crate) fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_interval_secs: default_initial_interval_secs(),
            backoff_factor: default_backoff_factor(),
            max_interval_secs: default_max_interval_secs(),
            timeout_secs: None,
        }
    }
}

/// Default timeout expressed in maximum poll intervals
const TIMEOUT_INTERVALS: f64 = 10.0;

/// Largest accepted wait between polls (one day)
pub const MAX_POLL_INTERVAL_SECS: f64 = 86_400.0;

/// Largest accepted polling timeout (thirty days)
pub const MAX_POLL_TIMEOUT_SECS: f64 = 30.0 * 86_400.0;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// File rotation (daily, hourly or never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_resource() -> String {
    "vdi-datasets".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    300
}

fn default_initial_interval_secs() -> f64 {
    1.0
}

fn default_backoff_factor() -> f64 {
    1.5
}

fn default_max_interval_secs() -> f64 {
    60.0
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
