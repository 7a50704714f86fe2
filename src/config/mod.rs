//! Configuration management for Depot.
//!
//! Depot reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DEPOT_*` environment overrides
//! - Default values for optional sections
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and working-directory parent
//! - [`ServiceConfig`] - Import service URL, resource and request headers
//! - [`PollingConfig`] - Status polling backoff and timeout
//! - [`LoggingConfig`] - Optional rolling JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [service]
//! base_url = "https://warehouse.example.org/vdi"
//! resource = "vdi-datasets"
//! user_id_header = "User-ID"
//!
//! [service.headers]
//! Admin-Token = "${DEPOT_ADMIN_TOKEN}"
//!
//! [polling]
//! max_interval_secs = 60
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use depot::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("depot.toml")?;
//! println!("Service: {}", config.service.collection_url());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, DepotConfig, LoggingConfig, PollingConfig, ServiceConfig};
pub use secret::{secret_string, SecretString, SecretValue};
