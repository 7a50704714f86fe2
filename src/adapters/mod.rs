//! External system integrations for Depot.
//!
//! - [`service`] - The dataset import service (submit and status queries)
//!
//! The orchestrator talks to the service through the
//! [`DatasetService`](service::DatasetService) trait, so tests can swap in a
//! scripted implementation.
//!
//! ```rust,no_run
//! use depot::adapters::service::ServiceClient;
//! use depot::config::ServiceConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig {
//!     base_url: "https://example.org/service".to_string(),
//!     ..Default::default()
//! };
//! let client = ServiceClient::new(&config, None)?;
//! println!("Exporting to {}", client.base_url());
//! # Ok(())
//! # }
//! ```

pub mod service;
