// Depot - Dataset export to data-warehouse import services
// Copyright (c) 2025 Depot Contributors
// Licensed under the MIT License

//! # Depot - Dataset export to data-warehouse import services
//!
//! Depot packages a user's files of one dataset type (gene lists, bigwig
//! tracks, RNA-seq bundles, VCF sets, BIOM tables) into a gzipped tar
//! archive, submits it with JSON metadata to a remote import service and
//! polls the resulting job until the service accepts or rejects it.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`plugins`] - One plugin per dataset type (files + metadata)
//! - [`core`] - Archive building, status polling and export orchestration
//! - [`adapters`] - The import service client
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use depot::adapters::service::ServiceClient;
//! use depot::config::load_config;
//! use depot::core::export::ExportOrchestrator;
//! use depot::plugins::{BiomPlugin, StandardArgs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("depot.toml")?;
//!     let args = StandardArgs::new("Soil samples", "", "", "jane.42@example.org", "out.html")?;
//!     let plugin = BiomPlugin::new(args, "table.biom")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let client = ServiceClient::new(&config.service, None)?;
//!     let orchestrator = ExportOrchestrator::new(&config, client.service(), shutdown_rx);
//!
//!     let job_id = orchestrator.run_export(&plugin).await?;
//!     println!("Imported as job {job_id}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`] with a
//! [`domain::DepotError`]. Its [`kind`](domain::DepotError::kind) separates
//! problems the user can fix (bad input, service-side validation) from
//! operational ones (transport, remote failure, timeout), and the CLI turns
//! it into the process exit code.
//!
//! ```rust,no_run
//! use depot::domain::{DepotError, ErrorKind};
//!
//! fn describe(err: &DepotError) -> &'static str {
//!     if err.kind().is_user_correctable() {
//!         "fix the dataset and try again"
//!     } else if err.kind() == ErrorKind::Cancelled {
//!         "cancelled"
//!     } else {
//!         "try again later"
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Depot uses structured logging with the `tracing` crate. Service header
//! values are secrets and never appear in logs.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod plugins;
