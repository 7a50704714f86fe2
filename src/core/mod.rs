//! Core export logic for Depot.
//!
//! # Modules
//!
//! - [`archive`] - Working directories, staging and the gzipped tar archive
//! - [`poll`] - Backoff schedule and the job status poller
//! - [`export`] - Export orchestration and the success summary
//!
//! # Export Workflow
//!
//! 1. **Acquire**: Create a uniquely named working directory
//! 2. **Stage**: Copy the plugin's files in under their archive names
//! 3. **Package**: Write `<export root>.tgz` with fixed header metadata
//! 4. **Submit**: Post the archive and metadata, receiving a job id
//! 5. **Poll**: Query the job with growing waits until it is terminal
//! 6. **Release**: Remove the working directory, whatever the outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use depot::adapters::service::ServiceClient;
//! use depot::config::load_config;
//! use depot::core::export::ExportOrchestrator;
//! use depot::plugins::{GeneListPlugin, StandardArgs};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("depot.toml")?;
//! let args = StandardArgs::new("My genes", "", "", "jane.42@example.org", "out.html")?;
//! let plugin = GeneListPlugin::new(args, "PlasmoDB-66_Pfalciparum3D7_Genome", "genes.txt")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let client = ServiceClient::new(&config.service, None)?;
//! let orchestrator = ExportOrchestrator::new(&config, client.service(), shutdown_rx);
//!
//! let job_id = orchestrator.run_export(&plugin).await?;
//! println!("Imported as job {job_id}");
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod export;
pub mod poll;
