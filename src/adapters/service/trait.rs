//! Import service trait definition
//!
//! The `DatasetService` trait abstracts the remote data-warehouse import
//! service. The HTTP implementation lives in [`super::http`]; the poller and
//! the orchestrator only ever see this trait, which lets tests script status
//! sequences without a network.

use super::models::StatusReport;
use crate::domain::{ExportMetadata, JobId, Result};
use async_trait::async_trait;
use std::path::Path;

/// Trait for data-warehouse import services
///
/// # Example
///
/// ```no_run
/// use depot::adapters::service::{DatasetService, HttpDatasetService};
/// use depot::config::ServiceConfig;
///
/// # async fn example(archive: &std::path::Path, metadata: &depot::domain::ExportMetadata)
/// #     -> depot::domain::Result<()> {
/// let service = HttpDatasetService::new(&ServiceConfig::default())?;
///
/// let job_id = service.submit(archive, metadata).await?;
/// let report = service.fetch_status(&job_id).await?;
/// println!("{job_id}: {}", report.status);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DatasetService: Send + Sync {
    /// Submit a packaged archive together with its metadata
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DepotError::Transport`] on network failure,
    /// a non-2xx response, or a response without a usable job id.
    async fn submit(&self, archive: &Path, metadata: &ExportMetadata) -> Result<JobId>;

    /// Query the current import status of a submitted job
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DepotError::Transport`] on network failure,
    /// a non-2xx response, malformed JSON or a missing `status` field.
    async fn fetch_status(&self, job_id: &JobId) -> Result<StatusReport>;

    /// Base URL of the service (for logging)
    fn base_url(&self) -> &str;
}
