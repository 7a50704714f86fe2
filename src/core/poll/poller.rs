//! Import status poller
//!
//! Each iteration checks the shutdown signal, queries the service once and
//! either returns on a terminal status or sleeps for the next backoff
//! interval. The timeout is checked after every sleep, so a timed-out poller
//! never issues another query.

use super::backoff::Backoff;
use crate::adapters::service::DatasetService;
use crate::config::PollingConfig;
use crate::domain::{DepotError, ExportJob, JobId, JobStatus, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Waits for a submitted import to reach a terminal status
pub struct StatusPoller {
    service: Arc<dyn DatasetService>,
    config: PollingConfig,
    shutdown: watch::Receiver<bool>,
}

impl StatusPoller {
    /// Create a new poller
    ///
    /// # Arguments
    ///
    /// * `config` - Backoff and timeout settings
    /// * `service` - Service answering status queries
    /// * `shutdown` - Set to `true` to stop before the next query
    pub fn new(
        config: &PollingConfig,
        service: Arc<dyn DatasetService>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            service,
            config: config.clone(),
            shutdown,
        }
    }

    /// Poll until the job is terminal, the timeout passes or shutdown is
    /// requested
    ///
    /// # Errors
    ///
    /// - [`DepotError::Validation`] for `invalid`/`rejected` imports
    /// - [`DepotError::Remote`] for `errored` imports
    /// - [`DepotError::Timeout`] when no terminal status arrives in time
    /// - [`DepotError::Cancelled`] when shutdown was requested
    /// - [`DepotError::Transport`] when a status query fails
    pub async fn wait_for_completion(&self, job_id: &JobId) -> Result<ExportJob> {
        let mut job = ExportJob::submitted(job_id.clone());
        let mut intervals = Backoff::from_config(&self.config);
        let timeout = self.config.timeout();
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            if *self.shutdown.borrow() {
                tracing::warn!(job_id = %job_id, attempt, "Polling cancelled");
                return Err(DepotError::Cancelled);
            }

            attempt += 1;
            let report = self.service.fetch_status(job_id).await?;
            job.observe(report.status, report.messages);

            if job.is_terminal() {
                tracing::info!(
                    job_id = %job_id,
                    status = %job.status,
                    attempts = attempt,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Import reached terminal status"
                );
                return into_outcome(job);
            }

            let wait = intervals.next().unwrap_or_else(|| self.config.max_interval());
            crate::log_poll_attempt!(job_id, attempt, job.status, wait);
            tokio::time::sleep(wait).await;

            let elapsed = started.elapsed();
            if elapsed > timeout {
                tracing::warn!(
                    job_id = %job_id,
                    attempts = attempt,
                    elapsed_secs = elapsed.as_secs_f64(),
                    timeout_secs = timeout.as_secs_f64(),
                    "Polling timed out"
                );
                return Err(DepotError::Timeout { elapsed });
            }
        }
    }

    /// Effective polling timeout
    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }
}

/// Maps a terminal job onto success or its failure kind
fn into_outcome(job: ExportJob) -> Result<ExportJob> {
    match job.status {
        JobStatus::Complete => Ok(job),
        JobStatus::Invalid | JobStatus::Rejected => Err(DepotError::Validation {
            messages: job.messages,
        }),
        JobStatus::Errored => {
            let detail = if job.messages.is_empty() {
                "no details provided".to_string()
            } else {
                job.messages.join("; ")
            };
            Err(DepotError::Remote(format!(
                "Import of job {} failed: {detail}",
                job.job_id
            )))
        }
        JobStatus::Pending | JobStatus::InProgress => Err(DepotError::Transport(format!(
            "Job {} is not in a terminal state",
            job.job_id
        ))),
    }
}
