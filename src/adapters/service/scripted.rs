//! Scripted in-memory service for unit tests

use super::models::StatusReport;
use super::DatasetService;
use crate::domain::{ExportMetadata, JobId, JobStatus, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

/// Replays queued status results; reports in-progress once the queue is empty
pub(crate) struct ScriptedService {
    job_id: String,
    statuses: Mutex<VecDeque<Result<StatusReport>>>,
    queries: AtomicUsize,
    submitted: Mutex<Vec<PathBuf>>,
    cancel_on_first_query: Option<watch::Sender<bool>>,
}

impl ScriptedService {
    pub(crate) fn new(statuses: Vec<Result<StatusReport>>) -> Self {
        Self {
            job_id: "J1".to_string(),
            statuses: Mutex::new(statuses.into()),
            queries: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            cancel_on_first_query: None,
        }
    }

    pub(crate) fn with_statuses(statuses: &[JobStatus]) -> Self {
        Self::new(
            statuses
                .iter()
                .map(|s| Ok(StatusReport::new(*s, Vec::new())))
                .collect(),
        )
    }

    /// Flip the shutdown signal while answering the first query
    pub(crate) fn cancel_on_first_query(mut self, sender: watch::Sender<bool>) -> Self {
        self.cancel_on_first_query = Some(sender);
        self
    }

    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub(crate) fn submitted(&self) -> Vec<PathBuf> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatasetService for ScriptedService {
    async fn submit(&self, archive: &Path, _metadata: &ExportMetadata) -> Result<JobId> {
        assert!(archive.is_file(), "archive must exist when submitted");
        self.submitted.lock().unwrap().push(archive.to_path_buf());
        Ok(JobId::new(self.job_id.clone()).unwrap())
    }

    async fn fetch_status(&self, _job_id: &JobId) -> Result<StatusReport> {
        let count = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        if count == 1 {
            if let Some(sender) = &self.cancel_on_first_query {
                let _ = sender.send(true);
            }
        }

        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StatusReport::new(JobStatus::InProgress, Vec::new())))
    }

    fn base_url(&self) -> &str {
        "memory://scripted"
    }
}
