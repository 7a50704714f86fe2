//! Import service wire models
//!
//! These structs mirror the service's JSON bodies and are kept apart from the
//! domain types. [`StatusResponse::classify`] is the single place where the
//! wire status is turned into a [`JobStatus`].

use crate::domain::{DepotError, JobId, JobStatus, Result};
use serde::{Deserialize, Serialize};

/// Body returned by a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(default)]
    pub job_id: Option<String>,
}

impl SubmitResponse {
    /// Extracts the job id, rejecting a missing or blank `jobId`
    pub fn into_job_id(self) -> Result<JobId> {
        let raw = self.job_id.ok_or_else(|| {
            DepotError::Transport("Submission response is missing 'jobId'".to_string())
        })?;
        JobId::new(raw).map_err(|e| DepotError::Transport(format!("Invalid 'jobId': {e}")))
    }
}

/// Body returned by a status query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,

    /// Legacy status field still sent by older deployments
    #[serde(default)]
    pub import_status: Option<String>,

    #[serde(default)]
    pub messages: Option<Vec<String>>,

    /// Legacy name for `messages`, read only when `messages` is empty
    #[serde(default)]
    pub import_messages: Option<Vec<String>>,
}

/// A classified status observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: JobStatus,
    pub messages: Vec<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus, messages: Vec<String>) -> Self {
        Self { status, messages }
    }
}

impl StatusResponse {
    /// Classifies the response into a [`StatusReport`]
    ///
    /// When both `status` and `importStatus` are present a terminal value
    /// beats a non-terminal one; if both are terminal `status` wins.
    ///
    /// # Errors
    ///
    /// [`DepotError::Transport`] when `status` is absent.
    pub fn classify(self) -> Result<StatusReport> {
        let primary = self
            .status
            .as_deref()
            .map(JobStatus::from_wire)
            .ok_or_else(|| {
                DepotError::Transport("Status response is missing 'status'".to_string())
            })?;

        let status = match self.import_status.as_deref().map(JobStatus::from_wire) {
            Some(legacy) if legacy.is_terminal() && !primary.is_terminal() => legacy,
            _ => primary,
        };

        let messages = match self.messages {
            Some(messages) if !messages.is_empty() => messages,
            _ => self.import_messages.unwrap_or_default(),
        };

        Ok(StatusReport::new(status, messages))
    }
}
