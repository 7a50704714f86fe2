//! Import job model
//!
//! An [`ExportJob`] is created when the service accepts a submission and is
//! only advanced by the status poller.

use super::ids::JobId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Import status reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    Complete,
    Invalid,
    Rejected,
    Errored,
}

impl JobStatus {
    /// Maps a wire status string onto a [`JobStatus`]
    ///
    /// Matching ignores case and treats `-`, `_` and spaces alike. Values
    /// that are not recognized are treated as still in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot::domain::job::JobStatus;
    ///
    /// assert_eq!(JobStatus::from_wire("complete"), JobStatus::Complete);
    /// assert_eq!(JobStatus::from_wire("In-Progress"), JobStatus::InProgress);
    /// assert_eq!(JobStatus::from_wire("something new"), JobStatus::InProgress);
    /// ```
    pub fn from_wire(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "complete" | "completed" | "success" => JobStatus::Complete,
            "invalid" => JobStatus::Invalid,
            "rejected" => JobStatus::Rejected,
            "errored" | "error" | "failed" => JobStatus::Errored,
            "awaiting" | "pending" | "queued" => JobStatus::Pending,
            _ => JobStatus::InProgress,
        }
    }

    /// Whether no further transition can occur from this status
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Complete | JobStatus::Invalid | JobStatus::Rejected | JobStatus::Errored
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in-progress",
            JobStatus::Complete => "complete",
            JobStatus::Invalid => "invalid",
            JobStatus::Rejected => "rejected",
            JobStatus::Errored => "errored",
        };
        write!(f, "{s}")
    }
}

/// A submitted import and its last observed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub job_id: JobId,
    pub status: JobStatus,
    pub messages: Vec<String>,
}

impl ExportJob {
    /// A freshly submitted job
    pub fn submitted(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Pending,
            messages: Vec::new(),
        }
    }

    /// Records a poll observation
    pub fn observe(&mut self, status: JobStatus, messages: Vec<String>) {
        self.status = status;
        self.messages = messages;
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
