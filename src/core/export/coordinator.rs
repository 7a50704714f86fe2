//! Export orchestrator - sequences one export from files to imported dataset
//!
//! `Start → Staged → Packaged → Submitted → Polling → Succeeded | Failed`.
//! Stages run strictly in order and a failure ends the export with the error
//! of the stage that failed. The working directory is released on every
//! path out.

use crate::adapters::service::DatasetService;
use crate::config::{DepotConfig, PollingConfig};
use crate::core::archive::{ArchiveBuilder, WorkingDirectory};
use crate::core::export::summary::ExportSummary;
use crate::core::poll::StatusPoller;
use crate::domain::{JobId, Result};
use crate::plugins::DatasetPlugin;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Stage of a running export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Start,
    Staged,
    Packaged,
    Submitted,
    Polling,
    Succeeded,
    Failed,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportStage::Start => "start",
            ExportStage::Staged => "staged",
            ExportStage::Packaged => "packaged",
            ExportStage::Submitted => "submitted",
            ExportStage::Polling => "polling",
            ExportStage::Succeeded => "succeeded",
            ExportStage::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Export orchestrator
pub struct ExportOrchestrator {
    service: Arc<dyn DatasetService>,
    polling: PollingConfig,
    work_dir: PathBuf,
    archive_builder: ArchiveBuilder,
    shutdown: watch::Receiver<bool>,
}

impl ExportOrchestrator {
    /// Create an orchestrator
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration (working directory and polling)
    /// * `service` - Import service to submit to and poll
    /// * `shutdown` - Cancellation signal honoured while polling
    pub fn new(
        config: &DepotConfig,
        service: Arc<dyn DatasetService>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            service,
            polling: config.polling.clone(),
            work_dir: config.application.work_dir(),
            archive_builder: ArchiveBuilder::new(),
            shutdown,
        }
    }

    /// Run one export and return the service's job id
    ///
    /// # Errors
    ///
    /// Returns the error of the failing stage unchanged.
    pub async fn run_export(&self, plugin: &dyn DatasetPlugin) -> Result<JobId> {
        Ok(self.run_export_with_summary(plugin).await?.job_id)
    }

    /// Run one export and return its [`ExportSummary`]
    pub async fn run_export_with_summary(
        &self,
        plugin: &dyn DatasetPlugin,
    ) -> Result<ExportSummary> {
        let started = Instant::now();
        let workdir = WorkingDirectory::acquire(&self.work_dir, &plugin.export_root_prefix())?;
        let mut stage = ExportStage::Start;
        crate::log_export_stage!(workdir.name(), stage);

        let result = self.execute(plugin, &workdir, &mut stage, started).await;

        match &result {
            Ok(summary) => {
                crate::log_export_stage!(workdir.name(), ExportStage::Succeeded);
                summary.log_summary();
            }
            Err(e) => {
                tracing::error!(
                    export_root = %workdir.name(),
                    stage = %ExportStage::Failed,
                    failed_after = %stage,
                    kind = ?e.kind(),
                    error = %e,
                    "Export failed"
                );
            }
        }

        result
    }

    async fn execute(
        &self,
        plugin: &dyn DatasetPlugin,
        workdir: &WorkingDirectory,
        stage: &mut ExportStage,
        started: Instant,
    ) -> Result<ExportSummary> {
        let root = workdir.name().to_string();

        let files = plugin.dataset_files()?;
        advance(&root, stage, ExportStage::Staged);

        let archive = self
            .archive_builder
            .build(&files, workdir.path(), &root)
            .await?;
        advance(&root, stage, ExportStage::Packaged);

        let metadata = plugin.metadata()?;
        let job_id = self.service.submit(&archive.path, &metadata).await?;
        tracing::info!(
            export_root = %root,
            job_id = %job_id,
            base_url = %self.service.base_url(),
            "Dataset submitted"
        );
        advance(&root, stage, ExportStage::Submitted);

        let poller = StatusPoller::new(&self.polling, self.service.clone(), self.shutdown.clone());
        advance(&root, stage, ExportStage::Polling);
        let job = poller.wait_for_completion(&job_id).await?;

        Ok(ExportSummary {
            job_id: job.job_id,
            export_root: root,
            dataset_name: metadata.name,
            archive_size: archive.size,
            archive_sha256: archive.sha256,
            members: archive.members,
            duration: started.elapsed(),
        })
    }
}

fn advance(root: &str, stage: &mut ExportStage, next: ExportStage) {
    *stage = next;
    crate::log_export_stage!(root, next);
}
