//! Export orchestration
//!
//! This module provides the export entry point:
//! - [`ExportOrchestrator`] sequencing packaging, submission and polling
//! - [`ExportSummary`] and the HTML success page

pub mod coordinator;
pub mod summary;

pub use coordinator::{ExportOrchestrator, ExportStage};
pub use summary::{write_success_page, ExportSummary};
