//! Export summary and success page
//!
//! A successful export yields an [`ExportSummary`]; the CLI logs it and
//! renders it as a small HTML page at the caller's output path.

use crate::domain::{DepotError, JobId, Result};
use std::path::Path;
use std::time::Duration;

/// Summary of a successful export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Job id assigned by the import service
    pub job_id: JobId,

    /// Name of the export root (working directory and archive stem)
    pub export_root: String,

    /// Dataset name from the metadata
    pub dataset_name: String,

    /// Archive size in bytes
    pub archive_size: u64,

    /// Hex SHA-256 of the archive
    pub archive_sha256: String,

    /// Archive member names in order
    pub members: Vec<String>,

    /// Wall-clock duration of the whole export
    pub duration: Duration,
}

impl ExportSummary {
    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            job_id = %self.job_id,
            export_root = %self.export_root,
            dataset = %self.dataset_name,
            members = self.members.len(),
            archive_size = self.archive_size,
            archive_sha256 = %self.archive_sha256,
            duration_secs = self.duration.as_secs_f64(),
            "Export completed"
        );
    }
}

/// Write an HTML page announcing the completed export
///
/// # Errors
///
/// Returns [`DepotError::Io`] if the page cannot be written.
pub fn write_success_page(path: &Path, summary: &ExportSummary) -> Result<()> {
    let page = render_success_page(summary);
    std::fs::write(path, page).map_err(|e| {
        DepotError::Io(format!(
            "Failed to write success page {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "Success page written");
    Ok(())
}

fn render_success_page(summary: &ExportSummary) -> String {
    let files: String = summary
        .members
        .iter()
        .map(|m| format!("      <li>{}</li>\n", escape_html(m)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Export complete</title>
  </head>
  <body>
    <p>Dataset <strong>{name}</strong> was exported successfully.</p>
    <p>Import job: <code>{job_id}</code></p>
    <p>Files:</p>
    <ul>
{files}    </ul>
  </body>
</html>
"#,
        name = escape_html(&summary.dataset_name),
        job_id = escape_html(summary.job_id.as_str()),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
