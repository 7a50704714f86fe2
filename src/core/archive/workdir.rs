//! Scoped working directory
//!
//! Each export stages its files and builds its archive in a directory of its
//! own. The directory is removed when the [`WorkingDirectory`] is dropped, on
//! success and failure alike.

use crate::domain::{DepotError, Result};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Exclusively owned directory, removed on drop
#[derive(Debug)]
pub struct WorkingDirectory {
    path: PathBuf,
    name: String,
}

impl WorkingDirectory {
    /// Create `<parent>/<prefix>_t<millis>_p<pid>`
    ///
    /// The parent is created if needed.
    ///
    /// # Errors
    ///
    /// [`DepotError::Io`] if the directory already exists or cannot be
    /// created.
    pub fn acquire(parent: &Path, prefix: &str) -> Result<Self> {
        let name = format!(
            "{prefix}_t{}_p{}",
            Utc::now().timestamp_millis(),
            std::process::id()
        );
        Self::acquire_named(parent, &name)
    }

    /// Create `<parent>/<name>`, failing if it already exists
    pub fn acquire_named(parent: &Path, name: &str) -> Result<Self> {
        fs::create_dir_all(parent).map_err(|e| {
            DepotError::Io(format!(
                "Failed to create working directory parent {}: {}",
                parent.display(),
                e
            ))
        })?;

        let path = parent.join(name);
        fs::create_dir(&path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => DepotError::Io(format!(
                "Working directory {} already exists",
                path.display()
            )),
            _ => DepotError::Io(format!(
                "Failed to create working directory {}: {}",
                path.display(),
                e
            )),
        })?;

        tracing::debug!(path = %path.display(), "Working directory created");

        Ok(Self {
            path,
            name: name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name, also used as the export root name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Working directory removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove working directory"
            ),
        }
    }
}
