//! Dataset file references
//!
//! A plugin describes the files of one dataset as a list of
//! [`DatasetFileRef`]s: where each file lives locally and the name the
//! warehouse expects it under inside the archive.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One dataset file to be packaged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFileRef {
    /// Name the file should have inside the archive (sanitized before use)
    pub logical_name: String,

    /// Local path of the file's content
    pub source_path: PathBuf,
}

impl DatasetFileRef {
    /// Creates a new file reference
    pub fn new(logical_name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            logical_name: logical_name.into(),
            source_path: source_path.into(),
        }
    }

    /// The archive member name for this file
    pub fn archive_name(&self) -> String {
        sanitize_name(&self.logical_name)
    }

    /// Local path of the file's content
    pub fn source(&self) -> &Path {
        &self.source_path
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`
///
/// Surrounding whitespace is trimmed first. The mapping is deterministic and
/// idempotent, so two logical names that sanitize identically collide.
///
/// # Examples
///
/// ```
/// use depot::domain::dataset::sanitize_name;
///
/// assert_eq!(sanitize_name("my file (1).bw"), "my_file__1_.bw");
/// assert_eq!(sanitize_name("my_file__1_.bw"), "my_file__1_.bw");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
