//! Dataset-type plugins
//!
//! A plugin turns validated command-line arguments for one dataset type into
//! the files to package and the metadata to submit. The export orchestrator
//! only sees the [`DatasetPlugin`] trait.
//!
//! - [`gene_list`] - Gene list (`GeneList` 1.0)
//! - [`bigwig`] - Bigwig track set (`BigwigFiles` 1.0)
//! - [`rnaseq`] - RNA-seq bundle with manifest (`RNASeq` 1.0)
//! - [`vcf`] - VCF set with manifest (`VCFFile` 1.0)
//! - [`biom`] - BIOM file for MicrobiomeDB (`BIOM` 1.0)

pub mod bigwig;
pub mod biom;
pub mod gene_list;
pub mod genome;
pub mod rnaseq;
pub mod vcf;

pub use bigwig::{BigwigEntry, BigwigPlugin};
pub use biom::BiomPlugin;
pub use gene_list::GeneListPlugin;
pub use genome::ReferenceGenome;
pub use rnaseq::{RnaSeqEntry, RnaSeqPlugin, Strandedness};
pub use vcf::{VcfEntry, VcfPlugin};

use crate::domain::{
    DatasetFileRef, DatasetType, DepotError, ExportMetadata, ExportMetadataBuilder, Result, UserId,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Prefix of export root names when a plugin does not name one
pub const DEFAULT_EXPORT_ROOT_PREFIX: &str = "dataset";

/// Name of generated manifest files inside the archive
pub const MANIFEST_FILE: &str = "manifest.txt";

/// One dataset type's contribution to an export
pub trait DatasetPlugin: Send + Sync {
    /// Files to package, in archive order
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>>;

    /// Metadata submitted alongside the archive
    fn metadata(&self) -> Result<ExportMetadata>;

    /// Prefix for the export root (working directory and archive stem)
    fn export_root_prefix(&self) -> String {
        DEFAULT_EXPORT_ROOT_PREFIX.to_string()
    }
}

/// Arguments every export takes regardless of dataset type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardArgs {
    pub dataset_name: String,
    pub summary: String,
    pub description: String,
    pub user_id: UserId,
    /// Where the success page is written
    pub output: PathBuf,
}

impl StandardArgs {
    /// Validate the standard arguments
    ///
    /// # Errors
    ///
    /// [`DepotError::Input`] for a blank dataset name or an e-mail that does
    /// not carry a user id (`<name>.<digits>@<domain>`).
    pub fn new(
        dataset_name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        user_email: &str,
        output: impl Into<PathBuf>,
    ) -> Result<Self> {
        let dataset_name = dataset_name.into();
        if dataset_name.trim().is_empty() {
            return Err(DepotError::Input("A dataset name is required".to_string()));
        }
        let user_id = UserId::from_email(user_email).map_err(DepotError::Input)?;

        Ok(Self {
            dataset_name,
            summary: summary.into(),
            description: description.into(),
            user_id,
            output: output.into(),
        })
    }

    /// `dataset_u<user id>`
    pub fn export_root_prefix(&self) -> String {
        format!("{DEFAULT_EXPORT_ROOT_PREFIX}_u{}", self.user_id)
    }

    /// Metadata builder pre-filled with name, summary, description and type
    pub fn metadata_builder(&self, dataset_type: DatasetType) -> ExportMetadataBuilder {
        ExportMetadata::builder()
            .name(self.dataset_name.clone())
            .summary(self.summary.clone())
            .description(self.description.clone())
            .dataset_type(dataset_type)
    }
}

/// Writes `lines` into a temp file that lives as long as the returned handle
fn write_manifest<I, S>(lines: I) -> Result<NamedTempFile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut manifest = tempfile::Builder::new()
        .prefix("manifest.")
        .suffix(".txt")
        .tempfile()?;
    for line in lines {
        writeln!(manifest, "{}", line.as_ref())?;
    }
    manifest.flush()?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(email: &str) -> Result<StandardArgs> {
        StandardArgs::new("My data", "summary", "description", email, "out.html")
    }

    #[test]
    fn test_standard_args_user_id() {
        let args = args("jane.doe.4242@example.org").unwrap();
        assert_eq!(args.user_id.as_str(), "4242");
        assert_eq!(args.export_root_prefix(), "dataset_u4242");
    }

    #[test]
    fn test_standard_args_rejects_email_without_id() {
        assert!(matches!(
            args("jane@example.org"),
            Err(DepotError::Input(_))
        ));
    }

    #[test]
    fn test_standard_args_rejects_blank_name() {
        let result = StandardArgs::new("  ", "s", "d", "jane.1@example.org", "out.html");
        assert!(matches!(result, Err(DepotError::Input(_))));
    }

    #[test]
    fn test_metadata_builder_prefilled() {
        let metadata = args("jane.7@example.org")
            .unwrap()
            .metadata_builder(DatasetType::new("BIOM", "1.0"))
            .project("MicrobiomeDB")
            .build()
            .unwrap();
        assert_eq!(metadata.name, "My data");
        assert_eq!(metadata.summary, "summary");
        assert_eq!(metadata.dataset_type.name, "BIOM");
    }

    #[test]
    fn test_write_manifest() {
        let manifest = write_manifest(["a\tb", "c\td"]).unwrap();
        let content = std::fs::read_to_string(manifest.path()).unwrap();
        assert_eq!(content, "a\tb\nc\td\n");
    }
}
