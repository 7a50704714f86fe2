//! VCF set exports

use super::{write_manifest, DatasetPlugin, ReferenceGenome, StandardArgs, MANIFEST_FILE};
use crate::domain::{DatasetFileRef, DatasetType, DepotError, ExportMetadata, Result};
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const VCF_TYPE: &str = "VCFFile";
pub const VCF_VERSION: &str = "1.0";

/// One VCF file as passed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfEntry {
    pub path: PathBuf,
    /// Also the file's name inside the archive
    pub sample_name: String,
}

/// One or more VCF files plus a manifest of sample names
#[derive(Debug)]
pub struct VcfPlugin {
    args: StandardArgs,
    genome: ReferenceGenome,
    files: Vec<DatasetFileRef>,
    manifest: NamedTempFile,
}

impl VcfPlugin {
    pub fn new(args: StandardArgs, genome: &str, entries: Vec<VcfEntry>) -> Result<Self> {
        let genome = ReferenceGenome::parse(genome)?;
        if entries.is_empty() {
            return Err(DepotError::Input("At least one VCF file is required".to_string()));
        }

        let manifest = write_manifest(entries.iter().map(|e| e.sample_name.as_str()))?;
        let mut files: Vec<DatasetFileRef> = entries
            .into_iter()
            .map(|e| DatasetFileRef::new(e.sample_name, e.path))
            .collect();
        files.push(DatasetFileRef::new(MANIFEST_FILE, manifest.path()));

        Ok(Self {
            args,
            genome,
            files,
            manifest,
        })
    }

    pub fn manifest_path(&self) -> &std::path::Path {
        self.manifest.path()
    }
}

impl DatasetPlugin for VcfPlugin {
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>> {
        Ok(self.files.clone())
    }

    fn metadata(&self) -> Result<ExportMetadata> {
        self.args
            .metadata_builder(DatasetType::new(VCF_TYPE, VCF_VERSION))
            .project(self.genome.project())
            .dependency(self.genome.dependency())
            .build()
    }

    fn export_root_prefix(&self) -> String {
        self.args.export_root_prefix()
    }
}
