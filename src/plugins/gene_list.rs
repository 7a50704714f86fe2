//! Gene list exports

use super::{DatasetPlugin, ReferenceGenome, StandardArgs};
use crate::domain::{DatasetFileRef, DatasetType, DepotError, ExportMetadata, Result};
use std::path::PathBuf;

pub const GENE_LIST_TYPE: &str = "GeneList";
pub const GENE_LIST_VERSION: &str = "1.0";
/// Name the warehouse expects the gene list under
pub const GENE_LIST_FILE: &str = "genelist.txt";

/// A single gene list file against one reference genome
#[derive(Debug, Clone)]
pub struct GeneListPlugin {
    args: StandardArgs,
    genome: ReferenceGenome,
    path: PathBuf,
}

impl GeneListPlugin {
    pub fn new(args: StandardArgs, genome: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DepotError::Input("A gene list file is required".to_string()));
        }

        Ok(Self {
            args,
            genome: ReferenceGenome::parse(genome)?,
            path,
        })
    }
}

impl DatasetPlugin for GeneListPlugin {
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>> {
        Ok(vec![DatasetFileRef::new(GENE_LIST_FILE, self.path.clone())])
    }

    fn metadata(&self) -> Result<ExportMetadata> {
        self.args
            .metadata_builder(DatasetType::new(GENE_LIST_TYPE, GENE_LIST_VERSION))
            .project(self.genome.project())
            .dependency(self.genome.dependency())
            .build()
    }

    fn export_root_prefix(&self) -> String {
        self.args.export_root_prefix()
    }
}
