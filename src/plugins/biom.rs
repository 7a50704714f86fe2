//! BIOM exports to MicrobiomeDB

use super::{DatasetPlugin, StandardArgs};
use crate::domain::{DatasetFileRef, DatasetType, DepotError, ExportMetadata, Result};
use std::path::PathBuf;

pub const BIOM_TYPE: &str = "BIOM";
pub const BIOM_VERSION: &str = "1.0";
pub const BIOM_FILE: &str = "data.biom";
pub const BIOM_PROJECT: &str = "MicrobiomeDB";

/// A single BIOM file; no reference genome involved
#[derive(Debug, Clone)]
pub struct BiomPlugin {
    args: StandardArgs,
    path: PathBuf,
}

impl BiomPlugin {
    pub fn new(args: StandardArgs, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DepotError::Input("A BIOM file is required".to_string()));
        }
        Ok(Self { args, path })
    }
}

impl DatasetPlugin for BiomPlugin {
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>> {
        Ok(vec![DatasetFileRef::new(BIOM_FILE, self.path.clone())])
    }

    fn metadata(&self) -> Result<ExportMetadata> {
        self.args
            .metadata_builder(DatasetType::new(BIOM_TYPE, BIOM_VERSION))
            .project(BIOM_PROJECT)
            .build()
    }

    fn export_root_prefix(&self) -> String {
        self.args.export_root_prefix()
    }
}
