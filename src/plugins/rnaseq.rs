//! RNA-seq bundle exports
//!
//! Every sample contributes one or two files per format (`txt` expression
//! values, `bw` coverage). A tab-separated manifest mapping sample, file and
//! strand is generated and shipped as `manifest.txt`.

use super::genome::ensure_consistent;
use super::{write_manifest, DatasetPlugin, ReferenceGenome, StandardArgs, MANIFEST_FILE};
use crate::domain::{
    sanitize_name, DatasetFileRef, DatasetType, DepotError, ExportMetadata, Result,
};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use tempfile::NamedTempFile;

pub const RNASEQ_TYPE: &str = "RNASeq";
pub const RNASEQ_VERSION: &str = "1.0";

/// Library strandedness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strandedness {
    Stranded,
    Unstranded,
}

impl FromStr for Strandedness {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stranded" => Ok(Strandedness::Stranded),
            "unstranded" => Ok(Strandedness::Unstranded),
            other => Err(DepotError::Input(format!(
                "Invalid strandedness '{other}' (expected stranded or unstranded)"
            ))),
        }
    }
}

impl fmt::Display for Strandedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strandedness::Stranded => write!(f, "stranded"),
            Strandedness::Unstranded => write!(f, "unstranded"),
        }
    }
}

/// One RNA-seq file as passed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnaSeqEntry {
    pub path: PathBuf,
    pub sample_name: String,
    pub genome: String,
    /// `txt` or `bw`
    pub suffix: String,
}

/// A bundle of RNA-seq files plus its manifest
#[derive(Debug)]
pub struct RnaSeqPlugin {
    args: StandardArgs,
    genome: ReferenceGenome,
    files: Vec<DatasetFileRef>,
    manifest: NamedTempFile,
}

impl RnaSeqPlugin {
    /// Name the files, assign strands and write the manifest
    ///
    /// The first entry's genome is the dataset's; all others must agree.
    pub fn new(
        args: StandardArgs,
        strandedness: Strandedness,
        entries: Vec<RnaSeqEntry>,
    ) -> Result<Self> {
        let first = entries.first().ok_or_else(|| {
            DepotError::Input("At least one RNA-seq file is required".to_string())
        })?;
        let genome = ReferenceGenome::parse(&first.genome)?;

        let mut genomes = Vec::with_capacity(entries.len());
        let mut files = Vec::with_capacity(entries.len() + 1);
        let mut lines = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let odd = index % 2 == 0;
            let mut sample = entry.sample_name.clone();
            let mut file_name = sanitize_name(&format!(
                "{}.{}",
                whitespace().replace_all(&entry.sample_name, "_"),
                entry.suffix
            ));

            let strand = match strandedness {
                Strandedness::Stranded if file_name.ends_with(".txt") => {
                    file_name = strand_numbers(&file_name);
                    sample = strand_numbers(&sample);
                    if odd {
                        "sense"
                    } else {
                        "antisense"
                    }
                }
                Strandedness::Stranded => {
                    if odd {
                        "firststrand"
                    } else {
                        "secondstrand"
                    }
                }
                Strandedness::Unstranded => "unstranded",
            };

            genomes.push((file_name.clone(), ReferenceGenome::parse(&entry.genome)?));
            lines.push(format!("{sample}\t{file_name}\t{strand}"));
            files.push(DatasetFileRef::new(file_name, entry.path));
        }

        ensure_consistent(&genome, genomes.iter().map(|(n, g)| (n.as_str(), g)))?;

        let manifest = write_manifest(&lines)?;
        files.push(DatasetFileRef::new(MANIFEST_FILE, manifest.path()));

        tracing::debug!(
            strandedness = %strandedness,
            files = files.len(),
            "RNA-seq manifest written"
        );

        Ok(Self {
            args,
            genome,
            files,
            manifest,
        })
    }

    /// Path of the generated manifest
    pub fn manifest_path(&self) -> &std::path::Path {
        self.manifest.path()
    }
}

fn whitespace() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// `forward` → `one`, `reverse` → `two`
fn strand_numbers(value: &str) -> String {
    value.replace("reverse", "two").replace("forward", "one")
}

impl DatasetPlugin for RnaSeqPlugin {
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>> {
        Ok(self.files.clone())
    }

    fn metadata(&self) -> Result<ExportMetadata> {
        self.args
            .metadata_builder(DatasetType::new(RNASEQ_TYPE, RNASEQ_VERSION))
            .project(self.genome.project())
            .dependency(self.genome.dependency())
            .build()
    }

    fn export_root_prefix(&self) -> String {
        self.args.export_root_prefix()
    }
}
