//! Bigwig track set exports

use super::genome::ensure_consistent;
use super::{DatasetPlugin, ReferenceGenome, StandardArgs};
use crate::domain::{DatasetFileRef, DatasetType, DepotError, ExportMetadata, Result};
use std::path::PathBuf;

pub const BIGWIG_TYPE: &str = "BigwigFiles";
pub const BIGWIG_VERSION: &str = "1.0";

/// One bigwig file as passed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigwigEntry {
    pub path: PathBuf,
    /// The user's original file name
    pub file_name: String,
    pub genome: String,
}

/// One or more bigwig tracks that all share the selected genome
#[derive(Debug)]
pub struct BigwigPlugin {
    args: StandardArgs,
    genome: ReferenceGenome,
    files: Vec<DatasetFileRef>,
}

impl BigwigPlugin {
    /// # Errors
    ///
    /// [`DepotError::Input`] when there are no entries, a genome does not
    /// parse, or an entry's genome disagrees with the selected one.
    pub fn new(args: StandardArgs, genome: &str, entries: Vec<BigwigEntry>) -> Result<Self> {
        let genome = ReferenceGenome::parse(genome)?;
        if entries.is_empty() {
            return Err(DepotError::Input(
                "At least one bigwig file is required".to_string(),
            ));
        }

        let mut files = Vec::with_capacity(entries.len());
        let mut genomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = canonical_bigwig_name(&entry.file_name);
            genomes.push((name.clone(), ReferenceGenome::parse(&entry.genome)?));
            files.push(DatasetFileRef::new(name, entry.path));
        }
        ensure_consistent(&genome, genomes.iter().map(|(n, g)| (n.as_str(), g)))?;

        Ok(Self {
            args,
            genome,
            files,
        })
    }
}

/// `.bigwig` becomes `.bw`; names without `.bw` get it appended
pub fn canonical_bigwig_name(file_name: &str) -> String {
    if let Some(stem) = file_name.strip_suffix(".bigwig") {
        format!("{stem}.bw")
    } else if file_name.ends_with(".bw") {
        file_name.to_string()
    } else {
        format!("{file_name}.bw")
    }
}

impl DatasetPlugin for BigwigPlugin {
    fn dataset_files(&self) -> Result<Vec<DatasetFileRef>> {
        Ok(self.files.clone())
    }

    fn metadata(&self) -> Result<ExportMetadata> {
        self.args
            .metadata_builder(DatasetType::new(BIGWIG_TYPE, BIGWIG_VERSION))
            .project(self.genome.project())
            .dependency(self.genome.dependency())
            .build()
    }

    fn export_root_prefix(&self) -> String {
        self.args.export_root_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const GENOME: &str = "PlasmoDB-66_Pfalciparum3D7_Genome";

    fn args() -> StandardArgs {
        StandardArgs::new("Tracks", "", "", "jane.5@example.org", "out.html").unwrap()
    }

    fn entry(name: &str, genome: &str) -> BigwigEntry {
        BigwigEntry {
            path: PathBuf::from(format!("/data/{name}")),
            file_name: name.to_string(),
            genome: genome.to_string(),
        }
    }

    #[test_case("coverage.bw", "coverage.bw" ; "already bw")]
    #[test_case("coverage.bigwig", "coverage.bw" ; "bigwig extension")]
    #[test_case("coverage", "coverage.bw" ; "no extension")]
    #[test_case("coverage.txt", "coverage.txt.bw" ; "other extension")]
    fn test_canonical_bigwig_name(input: &str, expected: &str) {
        assert_eq!(canonical_bigwig_name(input), expected);
    }

    #[test]
    fn test_bigwig_plugin() {
        let plugin = BigwigPlugin::new(
            args(),
            GENOME,
            vec![entry("a.bigwig", GENOME), entry("b", GENOME)],
        )
        .unwrap();

        let names: Vec<String> = plugin
            .dataset_files()
            .unwrap()
            .into_iter()
            .map(|f| f.logical_name)
            .collect();
        assert_eq!(names, vec!["a.bw", "b.bw"]);
        assert_eq!(plugin.metadata().unwrap().projects, vec!["PlasmoDB"]);
    }

    #[test]
    fn test_bigwig_genome_conflict() {
        let result = BigwigPlugin::new(
            args(),
            GENOME,
            vec![entry("a.bw", "PlasmoDB-65_Pfalciparum3D7_Genome")],
        );
        assert!(matches!(result, Err(DepotError::Input(_))));
    }

    #[test]
    fn test_bigwig_requires_entries() {
        assert!(BigwigPlugin::new(args(), GENOME, Vec::new()).is_err());
    }
}
