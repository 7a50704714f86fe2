//! Reference genome identifiers
//!
//! Warehouse reference genomes are named `PROJECT-BUILD_STRAIN_Genome`, for
//! example `PlasmoDB-66_Pfalciparum3D7_Genome`.

use crate::domain::{Dependency, DepotError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn genome_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^.+-\d+_.+_Genome$").unwrap())
}

/// A parsed reference genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceGenome {
    identifier: String,
    project: String,
    version: String,
    display_name: String,
}

impl ReferenceGenome {
    /// Parse a genome identifier
    ///
    /// # Errors
    ///
    /// [`DepotError::Input`] if the value is blank or not of the form
    /// `PROJECT-BUILD_STRAIN_Genome`.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot::plugins::genome::ReferenceGenome;
    ///
    /// let genome = ReferenceGenome::parse("PlasmoDB-66_Pfalciparum3D7_Genome").unwrap();
    /// assert_eq!(genome.project(), "PlasmoDB");
    /// assert_eq!(genome.version(), "66");
    /// assert_eq!(genome.display_name(), "Pfalciparum3D7 Genome");
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DepotError::Input(
                "A reference genome must be selected".to_string(),
            ));
        }
        if !genome_pattern().is_match(value) {
            return Err(DepotError::Input(format!(
                "'{value}' is not a valid reference genome (expected PROJECT-BUILD_STRAIN_Genome)"
            )));
        }

        let (project, rest) = value.split_once('-').ok_or_else(|| {
            DepotError::Input(format!("'{value}' is missing a project prefix"))
        })?;
        let mut components = rest.split('_');
        let version = components.next().unwrap_or_default();
        let strain = components.next().unwrap_or_default();

        Ok(Self {
            identifier: value.to_string(),
            project: project.to_string(),
            version: version.to_string(),
            display_name: format!("{strain} Genome"),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Whether two genomes name the same identifier and version
    pub fn agrees_with(&self, other: &ReferenceGenome) -> bool {
        self.identifier == other.identifier && self.version == other.version
    }

    /// The metadata dependency for this genome
    pub fn dependency(&self) -> Dependency {
        Dependency {
            resource_identifier: self.identifier.clone(),
            resource_version: self.version.clone(),
            resource_display_name: self.display_name.clone(),
        }
    }
}

impl FromStr for ReferenceGenome {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ReferenceGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

/// Fails unless every genome in `others` agrees with `selected`
pub fn ensure_consistent<'a>(
    selected: &ReferenceGenome,
    others: impl IntoIterator<Item = (&'a str, &'a ReferenceGenome)>,
) -> Result<()> {
    for (file, genome) in others {
        if !selected.agrees_with(genome) {
            return Err(DepotError::Input(format!(
                "File {file} is annotated with reference genome {} version {} which conflicts with {} version {}",
                genome.identifier(),
                genome.version(),
                selected.identifier(),
                selected.version()
            )));
        }
    }
    Ok(())
}
