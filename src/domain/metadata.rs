//! Export metadata model
//!
//! [`ExportMetadata`] is the document submitted alongside the archive. It is
//! serialized verbatim, so field names follow the service's camelCase
//! convention.

use super::errors::DepotError;
use super::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset type name and version understood by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetType {
    pub name: String,
    pub version: String,
}

impl DatasetType {
    /// Creates a new dataset type
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A resource the dataset depends on, typically a reference genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub resource_identifier: String,
    pub resource_version: String,
    pub resource_display_name: String,
}

/// Who can see the imported dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Protected,
    Public,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        };
        write!(f, "{s}")
    }
}

/// Metadata document submitted with a dataset archive
///
/// # Examples
///
/// ```
/// use depot::domain::metadata::{DatasetType, ExportMetadata};
///
/// let metadata = ExportMetadata::builder()
///     .name("My gene list")
///     .summary("Genes of interest")
///     .dataset_type(DatasetType::new("GeneList", "1.0"))
///     .project("PlasmoDB")
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&metadata).unwrap();
/// assert_eq!(json["datasetType"]["name"], "GeneList");
/// assert_eq!(json["origin"], "galaxy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub dataset_type: DatasetType,
    pub projects: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub visibility: Visibility,
    pub origin: String,
}

impl ExportMetadata {
    /// Point of origin reported to the service when none is set
    pub const DEFAULT_ORIGIN: &'static str = "galaxy";

    /// Creates a new builder
    pub fn builder() -> ExportMetadataBuilder {
        ExportMetadataBuilder::default()
    }
}

/// Builder for [`ExportMetadata`]
#[derive(Debug, Default)]
pub struct ExportMetadataBuilder {
    name: Option<String>,
    summary: String,
    description: String,
    dataset_type: Option<DatasetType>,
    projects: Vec<String>,
    dependencies: Vec<Dependency>,
    visibility: Visibility,
    origin: Option<String>,
}

impl ExportMetadataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn dataset_type(mut self, dataset_type: DatasetType) -> Self {
        self.dataset_type = Some(dataset_type);
        self
    }

    /// Adds one project
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.projects.push(project.into());
        self
    }

    /// Replaces the project list
    pub fn projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    /// Adds one dependency
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Builds the metadata
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Input`] when the name or dataset type is
    /// missing, or when no project was given.
    pub fn build(self) -> Result<ExportMetadata> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DepotError::Input("dataset name is required".to_string()))?;
        let dataset_type = self
            .dataset_type
            .ok_or_else(|| DepotError::Input("dataset type is required".to_string()))?;
        if self.projects.is_empty() {
            return Err(DepotError::Input(
                "at least one project must be listed".to_string(),
            ));
        }

        Ok(ExportMetadata {
            name,
            summary: self.summary,
            description: self.description,
            dataset_type,
            projects: self.projects,
            dependencies: self.dependencies,
            visibility: self.visibility,
            origin: self
                .origin
                .unwrap_or_else(|| ExportMetadata::DEFAULT_ORIGIN.to_string()),
        })
    }
}
