//! Domain models and types for Depot.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`JobId`], [`UserId`])
//! - **Dataset description** ([`DatasetFileRef`], [`ExportMetadata`])
//! - **Import job state** ([`ExportJob`], [`JobStatus`])
//! - **Error types** ([`DepotError`], [`ErrorKind`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, DepotError>`]:
//!
//! ```rust
//! use depot::domain::{DatasetType, ExportMetadata, Result};
//!
//! fn example() -> Result<ExportMetadata> {
//!     ExportMetadata::builder()
//!         .name("Gene list")
//!         .dataset_type(DatasetType::new("GeneList", "1.0"))
//!         .project("PlasmoDB")
//!         .build()
//! }
//! ```

pub mod context;
pub mod dataset;
pub mod errors;
pub mod ids;
pub mod job;
pub mod metadata;
pub mod result;

// Re-export commonly used types for convenience
pub use dataset::{sanitize_name, DatasetFileRef};
pub use errors::{DepotError, ErrorKind};
pub use ids::{JobId, UserId};
pub use job::{ExportJob, JobStatus};
pub use metadata::{DatasetType, Dependency, ExportMetadata, ExportMetadataBuilder, Visibility};
pub use result::Result;
