//! Dataset packaging
//!
//! - [`builder`] - Stages dataset files and writes the gzip tar archive
//! - [`workdir`] - Per-export working directory, removed on drop
//! - [`checksum`] - SHA-256 of the finished archive

pub mod builder;
pub mod checksum;
pub mod workdir;

pub use builder::{ArchiveBuilder, PackagedArchive};
pub use workdir::WorkingDirectory;
