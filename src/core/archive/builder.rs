//! Archive packaging
//!
//! Stages every dataset file under `<dest>/datafiles/<sanitized name>` and
//! writes them, flat and in input order, into `<dest>/<stem>.tgz`.
//!
//! Archives are byte-stable: member headers carry mtime 0, uid/gid 0, empty
//! owner names and the source's permission bits, and the gzip header carries
//! mtime 0. Packaging the same inputs twice gives identical bytes.

use super::checksum::calculate_file_checksum;
use crate::domain::context::ResultExt;
use crate::domain::{DatasetFileRef, DepotError, Result};
use flate2::{Compression, GzBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Directory inside the working directory that holds staged copies
pub const STAGING_DIR: &str = "datafiles";

/// Archive file extension
pub const ARCHIVE_EXTENSION: &str = "tgz";

/// A finished archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArchive {
    pub path: PathBuf,
    /// Hex SHA-256 of the archive file
    pub sha256: String,
    /// Archive size in bytes
    pub size: u64,
    /// Member names in archive order
    pub members: Vec<String>,
}

/// Builds gzip tar archives from dataset file references
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    compression: Compression,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            compression: Compression::default(),
        }
    }

    /// Override the gzip compression level
    pub fn with_compression(mut self, level: u32) -> Self {
        self.compression = Compression::new(level);
        self
    }

    /// Package `files` into `<dest>/<archive_stem>.tgz` on the blocking pool
    ///
    /// # Errors
    ///
    /// - [`DepotError::Input`] if `files` is empty, a source is missing, not
    ///   a regular file or unreadable, or a name sanitizes to nothing usable
    /// - [`DepotError::Io`] if the staging area or archive cannot be written
    pub async fn build(
        &self,
        files: &[DatasetFileRef],
        dest: &Path,
        archive_stem: &str,
    ) -> Result<PackagedArchive> {
        let builder = self.clone();
        let files = files.to_vec();
        let dest = dest.to_path_buf();
        let archive_stem = archive_stem.to_string();

        tokio::task::spawn_blocking(move || builder.build_blocking(&files, &dest, &archive_stem))
            .await
            .map_err(|e| DepotError::Io(format!("Archive task failed: {e}")))?
    }

    /// Synchronous form of [`ArchiveBuilder::build`]
    pub fn build_blocking(
        &self,
        files: &[DatasetFileRef],
        dest: &Path,
        archive_stem: &str,
    ) -> Result<PackagedArchive> {
        if files.is_empty() {
            return Err(DepotError::Input("No dataset files to export".to_string()));
        }

        let members = plan_members(files)?;
        let staging = dest.join(STAGING_DIR);
        fs::create_dir_all(&staging)
            .with_context(|| format!("Failed to create staging directory {}", staging.display()))?;

        for member in &members {
            for source in &member.sources {
                fs::copy(source, staging.join(&member.name)).map_err(|e| {
                    DepotError::Input(format!(
                        "Failed to read dataset file {}: {}",
                        source.display(),
                        e
                    ))
                })?;
            }
        }

        let path = dest.join(format!("{archive_stem}.{ARCHIVE_EXTENSION}"));
        self.write_archive(&path, &staging, &members)?;

        let digest = calculate_file_checksum(&path)
            .with_context(|| format!("Failed to checksum archive {}", path.display()))?;
        let member_names: Vec<String> = members.into_iter().map(|m| m.name).collect();

        tracing::info!(
            archive = %path.display(),
            members = member_names.len(),
            size = digest.size,
            sha256 = %digest.sha256,
            "Archive packaged"
        );

        Ok(PackagedArchive {
            path,
            sha256: digest.sha256,
            size: digest.size,
            members: member_names,
        })
    }

    fn write_archive(&self, path: &Path, staging: &Path, members: &[Member]) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create archive {}", path.display()))?;
        let encoder = GzBuilder::new()
            .mtime(0)
            .write(BufWriter::new(file), self.compression);
        let mut tar = tar::Builder::new(encoder);

        for member in members {
            let staged = staging.join(&member.name);
            let content = File::open(&staged)
                .with_context(|| format!("Failed to open staged file {}", staged.display()))?;
            let size = content.metadata()?.len();

            let mut header = tar::Header::new_gnu();
            header.set_entry_type(tar::EntryType::Regular);
            header.set_size(size);
            header.set_mode(member.mode);
            header.set_mtime(0);
            header.set_uid(0);
            header.set_gid(0);
            header.set_username("")?;
            header.set_groupname("")?;

            tar.append_data(&mut header, &member.name, content)
                .with_context(|| format!("Failed to append {} to archive", member.name))?;
        }

        let encoder = tar.into_inner()?;
        let mut writer = encoder.finish()?;
        writer.flush()?;
        Ok(())
    }
}

/// One archive member and every source that maps onto it
#[derive(Debug)]
struct Member {
    name: String,
    /// Sources in input order; the last one's content wins
    sources: Vec<PathBuf>,
    mode: u32,
}

/// Validates sources and groups them by sanitized name, keeping first
/// positions
fn plan_members(files: &[DatasetFileRef]) -> Result<Vec<Member>> {
    let mut members: Vec<Member> = Vec::with_capacity(files.len());

    for file in files {
        let name = file.archive_name();
        if name.is_empty() || name == "." || name == ".." {
            return Err(DepotError::Input(format!(
                "Dataset file name '{}' is not usable as an archive member name",
                file.logical_name
            )));
        }

        let source = file.source();
        let metadata = fs::metadata(source).map_err(|e| {
            DepotError::Input(format!("Dataset file {} not found: {}", source.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(DepotError::Input(format!(
                "Dataset file {} is not a regular file",
                source.display()
            )));
        }
        let mode = permission_bits(&metadata);

        match members.iter_mut().find(|m| m.name == name) {
            Some(existing) => {
                tracing::warn!(
                    member = %name,
                    source = %source.display(),
                    "Dataset file names collide; later file replaces earlier one"
                );
                existing.sources.push(source.to_path_buf());
                existing.mode = mode;
            }
            None => members.push(Member {
                name,
                sources: vec![source.to_path_buf()],
                mode,
            }),
        }
    }

    Ok(members)
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn unpack(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let name = entry.path().unwrap().to_string_lossy().into_owned();
                let mut content = Vec::new();
                entry.read_to_end(&mut content).unwrap();
                (name, content)
            })
            .collect()
    }

    #[test]
    fn test_package_then_unpack() {
        let inputs = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let files = vec![
            DatasetFileRef::new("genes.txt", write(inputs.path(), "a", b"PF3D7_0100100\n")),
            DatasetFileRef::new("my file (1).bw", write(inputs.path(), "b", &[0u8, 1, 2, 255])),
        ];

        let archive = ArchiveBuilder::new()
            .build_blocking(&files, dest.path(), "dataset_u1_t0_p1")
            .unwrap();

        assert_eq!(archive.path, dest.path().join("dataset_u1_t0_p1.tgz"));
        assert_eq!(archive.members, vec!["genes.txt", "my_file__1_.bw"]);
        assert_eq!(
            unpack(&archive.path),
            vec![
                ("genes.txt".to_string(), b"PF3D7_0100100\n".to_vec()),
                ("my_file__1_.bw".to_string(), vec![0u8, 1, 2, 255]),
            ]
        );
        assert!(dest.path().join(STAGING_DIR).join("my_file__1_.bw").is_file());
        assert_eq!(archive.size, fs::metadata(&archive.path).unwrap().len());
    }

    #[test]
    fn test_empty_file_list() {
        let dest = TempDir::new().unwrap();
        let result = ArchiveBuilder::new().build_blocking(&[], dest.path(), "empty");

        assert!(matches!(result, Err(DepotError::Input(_))));
        assert!(!dest.path().join("empty.tgz").exists());
    }

    #[test]
    fn test_missing_source() {
        let dest = TempDir::new().unwrap();
        let files = vec![DatasetFileRef::new("x.txt", dest.path().join("missing"))];

        let result = ArchiveBuilder::new().build_blocking(&files, dest.path(), "out");
        assert!(matches!(result, Err(DepotError::Input(_))));
        assert!(!dest.path().join("out.tgz").exists());
    }

    #[test]
    fn test_directory_source_rejected() {
        let dest = TempDir::new().unwrap();
        let files = vec![DatasetFileRef::new("dir", dest.path())];

        let result = ArchiveBuilder::new().build_blocking(&files, dest.path(), "out");
        assert!(matches!(result, Err(DepotError::Input(_))));
    }

    #[test]
    fn test_unusable_name_rejected() {
        let inputs = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let files = vec![DatasetFileRef::new("   ", write(inputs.path(), "a", b"x"))];

        let result = ArchiveBuilder::new().build_blocking(&files, dest.path(), "out");
        assert!(matches!(result, Err(DepotError::Input(_))));
    }

    #[test]
    fn test_duplicate_names_keep_first_position_last_content() {
        let inputs = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let files = vec![
            DatasetFileRef::new("a b.txt", write(inputs.path(), "1", b"first")),
            DatasetFileRef::new("other.txt", write(inputs.path(), "2", b"other")),
            DatasetFileRef::new("a_b.txt", write(inputs.path(), "3", b"second")),
        ];

        let archive = ArchiveBuilder::new()
            .build_blocking(&files, dest.path(), "dup")
            .unwrap();

        assert_eq!(
            unpack(&archive.path),
            vec![
                ("a_b.txt".to_string(), b"second".to_vec()),
                ("other.txt".to_string(), b"other".to_vec()),
            ]
        );
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let inputs = TempDir::new().unwrap();
        let files = vec![
            DatasetFileRef::new("one.txt", write(inputs.path(), "1", b"one")),
            DatasetFileRef::new("two.txt", write(inputs.path(), "2", b"two")),
        ];

        let first_dest = TempDir::new().unwrap();
        let second_dest = TempDir::new().unwrap();
        let first = ArchiveBuilder::new()
            .build_blocking(&files, first_dest.path(), "same")
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = ArchiveBuilder::new()
            .build_blocking(&files, second_dest.path(), "same")
            .unwrap();

        assert_eq!(first.sha256, second.sha256);
        assert_eq!(fs::read(&first.path).unwrap(), fs::read(&second.path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_followed() {
        let inputs = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let target = write(inputs.path(), "target", b"linked content");
        let link = inputs.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let archive = ArchiveBuilder::new()
            .build_blocking(&[DatasetFileRef::new("data.txt", link)], dest.path(), "sym")
            .unwrap();

        assert_eq!(
            unpack(&archive.path),
            vec![("data.txt".to_string(), b"linked content".to_vec())]
        );
    }

    #[tokio::test]
    async fn test_build_on_blocking_pool() {
        let inputs = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let files = vec![DatasetFileRef::new("data.biom", write(inputs.path(), "b", b"{}"))];

        let archive = ArchiveBuilder::new()
            .build(&files, dest.path(), "async")
            .await
            .unwrap();
        assert_eq!(archive.members, vec!["data.biom"]);
    }
}
