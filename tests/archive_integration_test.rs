//! Packaging tests: plugin output through the archive builder

use depot::core::archive::checksum::calculate_file_checksum;
use depot::core::archive::{ArchiveBuilder, WorkingDirectory};
use depot::plugins::{
    DatasetPlugin, RnaSeqEntry, RnaSeqPlugin, StandardArgs, Strandedness, VcfEntry, VcfPlugin,
};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

const GENOME: &str = "PlasmoDB-66_Pfalciparum3D7_Genome";

fn args() -> StandardArgs {
    StandardArgs::new("Bundle", "", "", "jane.42@example.org", "out.html").unwrap()
}

fn unpack(path: &Path) -> Vec<(String, tar::Header, Vec<u8>)> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let header = entry.header().clone();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (name, header, content)
        })
        .collect()
}

#[tokio::test]
async fn test_rnaseq_bundle_archive() {
    let inputs = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let samples = [("s1 forward", "txt"), ("s1 reverse", "txt")];
    let entries: Vec<RnaSeqEntry> = samples
        .iter()
        .map(|(sample, suffix)| {
            let path = inputs.path().join(format!("{}.{suffix}", sample.replace(' ', "-")));
            std::fs::write(&path, format!("gene\tcount\n{sample}\t1\n")).unwrap();
            RnaSeqEntry {
                path,
                sample_name: sample.to_string(),
                genome: GENOME.to_string(),
                suffix: suffix.to_string(),
            }
        })
        .collect();
    let plugin = RnaSeqPlugin::new(args(), Strandedness::Stranded, entries).unwrap();

    let workdir = WorkingDirectory::acquire(parent.path(), &plugin.export_root_prefix()).unwrap();
    assert!(workdir.name().starts_with("dataset_u42_t"));

    let archive = ArchiveBuilder::new()
        .build(&plugin.dataset_files().unwrap(), workdir.path(), workdir.name())
        .await
        .unwrap();

    assert_eq!(
        archive.members,
        vec!["s1_one.txt", "s1_two.txt", "manifest.txt"]
    );
    assert_eq!(
        calculate_file_checksum(&archive.path).unwrap().sha256,
        archive.sha256
    );

    let unpacked = unpack(&archive.path);
    let names: Vec<&str> = unpacked.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, archive.members);

    let (_, header, manifest) = &unpacked[2];
    assert_eq!(
        String::from_utf8_lossy(manifest),
        "s1 one\ts1_one.txt\tsense\ns1 two\ts1_two.txt\tantisense\n"
    );
    assert_eq!(header.mtime().unwrap(), 0);
    assert_eq!(header.uid().unwrap(), 0);
    assert_eq!(header.username().unwrap(), Some(""));

    drop(workdir);
    assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
}

#[test]
fn test_vcf_archive_is_reproducible() {
    let inputs = TempDir::new().unwrap();
    let a = inputs.path().join("a.vcf");
    std::fs::write(&a, "##fileformat=VCFv4.2\n").unwrap();
    let plugin = VcfPlugin::new(
        args(),
        GENOME,
        vec![VcfEntry {
            path: a,
            sample_name: "sampleA".to_string(),
        }],
    )
    .unwrap();
    let files = plugin.dataset_files().unwrap();

    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let builder = ArchiveBuilder::new();
    let one = builder.build_blocking(&files, first.path(), "export").unwrap();
    let two = builder.build_blocking(&files, second.path(), "export").unwrap();

    assert_eq!(one.sha256, two.sha256);
    assert_eq!(
        std::fs::read(&one.path).unwrap(),
        std::fs::read(&two.path).unwrap()
    );
}
