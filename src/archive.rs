//! Bundling the export tree into a single zip archive.
//!
//! The archive sink walks every regular file under the export tree and
//! stores it at its path relative to the tree root, deflated at maximum
//! compression. The archive filename encodes the creation timestamp:
//! `slackdump-YYYYMMDDHHMMSS.zip`.
//!
//! Entry paths always use `/` separators, and each one is printed to
//! stdout as it is added, so a run leaves a visible manifest of what went
//! into the archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;

/// Archives every regular file under `tree_root` into a timestamped zip
/// in `output_dir`, returning the archive path.
///
/// Directories are traversed in sorted name order, so archive layout is
/// deterministic for a given tree.
///
/// # Errors
///
/// Any I/O or zip failure aborts archiving. Files written earlier in the
/// run are unaffected; the partial archive is left behind.
///
/// # Example
///
/// ```rust,no_run
/// use mpdump::archive::archive_tree;
///
/// let path = archive_tree("/tmp/export".as_ref(), "dump_data".as_ref())?;
/// println!("archive at {}", path.display());
/// # Ok::<(), mpdump::MpdumpError>(())
/// ```
pub fn archive_tree(tree_root: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let archive_path = output_dir.join(format!("slackdump-{stamp}.zip"));

    let file = File::create(&archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    add_dir(&mut writer, tree_root, "", options)?;
    writer.finish()?;

    Ok(archive_path)
}

/// Recursively adds `dir`'s files under the `prefix` entry path.
fn add_dir(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            add_dir(writer, &path, &entry_path, options)?;
        } else {
            println!("{entry_path}");
            writer.start_file(entry_path.as_str(), options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, writer)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::tempdir;
    use zip::ZipArchive;

    use super::*;

    fn build_tree(root: &Path) {
        let channel = root.join("private_channel/mpdm-abc");
        fs::create_dir_all(&channel).unwrap();
        fs::write(channel.join("2020-01-01.json"), b"[]").unwrap();
        fs::write(channel.join("2020-01-02.json"), b"[1]").unwrap();
        fs::create_dir_all(root.join("empty_dir")).unwrap();
    }

    #[test]
    fn test_archive_contains_relative_paths() {
        let tree = tempdir().unwrap();
        let out = tempdir().unwrap();
        build_tree(tree.path());

        let archive_path = archive_tree(tree.path(), out.path()).unwrap();
        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "private_channel/mpdm-abc/2020-01-01.json",
                "private_channel/mpdm-abc/2020-01-02.json",
            ]
        );
    }

    #[test]
    fn test_archive_preserves_file_contents() {
        let tree = tempdir().unwrap();
        let out = tempdir().unwrap();
        build_tree(tree.path());

        let archive_path = archive_tree(tree.path(), out.path()).unwrap();
        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();

        let mut entry = archive
            .by_name("private_channel/mpdm-abc/2020-01-02.json")
            .unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "[1]");
    }

    #[test]
    fn test_archive_filename_pattern() {
        let tree = tempdir().unwrap();
        let out = tempdir().unwrap();
        build_tree(tree.path());

        let archive_path = archive_tree(tree.path(), out.path()).unwrap();
        let name = archive_path.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("slackdump-"));
        assert!(name.ends_with(".zip"));
        // slackdump- + 14 digit timestamp + .zip
        assert_eq!(name.len(), "slackdump-".len() + 14 + ".zip".len());
        let stamp = &name["slackdump-".len()..name.len() - ".zip".len()];
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_empty_tree_produces_empty_archive() {
        let tree = tempdir().unwrap();
        let out = tempdir().unwrap();

        let archive_path = archive_tree(tree.path(), out.path()).unwrap();
        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
