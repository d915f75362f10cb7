//! Reproducible bundle assembly.
//!
//! The "bundled" release variant packs the `library/` directory together
//! with explicitly listed artifact files into one ZIP. Archives must be
//! byte-for-byte reproducible, so entries are sorted, timestamps are pinned
//! to the DOS epoch, and permissions are fixed.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::digest;
use crate::error::{DistError, Result};

/// Result of writing a bundle.
#[derive(Debug, Clone)]
pub struct BundleSummary {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Number of entries in the archive.
    pub entries: usize,
    /// SHA-512 of the archive bytes.
    pub sha512: String,
}

/// Assemble the bundled archive from `library_dir` plus standalone
/// `artifacts`, writing it to `out`.
///
/// Files under `library_dir` keep their relative paths at the archive root;
/// each artifact lands at the root under its file name. Name collisions are
/// an error rather than a silent overwrite.
pub fn write_bundle(library_dir: &Path, artifacts: &[PathBuf], out: &Path) -> Result<BundleSummary> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    for entry in WalkDir::new(library_dir) {
        let entry = entry.map_err(|e| DistError::Bundle(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(library_dir)
            .map_err(|e| DistError::Bundle(e.to_string()))?;
        let name = rel
            .to_str()
            .ok_or_else(|| {
                DistError::Bundle(format!("non UTF-8 path in library dir: {}", rel.display()))
            })?
            .replace('\\', "/");

        files.push((name, fs::read(entry.path())?));
    }

    for artifact in artifacts {
        let name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DistError::Bundle(format!("artifact has no file name: {}", artifact.display()))
            })?
            .to_string();

        files.push((name, fs::read(artifact)?));
    }

    if files.is_empty() {
        return Err(DistError::Bundle("nothing to bundle".to_string()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    if let Some(pair) = files.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(DistError::Bundle(format!(
            "duplicate entry name '{}'",
            pair[0].0
        )));
    }

    // Pinned timestamps keep the archive reproducible.
    let options = SimpleFileOptions::default()
        .last_modified_time(
            zip::DateTime::from_date_and_time(1980, 1, 1, 0, 0, 0).expect("valid date"),
        )
        .unix_permissions(0o644)
        .compression_method(CompressionMethod::Deflated);

    let mut archive = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut archive));
        for (name, content) in &files {
            zip.start_file(name.as_str(), options)
                .map_err(|e| DistError::Bundle(format!("failed to add '{name}': {e}")))?;
            zip.write_all(content)?;
        }
        zip.finish()
            .map_err(|e| DistError::Bundle(format!("failed to finalize archive: {e}")))?;
    }

    fs::write(out, &archive)?;
    debug!(entries = files.len(), out = %out.display(), "wrote bundle");

    Ok(BundleSummary {
        path: out.to_path_buf(),
        entries: files.len(),
        sha512: digest::sha512(&archive),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn fixture() -> (tempfile::TempDir, PathBuf, Vec<PathBuf>) {
        let dir = tempfile::tempdir().expect("create temp dir");

        let library = dir.path().join("library");
        fs::create_dir_all(library.join("natives")).unwrap();
        fs::write(library.join("LICENSE"), b"license text").unwrap();
        fs::write(library.join("natives/amd64.linux.so"), b"backend").unwrap();

        let artifact = dir.path().join("battery.jar");
        fs::write(&artifact, b"compiled output").unwrap();

        (dir, library, vec![artifact])
    }

    #[test]
    fn test_bundle_contains_sorted_inputs() {
        let (dir, library, artifacts) = fixture();
        let out = dir.path().join("bundle.zip");

        let summary = write_bundle(&library, &artifacts, &out).expect("write bundle");
        assert_eq!(summary.entries, 3);

        let file = fs::File::open(&out).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["LICENSE", "battery.jar", "natives/amd64.linux.so"]);

        let mut content = Vec::new();
        zip.by_name("battery.jar")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"compiled output");
    }

    #[test]
    fn test_bundle_is_reproducible() {
        let (dir, library, artifacts) = fixture();
        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");

        let a = write_bundle(&library, &artifacts, &first).expect("first bundle");
        let b = write_bundle(&library, &artifacts, &second).expect("second bundle");

        assert_eq!(a.sha512, b.sha512);
        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (dir, library, _) = fixture();
        let out = dir.path().join("bundle.zip");

        // Same file name as one already inside library/.
        let clashing = dir.path().join("LICENSE");
        fs::write(&clashing, b"other license").unwrap();

        let err = write_bundle(&library, &[clashing], &out).unwrap_err();
        assert!(matches!(err, DistError::Bundle(msg) if msg.contains("LICENSE")));
    }

    #[test]
    fn test_empty_bundle_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let library = dir.path().join("library");
        fs::create_dir_all(&library).unwrap();

        let err = write_bundle(&library, &[], &dir.path().join("out.zip")).unwrap_err();
        assert!(matches!(err, DistError::Bundle(_)));
    }
}
