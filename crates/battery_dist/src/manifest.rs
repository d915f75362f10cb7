//! The natives manifest.
//!
//! Backend artifacts are built per platform and published alongside a
//! `natives.json` describing them. Consumers look up the entry for their
//! platform key (`"{arch}.{os}"`, e.g. `"amd64.linux"`) and validate the
//! downloaded file against its SHA-512.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env::consts;
use std::fs;
use std::path::Path;

use crate::digest;
use crate::error::{DistError, Result};

/// Default manifest file name.
pub const MANIFEST_FILENAME: &str = "natives.json";

/// A single platform artifact: file name plus its expected digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Artifact file name relative to the natives base URL.
    pub name: String,
    /// Lowercase hex SHA-512 of the artifact bytes.
    pub sha512: String,
}

/// Manifest of all published backend artifacts for one natives version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativesManifest {
    /// Natives version the entries belong to.
    pub version: String,
    /// Platform key (`"{arch}.{os}"`) to artifact mapping.
    /// BTreeMap keeps serialization order stable.
    pub targets: BTreeMap<String, ArtifactEntry>,
}

impl NativesManifest {
    /// Create an empty manifest for the given natives version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            targets: BTreeMap::new(),
        }
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the manifest as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Look up the artifact entry for a platform key.
    pub fn entry(&self, key: &str) -> Result<&ArtifactEntry> {
        self.targets
            .get(key)
            .ok_or_else(|| DistError::UnsupportedPlatform(key.to_string()))
    }

    /// Look up the artifact entry for the platform this process runs on.
    pub fn entry_for_current_platform(&self) -> Result<&ArtifactEntry> {
        self.entry(&platform_key())
    }

    /// Insert or replace the entry for a platform key.
    pub fn insert(&mut self, key: impl Into<String>, entry: ArtifactEntry) {
        self.targets.insert(key.into(), entry);
    }

    /// Build manifest entries from a directory of built artifacts.
    ///
    /// Artifact files are expected to be named `{key}.{ext}` (for example
    /// `amd64.linux.so`); everything before the final extension is used as
    /// the platform key. Subdirectories and dotfiles are ignored.
    pub fn index_dir(version: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut manifest = Self::new(version);

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let key = match name.rsplit_once('.') {
                Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
                _ => {
                    return Err(DistError::InvalidManifest(format!(
                        "artifact file name '{name}' has no platform key"
                    )))
                }
            };

            let sha512 = digest::sha512_file(&entry.path())?;
            manifest.insert(key, ArtifactEntry { name, sha512 });
        }

        if manifest.targets.is_empty() {
            return Err(DistError::InvalidManifest(format!(
                "no artifact files found in {}",
                dir.display()
            )));
        }

        Ok(manifest)
    }
}

/// Platform key for the running process: `"{arch}.{os}"`.
///
/// The arch component keeps the historical `amd64` spelling for x86-64 so
/// that existing published artifacts stay addressable.
pub fn platform_key() -> String {
    format!("{}.{}", normalized_arch(), consts::OS)
}

fn normalized_arch() -> &'static str {
    match consts::ARCH {
        "x86_64" => "amd64",
        other => other,
    }
}
