//! Verified artifact retrieval.
//!
//! Consumers call [`Fetcher::ensure`] with a manifest entry. The fetcher
//! reuses a cached copy when its digest matches, otherwise tries a local
//! seed directory (the unpacked "bundled" release variant), and finally
//! downloads from the natives base URL. Whatever the source, the artifact
//! never leaves the fetcher unvalidated.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::digest;
use crate::error::{DistError, Result};
use crate::manifest::ArtifactEntry;

/// Whole-request timeout for artifact downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Retrieves and validates backend artifacts.
#[derive(Debug, Clone)]
pub struct Fetcher {
    base_url: String,
    cache_dir: PathBuf,
    allow_downloads: bool,
    seed_dir: Option<PathBuf>,
}

impl Fetcher {
    /// Create a fetcher downloading from `base_url` into `cache_dir`.
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            base_url,
            cache_dir: cache_dir.into(),
            allow_downloads: true,
            seed_dir: None,
        }
    }

    /// Allow or forbid network downloads. Defaults to allowed.
    pub fn with_downloads(mut self, value: bool) -> Self {
        self.allow_downloads = value;
        self
    }

    /// Consult a local directory of pre-seeded artifacts before the network.
    pub fn with_seed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.seed_dir = Some(dir.into());
        self
    }

    /// Ensure a validated copy of `entry` exists in the cache and return its
    /// path.
    pub fn ensure(&self, entry: &ArtifactEntry) -> Result<PathBuf> {
        let target = self.cache_dir.join(&entry.name);

        if is_valid(&target, &entry.sha512)? {
            debug!(artifact = %entry.name, "using cached artifact");
            return Ok(target);
        }

        fs::create_dir_all(&self.cache_dir)?;

        if let Some(seed_dir) = &self.seed_dir {
            let seed = seed_dir.join(&entry.name);
            if seed.is_file() {
                fs::copy(&seed, &target)?;
                if is_valid(&target, &entry.sha512)? {
                    info!(artifact = %entry.name, "seeded artifact from {}", seed_dir.display());
                    return Ok(target);
                }
                debug!(artifact = %entry.name, "seed copy failed validation, ignoring");
            }
        }

        if !self.allow_downloads {
            return Err(DistError::DownloadsDisabled(entry.name.clone()));
        }

        self.download(entry, &target)?;

        let actual = digest::sha512_file(&target)?;
        if actual != entry.sha512 {
            fs::remove_file(&target).ok();
            return Err(DistError::DigestMismatch {
                name: entry.name.clone(),
                expected: entry.sha512.clone(),
                actual,
            });
        }

        Ok(target)
    }

    /// Validate the cached copy of `entry` without touching the network.
    pub fn verify(&self, entry: &ArtifactEntry) -> Result<PathBuf> {
        let target = self.cache_dir.join(&entry.name);

        if !target.is_file() {
            return Err(DistError::DownloadsDisabled(entry.name.clone()));
        }

        let actual = digest::sha512_file(&target)?;
        if actual != entry.sha512 {
            return Err(DistError::DigestMismatch {
                name: entry.name.clone(),
                expected: entry.sha512.clone(),
                actual,
            });
        }

        Ok(target)
    }

    /// URL an artifact is downloaded from.
    pub fn artifact_url(&self, entry: &ArtifactEntry) -> String {
        format!("{}{}", self.base_url, entry.name)
    }

    fn download(&self, entry: &ArtifactEntry, target: &Path) -> Result<()> {
        let url = self.artifact_url(entry);
        info!(artifact = %entry.name, %url, "downloading backend artifact");

        let agent = ureq::AgentBuilder::new()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent(concat!("battery/", env!("CARGO_PKG_VERSION")))
            .build();

        let response = agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => DistError::Http {
                status,
                url: url.clone(),
            },
            other => DistError::Transport {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;

        let length: u64 = response
            .header("Content-Length")
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| DistError::Transport {
                url: url.clone(),
                message: "missing or invalid Content-Length header".to_string(),
            })?;

        let mut file = NamedTempFile::new_in(&self.cache_dir)?;
        let written = io::copy(&mut response.into_reader().take(length), file.as_file_mut())?;

        if written != length {
            return Err(DistError::Transport {
                url,
                message: format!("truncated download: got {written} of {length} bytes"),
            });
        }

        file.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

fn is_valid(path: &Path, expected: &str) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    Ok(digest::sha512_file(path)? == expected)
}
