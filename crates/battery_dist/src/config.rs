//! Distribution configuration.
//!
//! Coordinates and endpoints live in a small TOML file (`dist.toml`) so the
//! CLI commands share one source of truth. Every field has a default
//! matching the project's published coordinates, so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DistError, Result};

/// Default config file name.
pub const CONFIG_FILENAME: &str = "dist.toml";

/// Distribution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistConfig {
    /// Repository group identifier.
    #[serde(default = "default_group")]
    pub group: String,

    /// Artifact name within the group.
    #[serde(default = "default_artifact")]
    pub artifact: String,

    /// Version of the library artifacts being released.
    #[serde(default = "default_version")]
    pub version: String,

    /// Version of the native backend artifacts.
    #[serde(default = "default_natives_version")]
    pub natives_version: String,

    /// Release repository endpoint for `publish`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL the natives are served from; the natives version is
    /// appended as a path segment.
    #[serde(default = "default_natives_base_url")]
    pub natives_base_url: String,
}

fn default_group() -> String {
    "net.lostluma".to_string()
}

fn default_artifact() -> String {
    "battery".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_natives_version() -> String {
    "1.0.0".to_string()
}

fn default_endpoint() -> String {
    "https://maven.lostluma.net/releases".to_string()
}

fn default_natives_base_url() -> String {
    "https://files.lostluma.net/battery-jni".to_string()
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            artifact: default_artifact(),
            version: default_version(),
            natives_version: default_natives_version(),
            endpoint: default_endpoint(),
            natives_base_url: default_natives_base_url(),
        }
    }
}

impl DistConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DistError::Config(e.to_string()))
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| DistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// URL prefix the current natives version is served from, with a
    /// trailing slash.
    pub fn natives_url(&self) -> String {
        format!(
            "{}/{}/",
            self.natives_base_url.trim_end_matches('/'),
            self.natives_version
        )
    }
}
