//! Publishing artifacts to the release repository.
//!
//! The repository uses the Maven path layout: the group's dots become path
//! segments, followed by artifact name, version, and file name. Every file
//! is uploaded with HTTP Basic auth and accompanied by a sibling `.sha512`
//! digest file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use base64::Engine as _;
use tracing::info;

use crate::config::DistConfig;
use crate::digest;
use crate::error::{DistError, Result};

/// Environment variable holding the repository username.
pub const USERNAME_ENV: &str = "BATTERY_PUBLISH_USERNAME";
/// Environment variable holding the repository password.
pub const PASSWORD_ENV: &str = "BATTERY_PUBLISH_PASSWORD";

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Repository credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Resolve credentials from explicit values, falling back to the
    /// `BATTERY_PUBLISH_USERNAME` / `BATTERY_PUBLISH_PASSWORD` environment
    /// variables.
    pub fn resolve(username: Option<String>, password: Option<String>) -> Result<Self> {
        let username = username.or_else(|| non_empty_env(USERNAME_ENV));
        let password = password.or_else(|| non_empty_env(PASSWORD_ENV));

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(DistError::MissingCredentials(USERNAME_ENV, PASSWORD_ENV)),
        }
    }

    /// Resolve credentials from the environment only.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Uploads release artifacts.
#[derive(Debug)]
pub struct Publisher {
    config: DistConfig,
    credentials: Credentials,
    agent: ureq::Agent,
}

impl Publisher {
    pub fn new(config: DistConfig, credentials: Credentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(UPLOAD_TIMEOUT)
            .user_agent(concat!("battery/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            config,
            credentials,
            agent,
        }
    }

    /// Repository URL for one published file.
    pub fn artifact_url(&self, file_name: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.group.replace('.', "/"),
            self.config.artifact,
            self.config.version,
            file_name
        )
    }

    /// Upload one artifact file and its `.sha512` digest.
    pub fn publish_file(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DistError::Config(format!("artifact has no file name: {}", path.display()))
            })?;

        let bytes = fs::read(path)?;
        let sha512 = digest::sha512(&bytes);

        let url = self.artifact_url(name);
        self.put(&url, &bytes)?;
        self.put(&format!("{url}.sha512"), sha512.as_bytes())?;

        info!(artifact = name, %url, "published artifact");
        Ok(url)
    }

    fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        self.agent
            .put(url)
            .set("Authorization", &self.credentials.basic_auth_header())
            .set("Content-Type", "application/octet-stream")
            .send_bytes(body)
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => DistError::Http {
                    status,
                    url: url.to_string(),
                },
                other => DistError::Transport {
                    url: url.to_string(),
                    message: other.to_string(),
                },
            })?;

        Ok(())
    }
}
