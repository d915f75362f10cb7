//! `battery publish` command.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use battery_dist::{Credentials, DistConfig, Publisher};

pub fn run(files: &[PathBuf], config: &Path, username: Option<String>) -> Result<()> {
    let config = DistConfig::load_or_default(config)?;
    let credentials = Credentials::resolve(username, None)?;
    let publisher = Publisher::new(config, credentials);

    for file in files {
        let url = publisher
            .publish_file(file)
            .with_context(|| format!("Failed to publish {}", file.display()))?;
        println!("Published {url}");
    }

    Ok(())
}
