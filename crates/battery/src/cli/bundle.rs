//! `battery bundle` command.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use battery_dist::write_bundle;

pub fn run(library_dir: &Path, artifacts: &[PathBuf], out: &Path) -> Result<()> {
    let summary = write_bundle(library_dir, artifacts, out)
        .with_context(|| format!("Failed to bundle {}", library_dir.display()))?;

    println!(
        "Wrote {} ({} entries)",
        summary.path.display(),
        summary.entries
    );
    println!("SHA-512: {}", summary.sha512);
    Ok(())
}
