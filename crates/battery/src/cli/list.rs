//! `battery list` command.

use anyhow::{Context, Result};
use battery::Manager;
use std::path::Path;

use super::output::{render_table, BatteryReport};

pub fn run(json: bool, sysfs_root: Option<&Path>) -> Result<()> {
    let reports = collect(sysfs_root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if reports.is_empty() {
        println!("No batteries found.");
    } else {
        println!("{}", render_table(&reports));
    }

    Ok(())
}

pub(crate) fn collect(sysfs_root: Option<&Path>) -> Result<Vec<BatteryReport>> {
    let manager = match sysfs_root {
        Some(root) => Manager::with_sysfs_root(root),
        None => Manager::new(),
    }
    .context("Failed to create battery manager")?;

    let batteries = manager.batteries().context("Failed to enumerate batteries")?;
    Ok(batteries.iter().map(BatteryReport::from).collect())
}
