//! `battery watch` command.

use anyhow::Result;
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::list;
use super::output::render_table;

/// Poll and reprint battery metrics until interrupted.
pub fn run(interval: u64, sysfs_root: Option<&Path>) -> Result<()> {
    let interval = Duration::from_secs(interval.max(1));

    loop {
        let reports = list::collect(sysfs_root)?;
        if reports.is_empty() {
            println!("No batteries found.");
        } else {
            println!("{}", render_table(&reports));
        }

        thread::sleep(interval);
    }
}
