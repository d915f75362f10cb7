//! The battery manager.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::battery::Battery;
use crate::error::{Error, Result};
use crate::sysfs;

/// Default probe root on Linux.
pub const SYSFS_ROOT: &str = "/sys/class/power_supply";

/// Enumerates and refreshes batteries.
#[derive(Debug, Clone)]
pub struct Manager {
    root: PathBuf,
}

impl Manager {
    /// Create a manager for the running system.
    ///
    /// Fails with [`Error::Unsupported`] on platforms without a built-in
    /// backend, or when the power supply class is unavailable (for example
    /// inside a minimal container).
    pub fn new() -> Result<Self> {
        if cfg!(target_os = "linux") {
            Self::with_sysfs_root(SYSFS_ROOT)
        } else {
            Err(Error::Unsupported(format!(
                "no built-in backend for {}",
                std::env::consts::OS
            )))
        }
    }

    /// Create a manager probing an explicit sysfs-style root directory.
    pub fn with_sysfs_root(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Unsupported(format!(
                "power supply class unavailable at {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Returns the currently available batteries.
    ///
    /// Ordering is not guaranteed and may change on subsequent calls; the
    /// underlying OS enumeration order is passed through as-is.
    pub fn batteries(&self) -> Result<Vec<Battery>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut batteries = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(battery) = sysfs::probe(&path)? {
                batteries.push(battery);
            }
        }

        debug!(count = batteries.len(), root = %self.root.display(), "enumerated batteries");
        Ok(batteries)
    }

    /// Refresh battery information in place.
    pub fn refresh(&self, battery: &mut Battery) -> Result<()> {
        sysfs::refresh(battery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_root_is_unsupported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = Manager::with_sysfs_root(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_enumeration_filters_non_batteries() {
        let root = tempfile::tempdir().expect("create temp dir");

        let bat = root.path().join("BAT0");
        fs::create_dir(&bat).unwrap();
        fs::write(bat.join("type"), "Battery\n").unwrap();
        fs::write(bat.join("status"), "Full\n").unwrap();
        fs::write(bat.join("energy_now"), "45000000\n").unwrap();
        fs::write(bat.join("energy_full"), "45000000\n").unwrap();
        fs::write(bat.join("voltage_now"), "12000000\n").unwrap();

        let ac = root.path().join("AC");
        fs::create_dir(&ac).unwrap();
        fs::write(ac.join("type"), "Mains\n").unwrap();

        let manager = Manager::with_sysfs_root(root.path()).expect("create manager");
        let batteries = manager.batteries().expect("enumerate");
        assert_eq!(batteries.len(), 1);
        assert_eq!(batteries[0].state(), crate::State::Full);
    }

    #[test]
    fn test_empty_root_yields_no_batteries() {
        let root = tempfile::tempdir().expect("create temp dir");
        let manager = Manager::with_sysfs_root(root.path()).expect("create manager");
        assert!(manager.batteries().expect("enumerate").is_empty());
    }
}
