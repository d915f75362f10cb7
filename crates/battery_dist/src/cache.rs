//! Cache directory resolution for downloaded artifacts.
//!
//! Resolution order: explicit override, then the `BATTERY_CACHE_DIR`
//! environment variable, then the platform's user cache directory
//! (`%LOCALAPPDATA%`, `~/Library/Caches`, or `$XDG_CACHE_HOME` falling back
//! to `~/.cache`) with a `net.lostluma.battery` subdirectory. Overrides are
//! used as-is, without the subdirectory.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{DistError, Result};

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "BATTERY_CACHE_DIR";

const CACHE_SUBDIR: &str = "net.lostluma.battery";

/// Resolve the artifact cache directory. The directory is not created here.
pub fn cache_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = env::var_os(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::cache_dir()
        .map(|base| base.join(CACHE_SUBDIR))
        .ok_or_else(|| {
            DistError::Config("could not determine the user cache directory".to_string())
        })
}
