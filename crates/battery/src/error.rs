//! Error types for the battery library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Battery error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Platform is not supported: {0}")]
    Unsupported(String),

    #[error("Battery device is no longer present: {}", .0.display())]
    DeviceGone(PathBuf),

    #[error("Malformed value {value:?} in {}", path.display())]
    Malformed { path: PathBuf, value: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
