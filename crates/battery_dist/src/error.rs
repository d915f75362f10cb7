//! Error types for the distribution pipeline.

use std::io;
use thiserror::Error;

/// Distribution error type.
#[derive(Error, Debug)]
pub enum DistError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP status {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Digest mismatch for {name}: expected {expected}, got {actual}")]
    DigestMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("No artifact published for platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("Downloads are disabled and no valid cached copy of '{0}' exists")]
    DownloadsDisabled(String),

    #[error("Missing credentials: set {0} and {1}")]
    MissingCredentials(&'static str, &'static str),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Bundle error: {0}")]
    Bundle(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, DistError>;
