//! Artifact distribution for the battery backend.
//!
//! The native probing backend is built per platform and distributed through a
//! static file server, while release jars go to a Maven-style repository.
//! This crate implements both sides of that pipeline:
//!
//! - [`digest`]: SHA-512 content hashing used for all artifact validation
//! - [`manifest`]: the natives manifest mapping platform keys to artifacts
//! - [`cache`]: per-OS cache directory resolution for downloaded artifacts
//! - [`fetch`]: consumer-side verified retrieval (seed dir, cache, download)
//! - [`bundle`]: reproducible ZIP assembly for the "bundled" release variant
//! - [`publish`]: uploading artifacts plus digests to the release repository
//! - [`config`]: TOML distribution config with the project's coordinates

pub mod bundle;
pub mod cache;
pub mod config;
pub mod digest;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod publish;

pub use bundle::{write_bundle, BundleSummary};
pub use config::DistConfig;
pub use error::{DistError, Result};
pub use fetch::Fetcher;
pub use manifest::{platform_key, ArtifactEntry, NativesManifest};
pub use publish::{Credentials, Publisher};
