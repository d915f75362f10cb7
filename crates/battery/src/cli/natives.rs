//! `battery natives` commands: consumer-side backend provisioning.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use battery_dist::config::CONFIG_FILENAME;
use battery_dist::manifest::MANIFEST_FILENAME;
use battery_dist::{cache, DistConfig, Fetcher, NativesManifest};

#[derive(Subcommand, Debug)]
pub enum NativesCommand {
    /// Ensure a verified backend artifact for this platform is cached
    Ensure {
        /// Distribution config file
        #[arg(long, value_name = "FILE", default_value = CONFIG_FILENAME)]
        config: PathBuf,

        /// Natives manifest file
        #[arg(long, value_name = "FILE", default_value = MANIFEST_FILENAME)]
        manifest: PathBuf,

        /// Cache directory override
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,

        /// Local directory of pre-seeded artifacts, tried before the network
        #[arg(long, value_name = "DIR")]
        seed_dir: Option<PathBuf>,

        /// Never download; fail unless the cache or seed already satisfies
        #[arg(long)]
        offline: bool,
    },

    /// Validate the cached artifact for this platform without downloading
    Verify {
        /// Natives manifest file
        #[arg(long, value_name = "FILE", default_value = MANIFEST_FILENAME)]
        manifest: PathBuf,

        /// Cache directory override
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },

    /// Regenerate the manifest from a directory of built artifacts
    Index {
        /// Directory of built artifacts, one file per platform key
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        /// Where to write the manifest
        #[arg(long, value_name = "FILE", default_value = MANIFEST_FILENAME)]
        out: PathBuf,

        /// Distribution config file (provides the natives version)
        #[arg(long, value_name = "FILE", default_value = CONFIG_FILENAME)]
        config: PathBuf,
    },
}

pub fn run(command: NativesCommand) -> Result<()> {
    match command {
        NativesCommand::Ensure {
            config,
            manifest,
            cache_dir,
            seed_dir,
            offline,
        } => {
            let config = DistConfig::load_or_default(&config)?;
            let manifest = NativesManifest::load(&manifest)
                .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
            let entry = manifest.entry_for_current_platform()?;

            let cache = cache::cache_dir(cache_dir.as_deref())?;
            let mut fetcher = Fetcher::new(config.natives_url(), cache).with_downloads(!offline);
            if let Some(seed_dir) = seed_dir {
                fetcher = fetcher.with_seed_dir(seed_dir);
            }

            let path = fetcher.ensure(entry)?;
            println!("{}", path.display());
            Ok(())
        }

        NativesCommand::Verify {
            manifest,
            cache_dir,
        } => {
            let manifest = NativesManifest::load(&manifest)
                .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
            let entry = manifest.entry_for_current_platform()?;

            let cache = cache::cache_dir(cache_dir.as_deref())?;
            // The base URL is irrelevant for verification.
            let fetcher = Fetcher::new("https://localhost/", cache).with_downloads(false);

            let path = fetcher.verify(entry)?;
            println!("{} OK", path.display());
            Ok(())
        }

        NativesCommand::Index { dir, out, config } => {
            let config = DistConfig::load_or_default(&config)?;
            let manifest = NativesManifest::index_dir(config.natives_version, &dir)
                .with_context(|| format!("Failed to index {}", dir.display()))?;
            manifest.save(&out)?;
            println!(
                "Indexed {} artifacts into {}",
                manifest.targets.len(),
                out.display()
            );
            Ok(())
        }
    }
}
