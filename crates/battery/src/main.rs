//! Unified `battery` CLI.
//!
//! Inspection commands (`list`, `watch`) read batteries through the library
//! backend; distribution commands (`natives`, `bundle`, `publish`) drive
//! the backend artifact pipeline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

const DEFAULT_LOG_FILTER: &str = "battery=info,battery_dist=info";

#[derive(Parser, Debug)]
#[command(
    name = "battery",
    version,
    about = "Inspect system batteries and manage backend artifact distribution"
)]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show all batteries and their current metrics
    List {
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Probe an alternate power supply root (defaults to the system one)
        #[arg(long, value_name = "PATH")]
        sysfs_root: Option<PathBuf>,
    },

    /// Poll batteries and reprint their metrics on an interval
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 2)]
        interval: u64,

        /// Probe an alternate power supply root (defaults to the system one)
        #[arg(long, value_name = "PATH")]
        sysfs_root: Option<PathBuf>,
    },

    /// Manage native backend artifacts (ensure, verify, index)
    Natives {
        #[command(subcommand)]
        command: cli::natives::NativesCommand,
    },

    /// Assemble the reproducible bundled archive
    Bundle {
        /// Directory whose contents land at the archive root
        #[arg(long, value_name = "DIR")]
        library_dir: PathBuf,

        /// Additional artifact files to include (repeatable)
        #[arg(long = "artifact", value_name = "FILE")]
        artifacts: Vec<PathBuf>,

        /// Output archive path
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Upload artifacts and their digests to the release repository
    Publish {
        /// Artifact files to upload
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Distribution config file
        #[arg(long, value_name = "FILE", default_value = battery_dist::config::CONFIG_FILENAME)]
        config: PathBuf,

        /// Repository username (falls back to BATTERY_PUBLISH_USERNAME)
        #[arg(long)]
        username: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { json, sysfs_root } => cli::list::run(json, sysfs_root.as_deref()),
        Commands::Watch {
            interval,
            sysfs_root,
        } => cli::watch::run(interval, sysfs_root.as_deref()),
        Commands::Natives { command } => cli::natives::run(command),
        Commands::Bundle {
            library_dir,
            artifacts,
            out,
        } => cli::bundle::run(&library_dir, &artifacts, &out),
        Commands::Publish {
            files,
            config,
            username,
        } => cli::publish::run(&files, &config, username),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "battery=debug,battery_dist=debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so JSON output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
