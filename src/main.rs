//! Abdullaheid-Chef main entry point
//!
//! This is the command-line interface for the abdullaheid.net content chef.

use abdullaheid_chef::config::{load_config_with_hash, validate, Config};
use abdullaheid_chef::{Chef, SectionRange, YtDlp};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Abdullaheid-Chef: content ingestion for abdullaheid.net
///
/// Walks the section blocks of the homepage, downloads the linked YouTube
/// videos with yt-dlp, and writes a JSON content tree for the packaging
/// pipeline.
#[derive(Parser, Debug)]
#[command(name = "abdullaheid-chef")]
#[command(version)]
#[command(about = "Content ingestion for abdullaheid.net", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Sections to process: "from:to", ":to", "from:" or a single number
    #[arg(long, value_name = "RANGE")]
    only_section: Option<SectionRange>,

    /// 0 walks the page without downloading videos
    #[arg(long, value_name = "0|1", value_parser = clap::value_parser!(u8).range(0..=1))]
    download_video: Option<u8>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(flag) = cli.download_video {
        config.video.enabled = flag == 1;
    }
    validate(&config)?;

    let backend = YtDlp::new(config.video.backend.clone(), config.video.max_height);
    let chef = Chef::new(config, &backend)?;

    match chef.run(cli.only_section.unwrap_or_default()).await {
        Ok(channel) => {
            tracing::info!(
                "Channel '{}' ready with {} topics",
                channel.title,
                channel.children.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("abdullaheid_chef=info,warn"),
            1 => EnvFilter::new("abdullaheid_chef=debug,info"),
            2 => EnvFilter::new("abdullaheid_chef=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
