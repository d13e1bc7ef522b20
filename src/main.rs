//! vidslice
//!
//! A command-line tool that splits long videos into fixed-length segments
//! by driving the external ffmpeg toolchain, one child process per segment.
//!
//! # Features
//!
//! - Fixed-length windowing over the full input duration
//! - Re-encode or lossless stream-copy export per segment
//! - Metadata (ffprobe) or diagnostic (ffmpeg banner) duration probes
//! - Per-segment failure tolerance, the job always runs to the end
//!
//! # Usage
//!
//! ```bash
//! vidslice split --input lecture.mp4
//! vidslice split --input talk.mkv --profile shorts
//! vidslice probe --input lecture.mp4 --strategy diagnostic
//! vidslice plan --input lecture.mp4 --segment-length 300 --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vidslice_cli::cli::{commands, Cli, Commands};

/// Main entry point for the vidslice CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, RUST_LOG wins over --log-level when both are set.
    // Logs go to stderr so that --json output on stdout stays parseable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting vidslice");

    // Execute the requested command
    match &cli.command {
        Commands::Split(args) => commands::split(&cli, args).await?,
        Commands::Probe(args) => commands::probe(&cli, args).await?,
        Commands::Plan(args) => commands::plan(&cli, args).await?,
    }

    info!("vidslice completed successfully");
    Ok(())
}
