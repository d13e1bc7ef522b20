//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config::{DEFAULT_SEGMENT_LENGTH, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

/// Clamp the watchdog to something sane (one second to one day)
fn timeout_in_range(s: &str) -> Result<u64, String> {
    clap_num::number_range(s, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the segments
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Segment length in seconds
    #[arg(short = 'l', long)]
    pub segment_length: Option<f64>,

    /// Export mode (reencode or copy)
    #[arg(long)]
    pub mode: Option<String>,

    /// Naming scheme for segment files (indexed or range)
    #[arg(long)]
    pub naming: Option<String>,

    /// Duration resolution strategy (metadata or diagnostic)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Video codec for re-encode mode
    #[arg(long)]
    pub video_codec: Option<String>,

    /// Audio codec for re-encode mode
    #[arg(long)]
    pub audio_codec: Option<String>,

    /// Per-segment watchdog in seconds (1-86400)
    #[arg(long, value_parser = timeout_in_range)]
    pub timeout: Option<u64>,

    /// Built-in profile to start from (archive or shorts)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// TOML configuration file to start from
    #[arg(short, long, conflicts_with = "profile")]
    pub config: Option<PathBuf>,

    /// Print the job summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Duration resolution strategy (metadata or diagnostic)
    #[arg(long, default_value = "metadata")]
    pub strategy: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Segment length in seconds
    #[arg(short = 'l', long, default_value_t = DEFAULT_SEGMENT_LENGTH)]
    pub segment_length: f64,

    /// Naming scheme for segment files (indexed or range)
    #[arg(long, default_value = "range")]
    pub naming: String,

    /// Duration resolution strategy (metadata or diagnostic)
    #[arg(long, default_value = "metadata")]
    pub strategy: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
