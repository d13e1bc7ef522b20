//! CLI module for vidslice
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// vidslice
///
/// A command-line tool that splits long videos into fixed-length segments
/// by driving the external ffmpeg toolchain, one child process per segment.
#[derive(Parser)]
#[command(name = "vidslice")]
#[command(about = "Split long videos into fixed-length segments")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Explicit ffmpeg binary, PATH lookup otherwise
    #[arg(long, env = "VIDSLICE_FFMPEG", global = true)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe binary, PATH lookup otherwise
    #[arg(long, env = "VIDSLICE_FFPROBE", global = true)]
    pub ffprobe_path: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Split a video into fixed-length segments
    Split(args::SplitArgs),
    /// Resolve and print the duration of a video
    Probe(args::ProbeArgs),
    /// Print the segment plan without exporting anything
    Plan(args::PlanArgs),
}
