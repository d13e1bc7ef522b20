//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::args::{PlanArgs, ProbeArgs, SplitArgs};
use crate::cli::Cli;
use crate::config::SliceConfig;
use crate::engine::{ExportMode, ExportStatus};
use crate::error::SliceError;
use crate::job::{JobDriver, JobSummary};
use crate::output::NamingScheme;
use crate::planner;
use crate::probe::{resolver_for, DurationStrategy};
use crate::transcoder::Transcoder;

/// Execute the split command
pub async fn split(cli: &Cli, args: &SplitArgs) -> Result<()> {
    let config = merge_config(args, cli.ffmpeg_path.as_deref(), cli.ffprobe_path.as_deref())?;

    info!("Starting split operation");
    info!("Input: {}", args.input.display());
    info!("Output directory: {}", config.output_dir.display());
    info!("Segment length: {}s", config.segment_length);
    info!("Mode: {}", config.mode.as_str());

    let driver = JobDriver::new(config);
    let summary = driver.run(&args.input).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize job summary to JSON")?;
        println!("{}", json);
    } else {
        display_summary(&summary);
    }

    info!("Split operation completed");
    Ok(())
}

/// Execute the probe command
pub async fn probe(cli: &Cli, args: &ProbeArgs) -> Result<()> {
    info!("Starting probe operation");
    info!("Input: {}", args.input.display());

    if !args.input.exists() {
        return Err(SliceError::InputNotFound {
            path: args.input.display().to_string(),
        }
        .into());
    }

    let strategy = DurationStrategy::parse(&args.strategy)?;
    let transcoder = Transcoder::locate(cli.ffmpeg_path.as_deref(), cli.ffprobe_path.as_deref())?;
    let resolver = resolver_for(strategy, transcoder);
    let duration = resolver.resolve(&args.input).await?;

    if args.json {
        let report = ProbeReport {
            input: args.input.clone(),
            strategy: strategy.as_str(),
            duration_seconds: duration.as_secs(),
            duration_clock: duration.to_string(),
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize probe report to JSON")?;
        println!("{}", json);
    } else {
        println!("Duration: {} ({:.3}s)", duration, duration.as_secs());
    }

    Ok(())
}

/// Execute the plan command
pub async fn plan(cli: &Cli, args: &PlanArgs) -> Result<()> {
    info!("Starting plan operation");
    info!("Input: {}", args.input.display());

    if !args.input.exists() {
        return Err(SliceError::InputNotFound {
            path: args.input.display().to_string(),
        }
        .into());
    }

    let strategy = DurationStrategy::parse(&args.strategy)?;
    let naming = NamingScheme::parse(&args.naming)?;
    let transcoder = Transcoder::locate(cli.ffmpeg_path.as_deref(), cli.ffprobe_path.as_deref())?;
    let resolver = resolver_for(strategy, transcoder);
    let duration = resolver.resolve(&args.input).await?;

    let plan = planner::plan(duration, args.segment_length)?;
    let segments = plan
        .segments
        .iter()
        .map(|spec| PlannedSegment {
            index: spec.index,
            start: spec.start,
            end: spec.end,
            file_name: naming.file_name(spec),
        })
        .collect();

    let report = PlanReport {
        input: args.input.clone(),
        total_duration: duration.as_secs(),
        segment_length: args.segment_length,
        segments,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize segment plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&report);
    }

    Ok(())
}

/// Merge configuration following precedence: CLI flags > file or profile > defaults
fn merge_config(
    args: &SplitArgs,
    ffmpeg_path: Option<&Path>,
    ffprobe_path: Option<&Path>,
) -> Result<SliceConfig> {
    let mut config = if let Some(path) = &args.config {
        SliceConfig::load(path)?
    } else if let Some(name) = &args.profile {
        SliceConfig::profile(name)?
    } else {
        SliceConfig::default()
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(length) = args.segment_length {
        config.segment_length = length;
    }
    if let Some(mode) = &args.mode {
        config.mode = ExportMode::parse(mode)?;
    }
    if let Some(naming) = &args.naming {
        config.naming = NamingScheme::parse(naming)?;
    }
    if let Some(strategy) = &args.strategy {
        config.strategy = DurationStrategy::parse(strategy)?;
    }
    if let Some(codec) = &args.video_codec {
        config.video_codec = codec.clone();
    }
    if let Some(codec) = &args.audio_codec {
        config.audio_codec = codec.clone();
    }
    if args.timeout.is_some() {
        config.timeout_secs = args.timeout;
    }
    if let Some(path) = ffmpeg_path {
        config.ffmpeg_path = Some(path.to_path_buf());
    }
    if let Some(path) = ffprobe_path {
        config.ffprobe_path = Some(path.to_path_buf());
    }

    config.validate()?;
    Ok(config)
}

/// Report printed by the probe command
#[derive(Serialize)]
struct ProbeReport {
    input: PathBuf,
    strategy: &'static str,
    duration_seconds: f64,
    duration_clock: String,
}

/// One row of the plan report
#[derive(Serialize)]
struct PlannedSegment {
    index: u32,
    start: f64,
    end: f64,
    file_name: String,
}

/// Report printed by the plan command
#[derive(Serialize)]
struct PlanReport {
    input: PathBuf,
    total_duration: f64,
    segment_length: f64,
    segments: Vec<PlannedSegment>,
}

/// Display the job summary in human-readable format
fn display_summary(summary: &JobSummary) {
    println!("Job Summary");
    println!("===========");
    println!("Input: {}", summary.input.display());
    println!("Duration: {:.2}s", summary.total_duration);
    println!("Output directory: {}", summary.output_dir.display());
    println!(
        "Segments: {} exported, {} failed (of {})",
        summary.succeeded(),
        summary.failed(),
        summary.results.len()
    );
    println!();

    for result in &summary.results {
        let marker = if result.is_success() { "✓" } else { "✗" };
        print!("  {} {}", marker, result.output_path.display());
        match &result.status {
            ExportStatus::Success => println!(),
            ExportStatus::TranscoderFailed { exit_code, .. } => match exit_code {
                Some(code) => println!(" (transcoder exit code {code})"),
                None => println!(" (transcoder killed)"),
            },
            ExportStatus::SkippedError { message } => println!(" ({message})"),
        }
    }
}

/// Display the segment plan in human-readable format
fn display_plan(report: &PlanReport) {
    println!("Segment Plan");
    println!("============");
    println!("Input: {}", report.input.display());
    println!("Duration: {:.2}s", report.total_duration);
    println!("Segment length: {}s", report.segment_length);
    println!("Segments: {}", report.segments.len());
    println!();

    for segment in &report.segments {
        println!(
            "  {:>3}. {}  {:.2}s - {:.2}s",
            segment.index, segment.file_name, segment.start, segment.end
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_split_args() -> SplitArgs {
        SplitArgs {
            input: PathBuf::from("input.mp4"),
            output_dir: None,
            segment_length: None,
            mode: None,
            naming: None,
            strategy: None,
            video_codec: None,
            audio_codec: None,
            timeout: None,
            profile: None,
            config: None,
            json: false,
        }
    }

    #[test]
    fn test_merge_defaults_to_archive_profile() {
        let config = merge_config(&bare_split_args(), None, None).unwrap();
        assert_eq!(config.segment_length, 900.0);
        assert_eq!(config.mode, ExportMode::Reencode);
        assert_eq!(config.output_dir, PathBuf::from("output_clips"));
    }

    #[test]
    fn test_cli_flags_override_profile() {
        let mut args = bare_split_args();
        args.profile = Some("shorts".to_string());
        args.segment_length = Some(120.0);
        args.naming = Some("range".to_string());

        let config = merge_config(&args, None, None).unwrap();
        assert_eq!(config.segment_length, 120.0);
        assert_eq!(config.naming, NamingScheme::IndexedRange);
        // Keys the flags never touched keep the profile values
        assert_eq!(config.mode, ExportMode::Copy);
        assert_eq!(config.strategy, DurationStrategy::Diagnostic);
    }

    #[test]
    fn test_tool_paths_land_in_config() {
        let config = merge_config(
            &bare_split_args(),
            Some(Path::new("/opt/ffmpeg/bin/ffmpeg")),
            None,
        )
        .unwrap();
        assert_eq!(
            config.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
        assert!(config.ffprobe_path.is_none());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let mut args = bare_split_args();
        args.mode = Some("fastest".to_string());
        assert!(merge_config(&args, None, None).is_err());
    }
}
