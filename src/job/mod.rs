//! Job orchestration
//!
//! Runs one segmentation job end to end: validate the input, prepare the
//! output directory, preflight the transcoder, resolve the duration, plan
//! the windows, then export them one at a time. A failed segment is
//! recorded and the job moves on; only the gates ahead of segment work
//! can abort the job.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::SliceConfig;
use crate::engine::{ExportResult, ExportStatus, SegmentExporter};
use crate::error::{SliceError, SliceResult};
use crate::output::ensure_output_dir;
use crate::planner;
use crate::probe::resolver_for;
use crate::transcoder::Transcoder;

/// Outcome of a completed segmentation job
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    /// Input file the job ran against
    pub input: PathBuf,
    /// Directory the segments were written to
    pub output_dir: PathBuf,
    /// Window length the plan was built with
    pub segment_length: f64,
    /// Resolved input duration in seconds
    pub total_duration: f64,
    /// One result per planned segment, in plan order
    pub results: Vec<ExportResult>,
    /// When the job started
    pub started_at: DateTime<Utc>,
    /// When the job finished
    pub finished_at: DateTime<Utc>,
}

impl JobSummary {
    /// Number of segments that exported cleanly
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of segments that failed or were skipped
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// True when every planned segment exported cleanly
    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Driver for one segmentation job
pub struct JobDriver {
    config: SliceConfig,
}

impl JobDriver {
    /// Create a driver over merged configuration
    pub fn new(config: SliceConfig) -> Self {
        Self { config }
    }

    /// Run the job end to end.
    ///
    /// Errors out of here are fatal gate failures only. Once segment work
    /// begins, every per-segment outcome lands in the summary and the job
    /// always runs to the last planned window.
    pub async fn run(&self, input: &Path) -> SliceResult<JobSummary> {
        let started_at = Utc::now();

        if !input.exists() {
            return Err(SliceError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        ensure_output_dir(&self.config.output_dir)?;

        let transcoder = Transcoder::locate(
            self.config.ffmpeg_path.as_deref(),
            self.config.ffprobe_path.as_deref(),
        )?;
        transcoder.preflight().await?;

        info!(
            "resolving duration of {} via {} probe",
            input.display(),
            self.config.strategy.as_str()
        );
        let resolver = resolver_for(self.config.strategy, transcoder.clone());
        let duration = resolver.resolve(input).await?;
        info!("input runs {duration}");

        let plan = planner::plan(duration, self.config.segment_length)?;
        info!(
            "splitting into {} segments of {}s each",
            plan.len(),
            self.config.segment_length
        );

        let mut exporter =
            SegmentExporter::new(transcoder, self.config.mode, self.config.encoding());
        if let Some(secs) = self.config.timeout_secs {
            exporter = exporter.with_timeout(secs);
        }

        let total = plan.len();
        let mut results = Vec::with_capacity(total);
        for spec in &plan.segments {
            let file_name = self.config.naming.file_name(spec);
            let output_path = self.config.output_dir.join(&file_name);

            info!(
                "exporting segment {}/{}: {} ({:.2}s - {:.2}s)",
                spec.index, total, file_name, spec.start, spec.end
            );
            let result = exporter.export(input, spec, &output_path).await;

            match &result.status {
                ExportStatus::Success => {
                    info!("segment {}/{} exported", spec.index, total);
                }
                ExportStatus::TranscoderFailed {
                    exit_code,
                    diagnostic,
                } => {
                    error!(
                        "segment {}/{} failed (exit code {:?}): {}",
                        spec.index,
                        total,
                        exit_code,
                        diagnostic.trim_end()
                    );
                }
                ExportStatus::SkippedError { message } => {
                    error!("segment {}/{} skipped: {}", spec.index, total, message);
                }
            }
            results.push(result);
        }

        let summary = JobSummary {
            input: input.to_path_buf(),
            output_dir: self.config.output_dir.clone(),
            segment_length: self.config.segment_length,
            total_duration: duration.as_secs(),
            results,
            started_at,
            finished_at: Utc::now(),
        };

        if summary.is_complete_success() {
            info!(
                "all {} segments exported to {}",
                total,
                self.config.output_dir.display()
            );
        } else {
            warn!(
                "{} of {} segments failed, see the log above",
                summary.failed(),
                total
            );
        }

        Ok(summary)
    }
}
