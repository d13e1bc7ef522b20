//! Sequential segment export
//!
//! One transcoder child process per segment, supervised to completion.
//! Every outcome, including a spawn failure, lands in an [`ExportResult`];
//! nothing here propagates an error, so a bad segment can never stop the
//! rest of the job.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::engine::{EncodingSettings, ExportCommand, ExportMode, ExportResult, ExportStatus};
use crate::planner::SegmentSpec;
use crate::transcoder::Transcoder;

/// Exporter for the segments of one job
pub struct SegmentExporter {
    transcoder: Transcoder,
    mode: ExportMode,
    encoding: EncodingSettings,
    timeout_secs: Option<u64>,
}

impl SegmentExporter {
    pub fn new(transcoder: Transcoder, mode: ExportMode, encoding: EncodingSettings) -> Self {
        Self {
            transcoder,
            mode,
            encoding,
            timeout_secs: None,
        }
    }

    /// Arm the per-segment watchdog. On expiry the child is killed and the
    /// segment recorded as failed instead of blocking the job forever.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Export one segment to `output_path`.
    ///
    /// Never retries, never errors: the classification of the attempt is
    /// the return value.
    pub async fn export(&self, input: &Path, spec: &SegmentSpec, output_path: &Path) -> ExportResult {
        let command = ExportCommand::new(
            input,
            output_path,
            spec,
            self.mode,
            self.encoding.clone(),
        );
        let args = command.build_args();
        debug!("transcoder argv: {}", args.join(" "));

        let status = self.run_transcoder(&args).await;

        ExportResult {
            spec: spec.clone(),
            output_path: output_path.to_path_buf(),
            status,
        }
    }

    async fn run_transcoder(&self, args: &[String]) -> ExportStatus {
        let mut child = match Command::new(self.transcoder.ffmpeg_path())
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return ExportStatus::SkippedError {
                    message: format!("failed to spawn transcoder: {e}"),
                }
            }
        };

        // Drain stderr concurrently so the child never stalls on a full
        // pipe. The drain is byte-level: transcoder diagnostics are not
        // guaranteed to be valid UTF-8, and a decoder bailing early would
        // close the pipe while the child is still writing to it.
        let stderr = child.stderr.take();
        let capture = tokio::spawn(async move {
            let mut raw = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut raw).await;
            }
            String::from_utf8_lossy(&raw).into_owned()
        });

        let waited = match self.timeout_secs {
            Some(secs) => {
                match tokio::time::timeout(Duration::from_secs(secs), child.wait()).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("transcoder timed out after {secs}s, killing process");
                        let _ = child.kill().await;
                        let diagnostic = capture.await.unwrap_or_default();
                        return ExportStatus::TranscoderFailed {
                            exit_code: None,
                            diagnostic: format!("killed after {secs}s watchdog timeout\n{diagnostic}"),
                        };
                    }
                }
            }
            None => child.wait().await,
        };

        let diagnostic = capture.await.unwrap_or_default();

        match waited {
            Ok(status) if status.success() => ExportStatus::Success,
            Ok(status) => ExportStatus::TranscoderFailed {
                exit_code: status.code(),
                diagnostic,
            },
            Err(e) => ExportStatus::SkippedError {
                message: format!("failed waiting on transcoder: {e}"),
            },
        }
    }
}
