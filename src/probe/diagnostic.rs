//! Probe strategy: diagnostic-stream scraping
//!
//! Runs the transcoder with a null sink and scans its stderr for the first
//! line containing the `Duration` marker, then parses the clock token
//! between the marker and the following comma. This is a textual contract
//! with the external tool, not a structured API, so it is best-effort: any
//! text that fails to parse is logged verbatim for diagnosis.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{SliceError, SliceResult};
use crate::probe::{DurationResolver, MediaDuration};
use crate::transcoder::Transcoder;
use crate::utils::time::parse_clock;

/// Literal marker the diagnostic stream is scanned for
const DURATION_MARKER: &str = "Duration";

/// Duration resolver that scrapes the transcoder's diagnostic stream
pub struct DiagnosticProbe {
    transcoder: Transcoder,
}

impl DiagnosticProbe {
    pub fn new(transcoder: Transcoder) -> Self {
        Self { transcoder }
    }
}

/// First line of the dump containing the marker, if any.
///
/// Containers can embed the marker more than once (chapter metadata); the
/// first occurrence wins, matching the scrape this grew out of.
fn find_duration_line(diagnostic: &str) -> Option<&str> {
    diagnostic.lines().find(|line| line.contains(DURATION_MARKER))
}

/// Seconds encoded in a marker line, `None` when the token does not parse.
fn parse_duration_line(line: &str) -> Option<f64> {
    let after_marker = line.split_once("Duration:")?.1;
    let token = after_marker.split(',').next()?;
    parse_clock(token)
}

#[async_trait]
impl DurationResolver for DiagnosticProbe {
    async fn resolve(&self, input: &Path) -> SliceResult<MediaDuration> {
        if !input.exists() {
            return Err(SliceError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        let ffmpeg = self.transcoder.ffmpeg_path();
        debug!("diagnostic probe: {} -i {} -f null -", ffmpeg.display(), input.display());

        // Null-sink run; only the stderr text matters. The exit status is
        // deliberately not consulted: the scrape predates it and a failed
        // run can still print a usable Duration line.
        let output = Command::new(ffmpeg)
            .arg("-i")
            .arg(input)
            .args(["-f", "null", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SliceError::transcoder_unavailable("ffmpeg", e.to_string()))?;

        let diagnostic = String::from_utf8_lossy(&output.stderr);

        let Some(line) = find_duration_line(&diagnostic) else {
            warn!(
                "no duration marker in diagnostic output for {}",
                input.display()
            );
            return Err(SliceError::duration_unavailable(
                input.display().to_string(),
                "diagnostic output carries no Duration line",
            ));
        };

        match parse_duration_line(line).and_then(MediaDuration::from_secs) {
            Some(duration) => {
                debug!("scraped duration {duration} from: {line}");
                Ok(duration)
            }
            None => {
                warn!("no usable duration in line: {line}");
                Err(SliceError::duration_unavailable(
                    input.display().to_string(),
                    format!("no usable duration in line: {line:?}"),
                ))
            }
        }
    }
}
