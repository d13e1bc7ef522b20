//! Metadata strategy: structured container probing
//!
//! Asks the prober for the container's declared duration field via its JSON
//! output. Preferred when container metadata is trustworthy; fails fast
//! when the container cannot be opened or the field is absent or zero.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{SliceError, SliceResult};
use crate::probe::{DurationResolver, MediaDuration};
use crate::transcoder::Transcoder;

/// Duration resolver backed by the prober's JSON metadata output
pub struct MetadataProbe {
    transcoder: Transcoder,
}

impl MetadataProbe {
    pub fn new(transcoder: Transcoder) -> Self {
        Self { transcoder }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[async_trait]
impl DurationResolver for MetadataProbe {
    async fn resolve(&self, input: &Path) -> SliceResult<MediaDuration> {
        if !input.exists() {
            return Err(SliceError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        let ffprobe = self.transcoder.ffprobe_path()?;
        debug!("metadata probe: {} {}", ffprobe.display(), input.display());

        let output = Command::new(&ffprobe)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SliceError::transcoder_unavailable("ffprobe", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SliceError::duration_unavailable(
                input.display().to_string(),
                format!("prober exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout).map_err(|e| {
            SliceError::duration_unavailable(
                input.display().to_string(),
                format!("unreadable metadata: {e}"),
            )
        })?;

        probe
            .format
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .and_then(MediaDuration::from_secs)
            .ok_or_else(|| {
                SliceError::duration_unavailable(
                    input.display().to_string(),
                    "metadata carries no usable duration field",
                )
            })
    }
}
