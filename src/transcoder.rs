//! Transcoder toolchain discovery and preflight
//!
//! Locates the external ffmpeg/ffprobe binaries, preferring explicitly
//! configured paths over a PATH lookup, and runs the version-query
//! preflight every job starts with.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{SliceError, SliceResult};

/// Handle to the external transcoder binaries for one job
#[derive(Debug, Clone)]
pub struct Transcoder {
    ffmpeg: PathBuf,
    ffprobe_override: Option<PathBuf>,
}

impl Transcoder {
    /// Locate the transcoder binary.
    ///
    /// The ffmpeg binary is resolved eagerly since every job needs it;
    /// ffprobe is only resolved when the metadata strategy asks for it.
    pub fn locate(ffmpeg_path: Option<&Path>, ffprobe_path: Option<&Path>) -> SliceResult<Self> {
        Ok(Self {
            ffmpeg: resolve_tool("ffmpeg", ffmpeg_path)?,
            ffprobe_override: ffprobe_path.map(Path::to_path_buf),
        })
    }

    /// Path to the ffmpeg binary
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg
    }

    /// Path to the ffprobe binary, resolved on demand
    pub fn ffprobe_path(&self) -> SliceResult<PathBuf> {
        resolve_tool("ffprobe", self.ffprobe_override.as_deref())
    }

    /// Version-query preflight against the transcoder binary.
    ///
    /// A spawn failure or non-zero exit means the binary is missing or
    /// broken; either way the job must not start segment work.
    pub async fn preflight(&self) -> SliceResult<()> {
        let output = Command::new(&self.ffmpeg)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SliceError::transcoder_unavailable("ffmpeg", e.to_string()))?;

        if output.status.success() {
            debug!("transcoder preflight passed: {}", self.ffmpeg.display());
            Ok(())
        } else {
            Err(SliceError::transcoder_unavailable(
                "ffmpeg",
                format!("version query exited with {}", output.status),
            ))
        }
    }
}

/// Resolve a tool path: configured location first, PATH lookup otherwise.
fn resolve_tool(name: &str, configured: Option<&Path>) -> SliceResult<PathBuf> {
    match configured {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => Err(SliceError::transcoder_unavailable(
            name,
            format!("configured path does not exist: {}", path.display()),
        )),
        None => which::which(name)
            .map_err(|_| SliceError::transcoder_unavailable(name, "not found on PATH")),
    }
}
