//! Segment export engine module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SliceError, SliceResult};
use crate::planner::SegmentSpec;

pub mod command;
pub mod exporter;

pub use command::ExportCommand;
pub use exporter::SegmentExporter;

/// Export encoding mode for one job
///
/// Caller-level policy, never switched per segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Re-encode both streams with explicit codecs; tolerant of segment
    /// boundaries landing mid-frame
    Reencode,
    /// Copy compressed streams without re-encoding; fastest, but seek
    /// accuracy is limited to keyframe granularity
    Copy,
}

impl Default for ExportMode {
    fn default() -> Self {
        Self::Reencode
    }
}

impl ExportMode {
    /// Parse a mode name from CLI or config text.
    pub fn parse(s: &str) -> SliceResult<Self> {
        match s.to_lowercase().as_str() {
            "reencode" => Ok(Self::Reencode),
            "copy" => Ok(Self::Copy),
            _ => Err(SliceError::ConfigError {
                message: format!("unknown export mode '{s}' (expected 'reencode' or 'copy')"),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reencode => "reencode",
            Self::Copy => "copy",
        }
    }
}

/// Codec selection applied in re-encode mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Video codec handed to the transcoder
    pub video_codec: String,
    /// Audio codec handed to the transcoder
    pub audio_codec: String,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// Outcome of one segment export attempt
///
/// Created right after the transcoder run for that segment and never
/// mutated afterwards; the job driver only reads it.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// The window this attempt covered
    pub spec: SegmentSpec,
    /// Destination the transcoder was pointed at
    pub output_path: PathBuf,
    /// How the attempt ended
    pub status: ExportStatus,
}

impl ExportResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExportStatus::Success)
    }
}

/// Classification of a segment export
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportStatus {
    /// Transcoder exited zero
    Success,
    /// Transcoder exited non-zero or was killed by the watchdog; the
    /// diagnostic text is preserved verbatim for operator inspection
    TranscoderFailed {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    /// The transcoder process could not be started at all
    SkippedError { message: String },
}
