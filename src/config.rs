//! Job configuration
//!
//! Compiled-in defaults, optionally replaced by a named profile or a
//! TOML file, with CLI flags applied on top. The merged [`SliceConfig`]
//! is what the job driver consumes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{EncodingSettings, ExportMode};
use crate::error::{SliceError, SliceResult};
use crate::output::NamingScheme;
use crate::probe::DurationStrategy;

/// Default segment length in seconds (15 minutes)
pub const DEFAULT_SEGMENT_LENGTH: f64 = 900.0;
/// Default output directory for exported segments
pub const DEFAULT_OUTPUT_DIR: &str = "output_clips";
/// Output directory used by the shorts profile
pub const SHORTS_OUTPUT_DIR: &str = "output/shorts_clips";
/// Segment length used by the shorts profile (59 seconds)
pub const SHORTS_SEGMENT_LENGTH: f64 = 59.0;
/// Smallest accepted watchdog timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Largest accepted watchdog timeout in seconds (one day)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Settings for one segmentation job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Directory the exported segments land in
    pub output_dir: PathBuf,

    /// Window length in seconds
    pub segment_length: f64,

    /// How the input duration is resolved
    pub strategy: DurationStrategy,

    /// Whether segments are re-encoded or stream-copied
    pub mode: ExportMode,

    /// Video codec for re-encode mode
    pub video_codec: String,

    /// Audio codec for re-encode mode
    pub audio_codec: String,

    /// File naming scheme for exported segments
    pub naming: NamingScheme,

    /// Per-segment watchdog in seconds, off when absent
    pub timeout_secs: Option<u64>,

    /// Explicit ffmpeg binary, PATH lookup when absent
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe binary, PATH lookup when absent
    pub ffprobe_path: Option<PathBuf>,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self::archive()
    }
}

impl SliceConfig {
    /// Archive profile: 15-minute re-encoded segments with range names.
    pub fn archive() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            segment_length: DEFAULT_SEGMENT_LENGTH,
            strategy: DurationStrategy::Metadata,
            mode: ExportMode::Reencode,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            naming: NamingScheme::IndexedRange,
            timeout_secs: None,
            ffmpeg_path: None,
            ffprobe_path: None,
        }
    }

    /// Shorts profile: 59-second stream-copied segments with plain
    /// indexed names, duration taken from the transcoder banner.
    pub fn shorts() -> Self {
        Self {
            output_dir: PathBuf::from(SHORTS_OUTPUT_DIR),
            segment_length: SHORTS_SEGMENT_LENGTH,
            strategy: DurationStrategy::Diagnostic,
            mode: ExportMode::Copy,
            naming: NamingScheme::Indexed,
            ..Self::archive()
        }
    }

    /// Look up a built-in profile by name.
    pub fn profile(name: &str) -> SliceResult<Self> {
        match name {
            "archive" => Ok(Self::archive()),
            "shorts" => Ok(Self::shorts()),
            other => Err(SliceError::ConfigError {
                message: format!("unknown profile '{other}', expected 'archive' or 'shorts'"),
            }),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> SliceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SliceError::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| SliceError::ConfigError {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the planner and exporter cannot work with.
    pub fn validate(&self) -> SliceResult<()> {
        if self.mode == ExportMode::Reencode
            && (self.video_codec.is_empty() || self.audio_codec.is_empty())
        {
            return Err(SliceError::ConfigError {
                message: "re-encode mode requires both video_codec and audio_codec".to_string(),
            });
        }
        // Zero would arm a watchdog that kills every segment on arrival;
        // the CLI clamps the same range at parse time.
        if let Some(secs) = self.timeout_secs {
            if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
                return Err(SliceError::ConfigError {
                    message: format!(
                        "timeout_secs must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds, got {secs}"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Encoder settings assembled from the codec fields.
    pub fn encoding(&self) -> EncodingSettings {
        EncodingSettings {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
        }
    }
}
