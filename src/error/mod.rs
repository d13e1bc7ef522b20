//! Error handling module for VidSlice

use thiserror::Error;

/// Main error type for VidSlice operations
///
/// Every variant here is fatal for the job that raised it. Per-segment
/// failures are not errors at this level; they are recorded as
/// [`ExportStatus`](crate::engine::ExportStatus) values inside the job
/// summary and never abort the remaining segments.
#[derive(Error, Debug)]
pub enum SliceError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Transcoder binary missing or failing its preflight check
    #[error("Transcoder unavailable ({tool}): {reason}")]
    TranscoderUnavailable { tool: String, reason: String },

    /// Duration could not be determined by the selected strategy
    #[error("Could not determine duration of {input}: {reason}")]
    DurationUnavailable { input: String, reason: String },

    /// Segment length non-positive, non-finite, or too fine to index the
    /// input duration
    #[error("Invalid segment length: {value} seconds")]
    InvalidSegmentLength { value: f64 },

    /// Configuration file or value error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SliceError {
    /// Duration resolution failure for a given input.
    pub fn duration_unavailable(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DurationUnavailable {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Missing or broken transcoder tooling.
    pub fn transcoder_unavailable(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TranscoderUnavailable {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for VidSlice operations
pub type SliceResult<T> = std::result::Result<T, SliceError>;
