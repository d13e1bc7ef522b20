//! Duration resolution module
//!
//! Two interchangeable strategies answer the same question, "how long is
//! this file": reading the container's declared metadata, or scraping the
//! transcoder's diagnostic stream. Callers pick one; everything downstream
//! of the resolver never cares which ran.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{SliceError, SliceResult};
use crate::transcoder::Transcoder;

pub mod diagnostic;
pub mod metadata;

pub use diagnostic::DiagnosticProbe;
pub use metadata::MetadataProbe;

/// Total media duration in seconds
///
/// Always finite and strictly positive. A zero or unparsable duration is a
/// fatal input error at resolution time, never a zero-segment plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaDuration(f64);

impl MediaDuration {
    /// Wrap a seconds value, rejecting non-finite and non-positive input.
    pub fn from_secs(secs: f64) -> Option<Self> {
        (secs.is_finite() && secs > 0.0).then_some(Self(secs))
    }

    /// Duration in seconds
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

impl fmt::Display for MediaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::time::format_clock(self.0))
    }
}

/// Strategy used to resolve a media duration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStrategy {
    /// Read the declared duration field from container metadata
    #[default]
    Metadata,
    /// Scrape the transcoder's diagnostic stream for a `Duration` line
    Diagnostic,
}

impl DurationStrategy {
    /// Parse a strategy name from CLI or config text.
    pub fn parse(s: &str) -> SliceResult<Self> {
        match s.to_lowercase().as_str() {
            "metadata" => Ok(Self::Metadata),
            "diagnostic" => Ok(Self::Diagnostic),
            _ => Err(SliceError::ConfigError {
                message: format!(
                    "unknown duration strategy '{s}' (expected 'metadata' or 'diagnostic')"
                ),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Diagnostic => "diagnostic",
        }
    }
}

/// One way of determining a file's total duration
#[async_trait]
pub trait DurationResolver: Send + Sync {
    /// Resolve the total duration of the file at `input`.
    ///
    /// Fails with [`SliceError::InputNotFound`] when the path does not
    /// exist and [`SliceError::DurationUnavailable`] when the strategy
    /// cannot produce a positive duration.
    async fn resolve(&self, input: &Path) -> SliceResult<MediaDuration>;
}

/// Build the resolver for the selected strategy.
pub fn resolver_for(strategy: DurationStrategy, transcoder: Transcoder) -> Box<dyn DurationResolver> {
    match strategy {
        DurationStrategy::Metadata => Box::new(MetadataProbe::new(transcoder)),
        DurationStrategy::Diagnostic => Box::new(DiagnosticProbe::new(transcoder)),
    }
}
