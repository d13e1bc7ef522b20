//! Segment file naming conventions

use serde::{Deserialize, Serialize};

use crate::error::{SliceError, SliceResult};
use crate::planner::SegmentSpec;

/// Container extension every convention produces
const OUTPUT_EXTENSION: &str = "mp4";

/// Naming convention for segment output files
///
/// Fixed per job, never decided per segment. Both conventions embed the
/// 1-based segment index, which keeps names injective across a plan: no
/// two segments of the same job can silently overwrite each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NamingScheme {
    /// `clip_NNN.mp4`, for short uniform segments
    #[serde(rename = "indexed")]
    Indexed,
    /// `clip_NNN_SSmin-EEmin.mp4`, for long segments labeled with the
    /// minute range they cover
    #[serde(rename = "range")]
    IndexedRange,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self::IndexedRange
    }
}

impl NamingScheme {
    /// Parse a scheme name from CLI or config text.
    pub fn parse(s: &str) -> SliceResult<Self> {
        match s.to_lowercase().as_str() {
            "indexed" => Ok(Self::Indexed),
            "range" => Ok(Self::IndexedRange),
            _ => Err(SliceError::ConfigError {
                message: format!("unknown naming scheme '{s}' (expected 'indexed' or 'range')"),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexed => "indexed",
            Self::IndexedRange => "range",
        }
    }

    /// File name for a planned segment.
    ///
    /// Pure and deterministic. The index is zero-padded to at least three
    /// digits and widens past that rather than truncating; minute bounds
    /// are truncated whole minutes padded to two digits.
    pub fn file_name(&self, spec: &SegmentSpec) -> String {
        match self {
            Self::Indexed => format!("clip_{:03}.{}", spec.index, OUTPUT_EXTENSION),
            Self::IndexedRange => format!(
                "clip_{:03}_{:02}min-{:02}min.{}",
                spec.index,
                spec.start_minutes(),
                spec.end_minutes(),
                OUTPUT_EXTENSION
            ),
        }
    }
}
