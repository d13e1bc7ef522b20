//! vidslice library
//!
//! Splits long videos into fixed-length segments by driving the external
//! ffmpeg toolchain, one child process per segment, tolerating individual
//! segment failures along the way.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod job;
pub mod output;
pub mod planner;
pub mod probe;
pub mod transcoder;
pub mod utils;

// Re-export commonly used types
pub use config::SliceConfig;
pub use error::{SliceError, SliceResult};
pub use job::{JobDriver, JobSummary};
pub use planner::{SegmentPlan, SegmentSpec};
pub use probe::MediaDuration;
