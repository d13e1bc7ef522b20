//! Segment planning module
//!
//! Turns a resolved media duration and a fixed segment length into the
//! ordered list of time windows a job will export. Pure computation, no I/O.

use serde::{Deserialize, Serialize};

use crate::error::{SliceError, SliceResult};
use crate::probe::MediaDuration;

/// One planned time window of the source media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// 1-based position in the plan
    pub index: u32,
    /// Window start in seconds, inclusive
    pub start: f64,
    /// Window end in seconds, exclusive
    pub end: f64,
}

impl SegmentSpec {
    /// Window length in seconds
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Start boundary truncated to whole minutes
    pub fn start_minutes(&self) -> u64 {
        (self.start / 60.0) as u64
    }

    /// End boundary truncated to whole minutes
    pub fn end_minutes(&self) -> u64 {
        (self.end / 60.0) as u64
    }
}

/// Ordered segment windows for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPlan {
    /// Planned windows, 1..N in order
    pub segments: Vec<SegmentSpec>,
    /// Nominal window length in seconds the plan was computed with
    pub segment_length: f64,
    /// Total media duration in seconds the plan covers
    pub total_duration: f64,
}

impl SegmentPlan {
    /// Number of planned segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the plan holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Compute the segment plan for a duration and window length.
///
/// Windows are laid down from zero until the cursor reaches the total:
/// segment `i` ends at `i * segment_length` clamped to the total, and the
/// next segment starts where the previous one ended. Every boundary comes
/// from that one multiplication, so `start < end` holds for each window
/// even when the duration sits one float step off a whole number of
/// windows; a precomputed count from a separate division can disagree
/// with the boundaries there. A duration at or below the window length
/// yields a single segment, and an exact multiple never produces a
/// zero-length trailing segment.
pub fn plan(duration: MediaDuration, segment_length: f64) -> SliceResult<SegmentPlan> {
    if !segment_length.is_finite() || segment_length <= 0.0 {
        return Err(SliceError::InvalidSegmentLength {
            value: segment_length,
        });
    }

    let total = duration.as_secs();

    // The 1-based index is u32; a ratio it cannot count is rejected
    // before any windows are built.
    if total / segment_length >= f64::from(u32::MAX) {
        return Err(SliceError::InvalidSegmentLength {
            value: segment_length,
        });
    }

    let mut segments = Vec::new();
    let mut index: u32 = 0;
    let mut start = 0.0;
    while start < total {
        index += 1;
        let end = (f64::from(index) * segment_length).min(total);
        segments.push(SegmentSpec { index, start, end });
        start = end;
    }

    Ok(SegmentPlan {
        segments,
        segment_length,
        total_duration: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration(secs: f64) -> MediaDuration {
        MediaDuration::from_secs(secs).unwrap()
    }

    #[test]
    fn exact_multiple_yields_no_trailing_sliver() {
        let plan = plan(duration(900.0), 900.0).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.segments[0].index, 1);
        assert_eq!(plan.segments[0].start, 0.0);
        assert_eq!(plan.segments[0].end, 900.0);
    }

    #[test]
    fn one_second_over_adds_short_final_segment() {
        let plan = plan(duration(901.0), 900.0).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.segments[0].start, 0.0);
        assert_eq!(plan.segments[0].end, 900.0);
        assert_eq!(plan.segments[1].start, 900.0);
        assert_eq!(plan.segments[1].end, 901.0);
    }

    #[test]
    fn long_input_with_short_windows() {
        let plan = plan(duration(3661.0), 59.0).unwrap();
        assert_eq!(plan.len(), 63);
        let last = plan.segments.last().unwrap();
        assert_eq!(last.index, 63);
        assert_eq!(last.start, 3658.0);
        assert_eq!(last.end, 3661.0);
        assert_eq!(last.length(), 3.0);
    }

    #[test]
    fn duration_below_window_length_yields_one_segment() {
        let plan = plan(duration(42.0), 900.0).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.segments[0].end, 42.0);
    }

    #[test]
    fn windows_tile_the_duration_contiguously() {
        for (total, len) in [(900.0, 900.0), (901.0, 900.0), (3661.0, 59.0), (125.5, 30.0)] {
            let plan = plan(duration(total), len).unwrap();
            let mut cursor = 0.0;
            for segment in &plan.segments {
                assert_eq!(segment.start, cursor, "gap before segment {}", segment.index);
                assert!(segment.start < segment.end);
                assert!(segment.length() <= len + 1e-9);
                cursor = segment.end;
            }
            assert_eq!(cursor, total, "plan for {total}/{len} does not cover the input");
        }
    }

    #[test]
    fn indices_are_one_based_and_sequential() {
        let plan = plan(duration(300.0), 59.0).unwrap();
        for (position, segment) in plan.segments.iter().enumerate() {
            assert_eq!(segment.index as usize, position + 1);
        }
    }

    #[test]
    fn rejects_non_positive_segment_length() {
        assert!(matches!(
            plan(duration(900.0), 0.0),
            Err(SliceError::InvalidSegmentLength { .. })
        ));
        assert!(matches!(
            plan(duration(900.0), -59.0),
            Err(SliceError::InvalidSegmentLength { .. })
        ));
        assert!(matches!(
            plan(duration(900.0), f64::NAN),
            Err(SliceError::InvalidSegmentLength { .. })
        ));
    }

    #[test]
    fn rejects_window_ratio_beyond_index_range() {
        assert!(matches!(
            plan(duration(86_400.0), 1e-9),
            Err(SliceError::InvalidSegmentLength { .. })
        ));
    }

    #[test]
    fn float_boundary_durations_keep_windows_ordered() {
        // 58.4 / 0.1 divides evenly on paper, but 584 * 0.1 lands one
        // float step above 58.4; the plan must still end cleanly instead
        // of emitting an inverted trailing window.
        let plan_58 = plan(duration(58.4), 0.1).unwrap();
        assert_eq!(plan_58.len(), 584);
        let last = plan_58.segments.last().unwrap();
        assert!(last.start < last.end);
        assert_eq!(last.end, 58.4);

        for total in [126.3, 213.6, 436.7, 485.2] {
            let plan = plan(duration(total), 0.1).unwrap();
            let mut cursor = 0.0;
            for segment in &plan.segments {
                assert!(
                    segment.start < segment.end,
                    "inverted window {} for {total}",
                    segment.index
                );
                assert_eq!(segment.start, cursor);
                cursor = segment.end;
            }
            assert_eq!(cursor, total);
        }
    }

    #[test]
    fn minute_boundaries_truncate() {
        let plan = plan(duration(1000.0), 900.0).unwrap();
        assert_eq!(plan.segments[0].start_minutes(), 0);
        assert_eq!(plan.segments[0].end_minutes(), 15);
        assert_eq!(plan.segments[1].start_minutes(), 15);
        assert_eq!(plan.segments[1].end_minutes(), 16);
    }
}
