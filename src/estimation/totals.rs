//! Aggregate distance and duration of a segmented mission

use super::segmenter::Segment;
use crate::mission::MissionItemKind;

/// Totals over all segments of a mission
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MissionTotals {
    /// Sum of all known segment distances (meters)
    pub distance: f64,
    /// Estimated flight time including hover time (seconds)
    pub duration: f64,
    /// Time spent hovering (seconds), included in `duration`
    pub hover_time: f64,
    /// Segments with a distance but no usable velocity; `duration` is a
    /// lower bound when this is non-zero
    pub unknown_duration_segments: usize,
}

impl MissionTotals {
    /// True if every moving segment had a known velocity
    pub fn is_duration_exact(&self) -> bool {
        self.unknown_duration_segments == 0
    }
}

/// Sum the distances and durations of `segments`
pub fn summarize(segments: &[Segment<'_>]) -> MissionTotals {
    let mut totals = MissionTotals::default();

    for segment in segments {
        if let MissionItemKind::Hover { duration_secs } = segment.item.kind {
            totals.hover_time += duration_secs;
            totals.duration += duration_secs;
        }

        let Some(distance) = segment.distance else {
            continue;
        };
        totals.distance += distance;
        match segment.duration() {
            Some(duration) => totals.duration += duration,
            // A zero-length move takes no time even without a known speed
            None if distance == 0.0 => {}
            None => totals.unknown_duration_segments += 1,
        }
    }

    totals
}
