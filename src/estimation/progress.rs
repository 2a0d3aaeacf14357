//! Live completion ratio of a mission
//!
//! A mission may embed a "net" portion between a start and an end marker,
//! e.g. a choreography between a shared take-off and landing sequence. The
//! markers carry the ratios that the net portion occupies on the scale of
//! the whole mission, so progress measured on the net distance can be
//! reported on the whole mission's [0, 1] scale.

use super::segmenter::Segment;
use crate::mission::{MarkerKind, MissionItemKind};

/// Breakdown of a progress estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEstimate {
    /// Completion ratio of the whole mission, in [0, 1]
    pub ratio: f64,
    /// Completion ratio of the net portion, in [0, 1]
    pub net_ratio: f64,
    /// Net distance already flown (meters)
    pub done_distance: f64,
    /// Total net distance (meters)
    pub total_distance: f64,
    /// Ratio at which the net portion starts
    pub start_ratio: f64,
    /// Ratio at which the net portion ends
    pub end_ratio: f64,
}

/// Completion ratio of the mission in [0, 1]
///
/// `current_item_id` is the item being executed, `current_item_ratio` how
/// far the drone is through it (unset counts as 0). Segments before the
/// current item count as done; if the current item is not found, every
/// segment counts as done. A mission without a start marker has no net
/// portion and always reports its start ratio.
pub fn estimate_progress(
    segments: &[Segment<'_>],
    current_item_id: Option<&str>,
    current_item_ratio: Option<f64>,
) -> f64 {
    estimate_progress_detailed(segments, current_item_id, current_item_ratio).ratio
}

/// Like [`estimate_progress`], returning the intermediate values too
pub fn estimate_progress_detailed(
    segments: &[Segment<'_>],
    current_item_id: Option<&str>,
    current_item_ratio: Option<f64>,
) -> ProgressEstimate {
    let current_ratio = clamp_unit(current_item_ratio.unwrap_or(0.0));

    // Only segments after a start marker count toward the net portion
    let mut inside_net = false;
    let mut completed = true;
    let mut start_ratio = 0.0;
    let mut end_ratio = 1.0;
    let mut total_distance = 0.0;
    let mut done_distance = 0.0;

    for segment in segments {
        let is_current = completed && current_item_id == Some(segment.item.id.as_str());
        if is_current {
            completed = false;
        }

        if let MissionItemKind::Marker { marker, ratio } = segment.item.kind {
            match marker {
                MarkerKind::Start => {
                    inside_net = true;
                    start_ratio = ratio;
                }
                MarkerKind::End => {
                    inside_net = false;
                    end_ratio = ratio;
                }
            }
            continue;
        }

        if !inside_net {
            continue;
        }

        if let Some(distance) = segment.distance {
            total_distance += distance;
            if is_current {
                done_distance += distance * current_ratio;
            } else if completed {
                done_distance += distance;
            }
        }
    }

    let net_ratio = if total_distance > 0.0 {
        clamp_unit(done_distance / total_distance)
    } else {
        0.0
    };

    ProgressEstimate {
        ratio: clamp_unit(start_ratio + (end_ratio - start_ratio) * net_ratio),
        net_ratio,
        done_distance,
        total_distance,
        start_ratio,
        end_ratio,
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
