//! Mission trajectory reconstruction
//!
//! Folds an ordered list of mission items into one [`Segment`] per item,
//! tracking the planar position and the altitude in every reference frame
//! independently. Each fold step is a pure function from the previous
//! [`Accumulator`] and the next item to a new accumulator and a segment.
//!
//! # Example
//! ```
//! use drone_mission_engine::estimation::segment_mission;
//! use drone_mission_engine::mission::MissionItem;
//! use drone_mission_engine::types::{AltitudeReference, GeoPoint, HomePosition};
//!
//! let home = HomePosition::at(GeoPoint::new(0.0, 0.0)).with_altitude(AltitudeReference::Ground, 0.0);
//! let items = [
//!     MissionItem::takeoff("1", 5.0, AltitudeReference::Ground),
//!     MissionItem::land("2"),
//! ];
//! let segments = segment_mission(&items, Some(&home));
//! assert_eq!(segments[0].distance, Some(5.0));
//! assert_eq!(segments[1].distance, Some(5.0));
//! ```

use crate::geo::haversine_distance;
use crate::mission::{Altitude, MissionItem, MissionItemKind};
use crate::system::config::EngineConfig;
use crate::types::*;
use alloc::vec::Vec;
use log::{debug, error, trace};

/// Segments of a mission, one per item
pub type Segments<'a> = Vec<Segment<'a>>;

/// Motion associated with executing a single mission item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// Item this segment belongs to
    pub item: &'a MissionItem,
    /// Distance travelled (meters), if the item moves the drone and the
    /// starting point is known
    pub distance: Option<f64>,
    /// Speed along the segment (m/s), if known
    pub velocity: Option<f64>,
}

impl<'a> Segment<'a> {
    /// Segment with no motion
    pub fn stationary(item: &'a MissionItem) -> Self {
        Self {
            item,
            distance: None,
            velocity: None,
        }
    }

    /// Segment covering `distance` at `velocity`
    pub fn moving(item: &'a MissionItem, distance: f64, velocity: Option<f64>) -> Self {
        Self {
            item,
            distance: Some(distance),
            velocity,
        }
    }

    /// Time needed to fly the segment (seconds)
    pub fn duration(&self) -> Option<f64> {
        match (self.distance, self.velocity) {
            (Some(distance), Some(velocity)) if velocity > 0.0 && velocity.is_finite() => {
                Some(distance / velocity)
            }
            _ => None,
        }
    }
}

/// Fold state between two mission items
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    /// Current planar position
    pub position: Option<GeoPoint>,
    /// Current altitude in each reference frame
    pub altitudes: AltitudeSet,
    /// Horizontal speed in effect (m/s)
    pub velocity_xy: Option<f64>,
    /// Vertical speed in effect (m/s)
    pub velocity_z: Option<f64>,
    /// Reference frame established by the first altitude-setting item
    pub reference: Option<AltitudeReference>,
}

/// Non-fatal observations made while folding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDiagnostic {
    /// An altitude item used a reference other than the active one; its
    /// segment carries no distance
    ReferenceMismatch {
        item_index: usize,
        active: AltitudeReference,
        requested: AltitudeReference,
    },
    /// A land or return-to-home item had no usable home data
    MissingHome { item_index: usize },
}

/// Turns mission items into segments for a single drone
#[derive(Debug, Clone, Copy)]
pub struct MissionSegmenter<'h> {
    home: Option<&'h HomePosition>,
    config: EngineConfig,
}

impl<'h> MissionSegmenter<'h> {
    /// Create a segmenter with the default configuration
    pub fn new(home: Option<&'h HomePosition>) -> Self {
        Self::with_config(home, EngineConfig::default())
    }

    /// Create a segmenter with an explicit configuration
    pub fn with_config(home: Option<&'h HomePosition>, config: EngineConfig) -> Self {
        Self { home, config }
    }

    /// Accumulator seeded from the home position and the default speeds
    pub fn initial_state(&self) -> Accumulator {
        Accumulator {
            position: self.home.and_then(|h| h.position),
            altitudes: self.home.map(|h| h.altitudes).unwrap_or_default(),
            velocity_xy: self.config.default_velocity_xy,
            velocity_z: self.config.default_velocity_z,
            reference: None,
        }
    }

    /// Apply a single item to `state`
    pub fn step<'a>(
        &self,
        state: &Accumulator,
        item: &'a MissionItem,
    ) -> Result<(Accumulator, Segment<'a>)> {
        self.step_observed(state, item, 0, &mut |_: FoldDiagnostic| {})
    }

    /// Segment `items`, returning an empty list if any item is malformed
    ///
    /// An empty result means "unknown", not "zero distance".
    pub fn segment<'a>(&self, items: &'a [MissionItem]) -> Segments<'a> {
        self.segment_with_diagnostics(items, |_| {})
    }

    /// Like [`segment`](Self::segment), reporting diagnostics to `on_diagnostic`
    ///
    /// Diagnostics are delivered as they are found, so a fold that aborts
    /// later may still have reported some.
    pub fn segment_with_diagnostics<'a, F>(
        &self,
        items: &'a [MissionItem],
        mut on_diagnostic: F,
    ) -> Segments<'a>
    where
        F: FnMut(FoldDiagnostic),
    {
        match self.fold(items, &mut on_diagnostic) {
            Ok(segments) => segments,
            Err(err) => {
                error!("Mission segmenting aborted: {}", err);
                Segments::new()
            }
        }
    }

    /// Segment `items`, propagating the first error
    pub fn try_segment<'a>(&self, items: &'a [MissionItem]) -> Result<Segments<'a>> {
        self.fold(items, &mut |_: FoldDiagnostic| {})
    }

    fn fold<'a>(
        &self,
        items: &'a [MissionItem],
        on_diagnostic: &mut dyn FnMut(FoldDiagnostic),
    ) -> Result<Segments<'a>> {
        let mut segments = Segments::with_capacity(items.len());
        let mut state = self.initial_state();

        for (index, item) in items.iter().enumerate() {
            let (next, segment) = self.step_observed(&state, item, index, on_diagnostic)?;
            trace!(
                "Item {} ({:?}): distance {:?}, velocity {:?}",
                index,
                item.item_type(),
                segment.distance,
                segment.velocity
            );
            segments.push(segment);
            state = next;
        }

        Ok(segments)
    }

    fn step_observed<'a>(
        &self,
        state: &Accumulator,
        item: &'a MissionItem,
        index: usize,
        on_diagnostic: &mut dyn FnMut(FoldDiagnostic),
    ) -> Result<(Accumulator, Segment<'a>)> {
        item.validate()?;

        let mut next = *state;
        let segment = match &item.kind {
            MissionItemKind::ChangeSpeed {
                velocity_xy,
                velocity_z,
            } => {
                if velocity_xy.is_some() {
                    next.velocity_xy = *velocity_xy;
                }
                if velocity_z.is_some() {
                    next.velocity_z = *velocity_z;
                }
                Segment::stationary(item)
            }

            MissionItemKind::Takeoff { alt } | MissionItemKind::ChangeAltitude { alt } => {
                change_altitude(state, &mut next, item, alt, index, on_diagnostic)
            }

            MissionItemKind::Land => match state.reference {
                Some(reference) => match self.home.and_then(|h| h.altitudes.get(reference)) {
                    Some(target) => {
                        next.altitudes.set(reference, Some(target));
                        match state.altitudes.get(reference) {
                            Some(prior) => {
                                Segment::moving(item, libm::fabs(prior - target), state.velocity_z)
                            }
                            None => Segment::stationary(item),
                        }
                    }
                    None => {
                        on_diagnostic(FoldDiagnostic::MissingHome { item_index: index });
                        Segment::stationary(item)
                    }
                },
                // Nothing has set an altitude yet, so there is nothing to descend from
                None => Segment::stationary(item),
            },

            MissionItemKind::GoTo { target } => move_to(state, &mut next, item, *target),

            MissionItemKind::ReturnToHome => match self.home.and_then(|h| h.position) {
                Some(home) => move_to(state, &mut next, item, home),
                None => {
                    on_diagnostic(FoldDiagnostic::MissingHome { item_index: index });
                    Segment::stationary(item)
                }
            },

            MissionItemKind::Marker { .. }
            | MissionItemKind::ChangeHeading { .. }
            | MissionItemKind::Hover { .. }
            | MissionItemKind::SetPayload { .. }
            | MissionItemKind::SetParameter { .. }
            | MissionItemKind::UpdateGeofence
            | MissionItemKind::UpdateSafety => Segment::stationary(item),
        };

        Ok((next, segment))
    }
}

fn change_altitude<'a>(
    state: &Accumulator,
    next: &mut Accumulator,
    item: &'a MissionItem,
    alt: &Altitude,
    index: usize,
    on_diagnostic: &mut dyn FnMut(FoldDiagnostic),
) -> Segment<'a> {
    let active = state.reference.unwrap_or(alt.reference);
    next.reference = Some(active);
    next.altitudes.set(alt.reference, Some(alt.value));

    if alt.reference != active {
        debug!(
            "Item {} changes altitude in {} while {} is active; distance not recorded",
            index, alt.reference, active
        );
        on_diagnostic(FoldDiagnostic::ReferenceMismatch {
            item_index: index,
            active,
            requested: alt.reference,
        });
        return Segment::stationary(item);
    }

    match state.altitudes.get(alt.reference) {
        Some(prior) => Segment::moving(item, libm::fabs(alt.value - prior), state.velocity_z),
        None => Segment::stationary(item),
    }
}

fn move_to<'a>(
    state: &Accumulator,
    next: &mut Accumulator,
    item: &'a MissionItem,
    target: GeoPoint,
) -> Segment<'a> {
    next.position = Some(target);
    match state.position {
        Some(prior) => Segment::moving(item, haversine_distance(&prior, &target), state.velocity_xy),
        None => Segment::stationary(item),
    }
}

/// Segment `items` with the default configuration
pub fn segment_mission<'a>(
    items: &'a [MissionItem],
    home: Option<&HomePosition>,
) -> Segments<'a> {
    MissionSegmenter::new(home).segment(items)
}
