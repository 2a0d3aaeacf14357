//! # Drone Mission Engine
//!
//! Pure computation behind fleet ground control: mission execution
//! estimation and drone-to-slot assignment.
//!
//! ## Features
//! - Trajectory reconstruction from mission items across independent
//!   altitude reference frames (ground, home, MSL)
//! - Distance and duration estimates per item and per mission
//! - Live completion ratio bounded by start/end markers of the net mission
//! - Greedy, threshold-bounded matching of located drones onto mission slots
//!
//! ## Guarantees
//! - No I/O, no threads, no shared mutable state
//! - Every public operation is a total function of its inputs: malformed
//!   missions give an empty segment list, invalid geometry is never matched
//! - `no_std` + `alloc` compatible (disable the default `std` feature)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)] // Exact comparisons are intentional in tests of exact arithmetic
#![allow(clippy::use_self)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::cast_precision_loss)]

extern crate alloc;

/// Drone-to-slot matching (distance matrix, greedy solver, mapping)
pub mod assignment;
/// Trajectory segments, completion ratio and mission totals
pub mod estimation;
/// Great-circle and planar distance functions
pub mod geo;
/// Mission item model and validation
pub mod mission;
/// Engine configuration
pub mod system;
/// Core types (DroneId, GeoPoint, AltitudeReference, EngineError, etc.)
pub mod types;

pub use assignment::{build_distance_matrix, find_assignment, AssignmentAlgorithm, DistanceMatrix, Mapping};
pub use estimation::{
    estimate_progress, segment_mission, summarize, MissionSegmenter, MissionTotals, Segment,
};
pub use mission::{MarkerKind, MissionItem, MissionItemKind};
pub use system::config::EngineConfig;
pub use types::*;
