//! Drone-to-slot assignment
//!
//! Data flows one way: [`build_distance_matrix`] computes distances between
//! located drones and mission slots, [`find_assignment`] turns the matrix
//! into index pairs and [`Mapping`] merges those pairs into the slot array.

pub mod greedy;
pub mod mapping;
pub mod matrix;

pub use greedy::*;
pub use mapping::*;
pub use matrix::*;
