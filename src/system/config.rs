//! Configuration management for the mission engine

use crate::assignment::AssignmentAlgorithm;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Default matching threshold between a drone and a slot (meters)
pub const DEFAULT_MATCHING_THRESHOLD: f64 = 5.0;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Horizontal speed assumed before the first speed change item (m/s)
    pub default_velocity_xy: Option<f64>,
    /// Vertical speed assumed before the first speed change item (m/s)
    pub default_velocity_z: Option<f64>,
    /// Maximum distance between a drone and the slot it is matched to (meters)
    pub matching_threshold: f64,
    /// Algorithm used for drone-to-slot matching
    pub algorithm: AssignmentAlgorithm,
}

impl EngineConfig {
    /// Create a configuration with the default matching settings and no
    /// assumed speeds
    pub fn new() -> Self {
        Self {
            default_velocity_xy: None,
            default_velocity_z: None,
            matching_threshold: DEFAULT_MATCHING_THRESHOLD,
            algorithm: AssignmentAlgorithm::Greedy,
        }
    }

    /// Set the speeds assumed until the mission changes them
    #[must_use]
    pub fn with_default_speeds(mut self, velocity_xy: f64, velocity_z: f64) -> Self {
        self.default_velocity_xy = Some(velocity_xy);
        self.default_velocity_z = Some(velocity_z);
        self
    }

    /// Set the matching threshold
    #[must_use]
    pub fn with_matching_threshold(mut self, threshold: f64) -> Self {
        self.matching_threshold = threshold;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for speed in [self.default_velocity_xy, self.default_velocity_z]
            .into_iter()
            .flatten()
        {
            if !speed.is_finite() || speed < 0.0 {
                return Err(EngineError::ConfigError);
            }
        }
        // Infinite threshold is fine: it means "match regardless of distance"
        if self.matching_threshold.is_nan() || self.matching_threshold < 0.0 {
            return Err(EngineError::ConfigError);
        }
        if self.algorithm != AssignmentAlgorithm::Greedy {
            return Err(EngineError::ConfigError);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
