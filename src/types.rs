//! Core type definitions for the mission engine

use core::fmt;
use serde::{Deserialize, Serialize};

/// Result type for engine operations
pub type Result<T> = core::result::Result<T, EngineError>;

/// Unique identifier for each drone in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DroneId(pub u64);

impl DroneId {
    /// Create a new DroneId from a u64
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drone-{:016X}", self.0)
    }
}

/// Geographic point on the WGS84 ellipsoid (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude in degrees
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite and within their valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Vertical reference frame of an altitude value
///
/// Values expressed in different references are never compared with each
/// other; the engine has no way to convert between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeReference {
    /// Above ground level
    Ground,
    /// Relative to the home (take-off) position
    Home,
    /// Above mean sea level
    Msl,
}

impl AltitudeReference {
    /// All references, in storage order
    pub const ALL: [AltitudeReference; 3] = [
        AltitudeReference::Ground,
        AltitudeReference::Home,
        AltitudeReference::Msl,
    ];

    const fn index(self) -> usize {
        match self {
            AltitudeReference::Ground => 0,
            AltitudeReference::Home => 1,
            AltitudeReference::Msl => 2,
        }
    }
}

impl fmt::Display for AltitudeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltitudeReference::Ground => write!(f, "AGL"),
            AltitudeReference::Home => write!(f, "HOME"),
            AltitudeReference::Msl => write!(f, "AMSL"),
        }
    }
}

/// One optional altitude per reference frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSet {
    values: [Option<f64>; 3],
}

impl AltitudeSet {
    /// Create a set with every reference unknown
    pub const fn new() -> Self {
        Self { values: [None; 3] }
    }

    /// Get the altitude in the given reference, if known
    pub fn get(&self, reference: AltitudeReference) -> Option<f64> {
        self.values[reference.index()]
    }

    /// Return a copy with the altitude in `reference` replaced
    #[must_use]
    pub fn with(mut self, reference: AltitudeReference, value: Option<f64>) -> Self {
        self.values[reference.index()] = value;
        self
    }

    /// Set the altitude in `reference`
    pub fn set(&mut self, reference: AltitudeReference, value: Option<f64>) {
        self.values[reference.index()] = value;
    }

    /// Iterate over (reference, altitude) pairs that are known
    pub fn known(&self) -> impl Iterator<Item = (AltitudeReference, f64)> + '_ {
        AltitudeReference::ALL
            .iter()
            .filter_map(move |r| self.get(*r).map(|v| (*r, v)))
    }
}

/// Home position of a single mission slot
///
/// Any part may be missing, e.g. when the mission was uploaded without a
/// home coordinate or the drone has not reported its altitude yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomePosition {
    /// Planar home coordinate
    pub position: Option<GeoPoint>,
    /// Home altitude in each reference frame
    pub altitudes: AltitudeSet,
}

impl HomePosition {
    /// Create a home position at the given coordinate with no altitude info
    pub fn at(position: GeoPoint) -> Self {
        Self {
            position: Some(position),
            altitudes: AltitudeSet::new(),
        }
    }

    /// Add a known altitude in the given reference
    #[must_use]
    pub fn with_altitude(mut self, reference: AltitudeReference, value: f64) -> Self {
        self.altitudes.set(reference, Some(value));
        self
    }
}

/// Error types for the mission engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Coordinate is NaN, infinite or out of range
    InvalidCoordinate,
    /// Altitude value is not finite
    InvalidAltitude,
    /// Speed is negative or not finite
    InvalidSpeed,
    /// Marker ratio outside [0, 1]
    InvalidMarkerRatio,
    /// Bounded buffer capacity exceeded
    ResourceExhausted,
    /// Assignment algorithm is known but not implemented
    UnsupportedAlgorithm,
    /// Drone is already assigned to another slot
    DuplicateAssignment,
    /// Slot index does not exist in the mapping
    SlotOutOfRange,
    /// Configuration error
    ConfigError,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidParameter => write!(f, "Invalid parameter"),
            EngineError::InvalidCoordinate => write!(f, "Invalid coordinate"),
            EngineError::InvalidAltitude => write!(f, "Invalid altitude"),
            EngineError::InvalidSpeed => write!(f, "Invalid speed"),
            EngineError::InvalidMarkerRatio => write!(f, "Marker ratio out of range"),
            EngineError::ResourceExhausted => write!(f, "Resource exhausted"),
            EngineError::UnsupportedAlgorithm => write!(f, "Unsupported assignment algorithm"),
            EngineError::DuplicateAssignment => write!(f, "Drone already assigned"),
            EngineError::SlotOutOfRange => write!(f, "Slot index out of range"),
            EngineError::ConfigError => write!(f, "Configuration error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
