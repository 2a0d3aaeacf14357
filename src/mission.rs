//! Mission item model
//!
//! Mission items are created and edited by the mission editor and consumed
//! read-only by the estimation code. The order of a slice of items is the
//! execution order.
//!
//! # Example
//! ```
//! use drone_mission_engine::mission::MissionItem;
//! use drone_mission_engine::types::AltitudeReference;
//!
//! let items = [
//!     MissionItem::takeoff("1", 5.0, AltitudeReference::Ground),
//!     MissionItem::go_to("2", 47.4734, 19.0577),
//!     MissionItem::return_to_home("3"),
//!     MissionItem::land("4"),
//! ];
//! assert!(items.iter().all(|item| item.validate().is_ok()));
//! ```

use crate::types::{AltitudeReference, EngineError, GeoPoint, Result};
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Longest autopilot parameter name (MAVLink `param_id` length)
pub const MAX_PARAM_NAME_LEN: usize = 16;

/// Autopilot parameter name
pub type ParamName = heapless::String<MAX_PARAM_NAME_LEN>;

/// Altitude value tagged with the frame it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Altitude {
    /// Altitude in meters
    pub value: f64,
    /// Reference frame of `value`
    pub reference: AltitudeReference,
}

impl Altitude {
    /// Create a new altitude
    pub const fn new(value: f64, reference: AltitudeReference) -> Self {
        Self { value, reference }
    }
}

/// Kind of a mission marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Start of the net portion of the mission
    Start,
    /// End of the net portion of the mission
    End,
}

/// Mission item types, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionItemType {
    Takeoff,
    ChangeAltitude,
    ChangeSpeed,
    GoTo,
    ReturnToHome,
    Land,
    Marker,
    ChangeHeading,
    Hover,
    SetPayload,
    SetParameter,
    UpdateGeofence,
    UpdateSafety,
}

/// Mission item type together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissionItemKind {
    /// Take off to the given altitude
    Takeoff { alt: Altitude },
    /// Climb or descend to the given altitude
    ChangeAltitude { alt: Altitude },
    /// Change horizontal and/or vertical speed (m/s) for later items
    ChangeSpeed {
        velocity_xy: Option<f64>,
        velocity_z: Option<f64>,
    },
    /// Fly to a planar position, keeping altitude
    GoTo { target: GeoPoint },
    /// Fly back above the home position
    ReturnToHome,
    /// Land at the current position
    Land,
    /// Bound of the net portion of the mission
    Marker { marker: MarkerKind, ratio: f64 },
    /// Turn to the given heading
    ChangeHeading { heading_deg: f64 },
    /// Hold the current position for the given time
    Hover { duration_secs: f64 },
    /// Switch a payload channel on or off
    SetPayload { channel: u8, active: bool },
    /// Set an autopilot parameter
    SetParameter { name: ParamName, value: f64 },
    /// Upload a new geofence
    UpdateGeofence,
    /// Update safety settings
    UpdateSafety,
}

impl MissionItemKind {
    /// Get the parameterless type of this item
    pub fn item_type(&self) -> MissionItemType {
        match self {
            MissionItemKind::Takeoff { .. } => MissionItemType::Takeoff,
            MissionItemKind::ChangeAltitude { .. } => MissionItemType::ChangeAltitude,
            MissionItemKind::ChangeSpeed { .. } => MissionItemType::ChangeSpeed,
            MissionItemKind::GoTo { .. } => MissionItemType::GoTo,
            MissionItemKind::ReturnToHome => MissionItemType::ReturnToHome,
            MissionItemKind::Land => MissionItemType::Land,
            MissionItemKind::Marker { .. } => MissionItemType::Marker,
            MissionItemKind::ChangeHeading { .. } => MissionItemType::ChangeHeading,
            MissionItemKind::Hover { .. } => MissionItemType::Hover,
            MissionItemKind::SetPayload { .. } => MissionItemType::SetPayload,
            MissionItemKind::SetParameter { .. } => MissionItemType::SetParameter,
            MissionItemKind::UpdateGeofence => MissionItemType::UpdateGeofence,
            MissionItemKind::UpdateSafety => MissionItemType::UpdateSafety,
        }
    }
}

/// Single mission item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionItem {
    /// Identifier assigned by the mission editor
    pub id: String,
    /// Type and parameters
    pub kind: MissionItemKind,
}

impl MissionItem {
    /// Create a mission item from an id and a kind
    pub fn new(id: impl Into<String>, kind: MissionItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Create a takeoff item
    pub fn takeoff(id: impl Into<String>, altitude: f64, reference: AltitudeReference) -> Self {
        Self::new(
            id,
            MissionItemKind::Takeoff {
                alt: Altitude::new(altitude, reference),
            },
        )
    }

    /// Create a change altitude item
    pub fn change_altitude(
        id: impl Into<String>,
        altitude: f64,
        reference: AltitudeReference,
    ) -> Self {
        Self::new(
            id,
            MissionItemKind::ChangeAltitude {
                alt: Altitude::new(altitude, reference),
            },
        )
    }

    /// Create a change speed item
    pub fn change_speed(
        id: impl Into<String>,
        velocity_xy: Option<f64>,
        velocity_z: Option<f64>,
    ) -> Self {
        Self::new(
            id,
            MissionItemKind::ChangeSpeed {
                velocity_xy,
                velocity_z,
            },
        )
    }

    /// Create a go-to item
    pub fn go_to(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::new(
            id,
            MissionItemKind::GoTo {
                target: GeoPoint::new(lat, lon),
            },
        )
    }

    /// Create a return-to-home item
    pub fn return_to_home(id: impl Into<String>) -> Self {
        Self::new(id, MissionItemKind::ReturnToHome)
    }

    /// Create a land item
    pub fn land(id: impl Into<String>) -> Self {
        Self::new(id, MissionItemKind::Land)
    }

    /// Create a marker item
    pub fn marker(id: impl Into<String>, marker: MarkerKind, ratio: f64) -> Self {
        Self::new(id, MissionItemKind::Marker { marker, ratio })
    }

    /// Create a hover item
    pub fn hover(id: impl Into<String>, duration_secs: f64) -> Self {
        Self::new(id, MissionItemKind::Hover { duration_secs })
    }

    /// Create a set parameter item
    ///
    /// Fails with `ResourceExhausted` if `name` is longer than
    /// [`MAX_PARAM_NAME_LEN`] bytes.
    pub fn set_parameter(id: impl Into<String>, name: &str, value: f64) -> Result<Self> {
        let mut param = ParamName::new();
        param
            .push_str(name)
            .map_err(|_| EngineError::ResourceExhausted)?;
        Ok(Self::new(id, MissionItemKind::SetParameter { name: param, value }))
    }

    /// Get the parameterless type of this item
    pub fn item_type(&self) -> MissionItemType {
        self.kind.item_type()
    }

    /// Check the item parameters
    ///
    /// Returns the first problem found. The segmenter aborts the whole fold
    /// when an item fails validation.
    pub fn validate(&self) -> Result<()> {
        match &self.kind {
            MissionItemKind::Takeoff { alt } | MissionItemKind::ChangeAltitude { alt } => {
                if !alt.value.is_finite() {
                    return Err(EngineError::InvalidAltitude);
                }
            }
            MissionItemKind::ChangeSpeed {
                velocity_xy,
                velocity_z,
            } => {
                for speed in [velocity_xy, velocity_z].into_iter().flatten() {
                    if !speed.is_finite() || *speed < 0.0 {
                        return Err(EngineError::InvalidSpeed);
                    }
                }
            }
            MissionItemKind::GoTo { target } => {
                if !target.is_valid() {
                    return Err(EngineError::InvalidCoordinate);
                }
            }
            MissionItemKind::Marker { ratio, .. } => {
                if !(0.0..=1.0).contains(ratio) {
                    return Err(EngineError::InvalidMarkerRatio);
                }
            }
            MissionItemKind::ChangeHeading { heading_deg } => {
                if !heading_deg.is_finite() {
                    return Err(EngineError::InvalidParameter);
                }
            }
            MissionItemKind::Hover { duration_secs } => {
                if !duration_secs.is_finite() || *duration_secs < 0.0 {
                    return Err(EngineError::InvalidParameter);
                }
            }
            MissionItemKind::SetParameter { name, value } => {
                if name.is_empty() || !value.is_finite() {
                    return Err(EngineError::InvalidParameter);
                }
            }
            MissionItemKind::ReturnToHome
            | MissionItemKind::Land
            | MissionItemKind::SetPayload { .. }
            | MissionItemKind::UpdateGeofence
            | MissionItemKind::UpdateSafety => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_type() {
        assert_eq!(
            MissionItem::takeoff("a", 5.0, AltitudeReference::Ground).item_type(),
            MissionItemType::Takeoff
        );
        assert_eq!(MissionItem::go_to("b", 1.0, 1.0).item_type(), MissionItemType::GoTo);
        assert_eq!(MissionItem::land("c").item_type(), MissionItemType::Land);
        assert_eq!(
            MissionItem::marker("d", MarkerKind::Start, 0.2).item_type(),
            MissionItemType::Marker
        );
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert_eq!(
            MissionItem::go_to("a", f64::NAN, 0.0).validate(),
            Err(EngineError::InvalidCoordinate)
        );
        assert_eq!(
            MissionItem::takeoff("b", f64::INFINITY, AltitudeReference::Msl).validate(),
            Err(EngineError::InvalidAltitude)
        );
        assert_eq!(
            MissionItem::change_speed("c", Some(-1.0), None).validate(),
            Err(EngineError::InvalidSpeed)
        );
        assert_eq!(
            MissionItem::marker("d", MarkerKind::End, 1.5).validate(),
            Err(EngineError::InvalidMarkerRatio)
        );
        assert_eq!(
            MissionItem::new(
                "e",
                MissionItemKind::SetParameter {
                    name: ParamName::new(),
                    value: 1.0
                }
            )
            .validate(),
            Err(EngineError::InvalidParameter)
        );
    }

    #[test]
    fn test_set_parameter_name_is_bounded() {
        let item = MissionItem::set_parameter("a", "WPNAV_SPEED", 500.0).unwrap();
        assert!(item.validate().is_ok());
        assert_eq!(item.item_type(), MissionItemType::SetParameter);

        assert_eq!(
            MissionItem::set_parameter("b", "A_NAME_LONGER_THAN_16", 1.0),
            Err(EngineError::ResourceExhausted)
        );
    }

    #[test]
    fn test_validate_accepts_partial_speed_change() {
        assert!(MissionItem::change_speed("a", None, Some(2.0)).validate().is_ok());
        assert!(MissionItem::change_speed("b", None, None).validate().is_ok());
    }
}
