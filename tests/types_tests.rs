//! Tests for core types
//!
//! Tests identifiers, coordinates, altitude sets, home positions and errors

use drone_mission_engine::types::*;

#[cfg(test)]
mod drone_id_tests {
    use super::*;

    #[test]
    fn test_drone_id_new() {
        let id = DroneId::new(42);
        assert_eq!(id.as_u64(), 42);
    }

    #[test]
    fn test_drone_id_equality() {
        assert_eq!(DroneId::new(100), DroneId::new(100));
        assert_ne!(DroneId::new(100), DroneId::new(200));
    }

    #[test]
    fn test_drone_id_ordering() {
        let mut ids = vec![DroneId::new(3), DroneId::new(1), DroneId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![DroneId::new(1), DroneId::new(2), DroneId::new(3)]);
    }

    #[test]
    fn test_drone_id_display() {
        assert_eq!(DroneId::new(255).to_string(), "Drone-00000000000000FF");
    }
}

#[cfg(test)]
mod geo_point_tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert!(!GeoPoint::new(-90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(f64::NEG_INFINITY, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}

#[cfg(test)]
mod altitude_tests {
    use super::*;

    #[test]
    fn test_new_set_is_empty() {
        let set = AltitudeSet::new();
        for reference in AltitudeReference::ALL {
            assert_eq!(set.get(reference), None);
        }
        assert_eq!(set.known().count(), 0);
        assert_eq!(set, AltitudeSet::default());
    }

    #[test]
    fn test_references_are_independent() {
        let mut set = AltitudeSet::new();
        set.set(AltitudeReference::Home, Some(12.0));
        set.set(AltitudeReference::Msl, Some(300.0));
        set.set(AltitudeReference::Home, None);

        assert_eq!(set.get(AltitudeReference::Home), None);
        assert_eq!(set.get(AltitudeReference::Msl), Some(300.0));
        let known: Vec<_> = set.known().collect();
        assert_eq!(known, vec![(AltitudeReference::Msl, 300.0)]);
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(AltitudeReference::Ground.to_string(), "AGL");
        assert_eq!(AltitudeReference::Home.to_string(), "HOME");
        assert_eq!(AltitudeReference::Msl.to_string(), "AMSL");
    }

    #[test]
    fn test_home_position_builder() {
        let home = HomePosition::at(GeoPoint::new(47.5, 19.0))
            .with_altitude(AltitudeReference::Ground, 0.0)
            .with_altitude(AltitudeReference::Msl, 105.0);

        assert_eq!(home.position, Some(GeoPoint::new(47.5, 19.0)));
        assert_eq!(home.altitudes.get(AltitudeReference::Ground), Some(0.0));
        assert_eq!(home.altitudes.get(AltitudeReference::Home), None);
        assert_eq!(home.altitudes.get(AltitudeReference::Msl), Some(105.0));
    }

    #[test]
    fn test_default_home_is_unknown() {
        let home = HomePosition::default();
        assert_eq!(home.position, None);
        assert_eq!(home.altitudes.known().count(), 0);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(EngineError::InvalidCoordinate.to_string(), "Invalid coordinate");
        assert_eq!(EngineError::ResourceExhausted.to_string(), "Resource exhausted");
        assert_eq!(
            EngineError::UnsupportedAlgorithm.to_string(),
            "Unsupported assignment algorithm"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&EngineError::ConfigError);
    }

    #[test]
    fn test_result_propagates() {
        fn inner() -> Result<u32> {
            Err(EngineError::SlotOutOfRange)
        }
        fn outer() -> Result<u32> {
            let value = inner()?;
            Ok(value + 1)
        }
        assert_eq!(outer(), Err(EngineError::SlotOutOfRange));
    }
}
