//! Slot-to-drone mapping and automatic augmentation from spare drones

use super::greedy::find_assignment;
use super::matrix::build_distance_matrix;
use crate::system::config::EngineConfig;
use crate::types::*;
use alloc::vec::Vec;
use log::{debug, warn};

/// Mission slot index -> assigned drone
///
/// Non-empty entries never repeat; every mutating method checks this before
/// touching the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    slots: Vec<Option<DroneId>>,
}

impl Mapping {
    /// Create an empty mapping with `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: alloc::vec![None; slot_count],
        }
    }

    /// Create a mapping from existing slot contents
    pub fn from_slots(slots: Vec<Option<DroneId>>) -> Result<Self> {
        let mapping = Self { slots };
        for (index, drone) in mapping.slots.iter().enumerate() {
            if let Some(drone) = drone {
                if mapping.slots[..index].contains(&Some(*drone)) {
                    return Err(EngineError::DuplicateAssignment);
                }
            }
        }
        Ok(mapping)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the mapping has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drone assigned to `slot`
    pub fn get(&self, slot: usize) -> Option<DroneId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Slot contents
    pub fn slots(&self) -> &[Option<DroneId>] {
        &self.slots
    }

    /// Indices of slots without a drone
    pub fn unassigned_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, drone)| drone.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// True if `drone` is assigned to any slot
    pub fn contains_drone(&self, drone: DroneId) -> bool {
        self.slots.contains(&Some(drone))
    }

    /// Slot the given drone is assigned to
    pub fn slot_of(&self, drone: DroneId) -> Option<usize> {
        self.slots.iter().position(|d| *d == Some(drone))
    }

    /// Assign `drone` to `slot`, replacing whatever was there
    pub fn assign(&mut self, slot: usize, drone: DroneId) -> Result<()> {
        if slot >= self.slots.len() {
            return Err(EngineError::SlotOutOfRange);
        }
        match self.slot_of(drone) {
            Some(existing) if existing != slot => Err(EngineError::DuplicateAssignment),
            _ => {
                self.slots[slot] = Some(drone);
                Ok(())
            }
        }
    }

    /// Clear `slot`, returning the drone that was assigned to it
    pub fn clear_slot(&mut self, slot: usize) -> Option<DroneId> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Merge `(drone, slot)` pairs into the mapping
    ///
    /// Either every pair is applied or none is: a pair naming an occupied
    /// slot, an out-of-range slot or an already mapped drone rejects the
    /// whole batch. Returns the number of pairs applied.
    pub fn apply_pairs(&mut self, pairs: &[(DroneId, usize)]) -> Result<usize> {
        for (index, (drone, slot)) in pairs.iter().enumerate() {
            if *slot >= self.slots.len() {
                warn!("Rejecting mapping merge: slot {} out of range", slot);
                return Err(EngineError::SlotOutOfRange);
            }
            let repeated = pairs[..index]
                .iter()
                .any(|(d, s)| d == drone || s == slot);
            if self.slots[*slot].is_some() || self.contains_drone(*drone) || repeated {
                warn!(
                    "Rejecting mapping merge: {} or slot {} already assigned",
                    drone, slot
                );
                return Err(EngineError::DuplicateAssignment);
            }
        }

        for (drone, slot) in pairs {
            self.slots[*slot] = Some(*drone);
        }
        Ok(pairs.len())
    }
}

/// Assign spare drones to unassigned slots that they are standing close to
///
/// `slot_positions[i]` is the planned position of slot `i` (`None` if
/// unknown); `drones` lists drones with their current position (`None` if
/// unknown). Drones already present in the mapping, and drones or slots
/// without a position, take no part in the matching. Repeated drone ids
/// are matched at most once. The distance matrix is
/// solved with the configured algorithm and threshold and the resulting
/// pairs are merged into `mapping`.
///
/// Returns the number of newly assigned slots.
pub fn augment_mapping_from_spare_drones<P, D>(
    mapping: &mut Mapping,
    slot_positions: &[Option<P>],
    drones: &[(DroneId, Option<P>)],
    distance: D,
    config: &EngineConfig,
) -> Result<usize>
where
    P: Copy,
    D: Fn(&P, &P) -> f64,
{
    config.validate()?;

    // A drone listed more than once takes part with its first located entry
    let mut spares: Vec<(DroneId, P)> = Vec::new();
    for (id, position) in drones {
        if mapping.contains_drone(*id) || spares.iter().any(|(spare, _)| spare == id) {
            continue;
        }
        if let Some(p) = position {
            spares.push((*id, *p));
        }
    }

    let free_slots: Vec<(usize, P)> = mapping
        .unassigned_slots()
        .into_iter()
        .filter_map(|slot| slot_positions.get(slot).copied().flatten().map(|p| (slot, p)))
        .collect();

    if spares.is_empty() || free_slots.is_empty() {
        return Ok(0);
    }

    let matrix = build_distance_matrix(&spares, &free_slots, |s| s.1, |t| t.1, distance);
    let matches = find_assignment(&matrix, config.matching_threshold, config.algorithm)?;

    let pairs: Vec<(DroneId, usize)> = matches
        .into_iter()
        .map(|(source, target)| (spares[source].0, free_slots[target].0))
        .collect();

    let assigned = mapping.apply_pairs(&pairs)?;
    debug!(
        "Assigned {} of {} spare drones to {} free slots",
        assigned,
        spares.len(),
        free_slots.len()
    );
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::euclidean_distance_2d;
    use alloc::vec;

    #[test]
    fn test_from_slots_rejects_duplicates() {
        let id = DroneId::new(1);
        assert_eq!(
            Mapping::from_slots(vec![Some(id), None, Some(id)]),
            Err(EngineError::DuplicateAssignment)
        );
        assert!(Mapping::from_slots(vec![Some(id), None, Some(DroneId::new(2))]).is_ok());
    }

    #[test]
    fn test_assign_and_unassigned_slots() {
        let mut mapping = Mapping::new(3);
        mapping.assign(1, DroneId::new(7)).unwrap();

        assert_eq!(mapping.get(1), Some(DroneId::new(7)));
        assert_eq!(mapping.unassigned_slots(), vec![0, 2]);
        assert_eq!(
            mapping.assign(2, DroneId::new(7)),
            Err(EngineError::DuplicateAssignment)
        );
        assert_eq!(mapping.assign(5, DroneId::new(8)), Err(EngineError::SlotOutOfRange));
        assert_eq!(mapping.clear_slot(1), Some(DroneId::new(7)));
        assert_eq!(mapping.unassigned_slots(), vec![0, 1, 2]);
    }

    #[test]
    fn test_apply_pairs_is_all_or_nothing() {
        let mut mapping = Mapping::new(3);
        mapping.assign(0, DroneId::new(1)).unwrap();

        let result = mapping.apply_pairs(&[(DroneId::new(2), 1), (DroneId::new(3), 0)]);
        assert_eq!(result, Err(EngineError::DuplicateAssignment));
        assert_eq!(mapping.get(1), None);

        let result = mapping.apply_pairs(&[(DroneId::new(2), 1), (DroneId::new(3), 2)]);
        assert_eq!(result, Ok(2));
        assert!(mapping.unassigned_slots().is_empty());
    }

    #[test]
    fn test_augment_skips_mapped_drones_and_far_slots() {
        let mut mapping = Mapping::new(3);
        mapping.assign(0, DroneId::new(1)).unwrap();

        let slots = [Some([0.0, 0.0]), Some([10.0, 0.0]), Some([100.0, 0.0])];
        let drones = [
            (DroneId::new(1), Some([10.0, 0.5])),
            (DroneId::new(2), Some([10.0, 1.0])),
            (DroneId::new(3), None),
        ];

        let assigned = augment_mapping_from_spare_drones(
            &mut mapping,
            &slots,
            &drones,
            euclidean_distance_2d,
            &EngineConfig::new(),
        )
        .unwrap();

        assert_eq!(assigned, 1);
        assert_eq!(mapping.get(1), Some(DroneId::new(2)));
        assert_eq!(mapping.get(2), None);
    }

    #[test]
    fn test_augment_ignores_repeated_drone_entries() {
        let mut mapping = Mapping::new(2);
        let slots = [Some([0.0, 0.0]), Some([3.0, 0.0])];
        let drones = [
            (DroneId::new(5), Some([0.5, 0.0])),
            (DroneId::new(5), Some([3.0, 0.5])),
            (DroneId::new(6), Some([3.0, 1.0])),
        ];

        let assigned = augment_mapping_from_spare_drones(
            &mut mapping,
            &slots,
            &drones,
            euclidean_distance_2d,
            &EngineConfig::new(),
        )
        .unwrap();

        assert_eq!(assigned, 2);
        assert_eq!(mapping.get(0), Some(DroneId::new(5)));
        assert_eq!(mapping.get(1), Some(DroneId::new(6)));
    }
}
