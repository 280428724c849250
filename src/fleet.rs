//! One player's battleship fleet: ship slots plus an occupancy mask.

use core::fmt;

use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{PlacementError, StateError};
use crate::config::{FLEET, FLEET_BOARD_SIZE, NUM_SHIPS};
use crate::domain::ShipSlot;
use crate::ship::{hull, Direction, ShipType};

pub type Mask = BitBoard<u128, { FLEET_BOARD_SIZE as usize }>;

#[derive(Clone, PartialEq, Eq)]
pub struct Fleet {
    slots: Vec<ShipSlot>,
    occupied: Mask,
}

impl Fleet {
    /// Standard fleet with nothing on the grid yet.
    pub fn new() -> Self {
        Fleet {
            slots: FLEET
                .iter()
                .map(|def| ShipSlot::Unplaced(def.length()))
                .collect(),
            occupied: Mask::new(),
        }
    }

    /// Rebuild from stored slots, checking them against [`FLEET`].
    pub fn from_slots(slots: Vec<ShipSlot>) -> Result<Self, StateError> {
        if slots.len() != NUM_SHIPS {
            return Err(StateError::FleetShape);
        }
        let mut occupied = Mask::new();
        for (slot, def) in slots.iter().zip(FLEET.iter()) {
            match slot {
                ShipSlot::Unplaced(len) if *len == def.length() => {}
                ShipSlot::Placed(cells) if cells.len() == def.length() => {
                    let mask = Mask::from_cells(cells.iter().copied())
                        .map_err(|_| StateError::ShipOffGrid)?;
                    if !(occupied & mask).is_empty() {
                        return Err(StateError::FleetShape);
                    }
                    occupied |= mask;
                }
                _ => return Err(StateError::FleetShape),
            }
        }
        Ok(Fleet { slots, occupied })
    }

    pub fn slots(&self) -> &[ShipSlot] {
        &self.slots
    }

    /// Every ship cell of this fleet.
    pub fn occupied(&self) -> Mask {
        self.occupied
    }

    pub fn occupies(&self, row: usize, col: usize) -> bool {
        self.occupied.get(row, col).unwrap_or(false)
    }

    /// Index and type of the next ship waiting to be placed.
    pub fn next_unplaced(&self) -> Option<(usize, ShipType)> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, ShipSlot::Unplaced(_)))
            .map(|i| (i, FLEET[i]))
    }

    /// All ships are on the grid.
    pub fn is_deployed(&self) -> bool {
        self.next_unplaced().is_none()
    }

    /// Place the next unplaced ship at `anchor`, extending in `direction`.
    pub fn place_next(
        &mut self,
        anchor: (usize, usize),
        direction: Direction,
    ) -> Result<ShipType, PlacementError> {
        let (index, def) = self.next_unplaced().ok_or(PlacementError::NoShipsLeft)?;
        let cells = hull(anchor, direction, def.length())?;
        let mask = Mask::from_cells(cells.iter().copied())?;
        if !(self.occupied & mask).is_empty() {
            return Err(PlacementError::Overlaps);
        }
        self.occupied |= mask;
        self.slots[index] = ShipSlot::Placed(cells);
        Ok(def)
    }

    /// A random anchor and direction for the next ship that fits.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<((usize, usize), Direction), PlacementError> {
        let (_, def) = self.next_unplaced().ok_or(PlacementError::NoShipsLeft)?;
        let size = FLEET_BOARD_SIZE as usize;
        for _ in 0..100 {
            let anchor = (rng.random_range(0..size), rng.random_range(0..size));
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let Ok(cells) = hull(anchor, direction, def.length()) else {
                continue;
            };
            let mask = Mask::from_cells(cells)?;
            if (self.occupied & mask).is_empty() {
                return Ok((anchor, direction));
            }
        }
        Err(PlacementError::Overlaps)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Fleet {{\n  slots: {:?},\n  occupied: {:?}\n}}",
            self.slots, self.occupied
        )
    }
}
