//! Shared vocabulary: seats, outcomes and the errors raised while rebuilding
//! or mutating game state.

use serde::{Deserialize, Serialize};

use crate::bitboard::BitBoardError;

/// Opaque chat-platform user identifier.
pub type UserId = u64;

/// Opaque context (server) identifier. Carried through, never interpreted.
pub type GuildId = u64;

/// Index into a game's `players` pair.
pub type Seat = usize;

/// A grid cell: empty, or owned by the player in that seat.
pub type Cell = Option<Seat>;

/// The seat that plays after `seat`.
pub fn other(seat: Seat) -> Seat {
    (seat + 1) % 2
}

/// How a finished game (or a resolved sub-board) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Seat(Seat),
    Tie,
}

impl Winner {
    /// The winning seat, if the outcome was not a tie.
    pub fn seat(self) -> Option<Seat> {
        match self {
            Winner::Seat(seat) => Some(seat),
            Winner::Tie => None,
        }
    }
}

/// A decoded record cannot describe a live game of its variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `turn` or a cell owner is not 0 or 1.
    SeatOutOfRange(Seat),
    /// A fleet does not hold the standard ship list.
    FleetShape,
    /// A placed ship lies outside the grid.
    ShipOffGrid,
    /// The chess position text was rejected by the rules capability.
    Position(String),
    /// A stored coordinate lies outside its grid.
    OutOfRange(usize, usize),
    /// The record belongs to another variant.
    WrongVariant,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StateError::SeatOutOfRange(seat) => write!(f, "seat {} is out of range", seat),
            StateError::FleetShape => write!(f, "fleet does not match the standard ship list"),
            StateError::ShipOffGrid => write!(f, "placed ship lies outside the grid"),
            StateError::Position(text) => write!(f, "invalid chess position: {}", text),
            StateError::OutOfRange(r, c) => write!(f, "coordinate ({}, {}) is out of range", r, c),
            StateError::WrongVariant => write!(f, "state belongs to a different game"),
        }
    }
}

impl std::error::Error for StateError {}

/// Why a ship could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Underlying bitboard error (index outside the fleet grid).
    BitBoard(BitBoardError),
    /// Some segment would leave the grid.
    OutOfBounds,
    /// Some segment would cover an already placed ship.
    Overlaps,
    /// Every ship of this fleet is already on the grid.
    NoShipsLeft,
}

impl From<BitBoardError> for PlacementError {
    fn from(err: BitBoardError) -> Self {
        PlacementError::BitBoard(err)
    }
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlaps => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::NoShipsLeft => write!(f, "No ships left to place"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Check that a stored seat index is 0 or 1.
pub(crate) fn check_seat(seat: Seat) -> Result<Seat, StateError> {
    if seat < 2 {
        Ok(seat)
    } else {
        Err(StateError::SeatOutOfRange(seat))
    }
}

/// Check a whole grid of cells.
pub(crate) fn check_cells<'a, I>(cells: I) -> Result<(), StateError>
where
    I: IntoIterator<Item = &'a Cell>,
{
    for cell in cells {
        if let Some(seat) = cell {
            check_seat(*seat)?;
        }
    }
    Ok(())
}

/// Check a stored outcome.
pub(crate) fn check_winner(winner: Option<Winner>) -> Result<(), StateError> {
    if let Some(Winner::Seat(seat)) = winner {
        check_seat(seat)?;
    }
    Ok(())
}
