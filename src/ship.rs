//! Ship definitions and placement geometry.

use core::fmt;

use crate::common::PlacementError;
use crate::config::FLEET_BOARD_SIZE;

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Direction a ship extends from its anchor cell. Rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Direction for the `d|n` button index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// (row, col) step per segment.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "⬆️",
            Direction::Down => "⬇️",
            Direction::Left => "⬅️",
            Direction::Right => "➡️",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Cells covered by a ship of `length` anchored at `(row, col)`.
///
/// Fails with `OutOfBounds` if any segment would leave the fleet grid.
pub fn hull(
    anchor: (usize, usize),
    direction: Direction,
    length: usize,
) -> Result<Vec<(usize, usize)>, PlacementError> {
    let size = FLEET_BOARD_SIZE as isize;
    let (dr, dc) = direction.step();
    let mut cells = Vec::with_capacity(length);
    for i in 0..length as isize {
        let r = anchor.0 as isize + dr * i;
        let c = anchor.1 as isize + dc * i;
        if !(0..size).contains(&r) || !(0..size).contains(&c) {
            return Err(PlacementError::OutOfBounds);
        }
        cells.push((r as usize, c as usize));
    }
    Ok(cells)
}
