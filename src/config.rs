use crate::ship::ShipType;

/// Side length of the three-in-a-row grids (and of each ultimate sub-board).
pub const TTT_SIZE: usize = 3;

/// Connect Four columns.
pub const C4_COLUMNS: usize = 7;
/// Connect Four rows; row 0 is the bottom of the column.
pub const C4_ROWS: usize = 6;
/// Discs in a row needed to win Connect Four.
pub const C4_RUN: usize = 4;

pub const FLEET_BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Options per chess destination menu.
pub const SELECT_CHUNK: usize = 20;

/// Upper bound on the inflated size of a state token.
pub const MAX_STATE_BYTES: u64 = 64 * 1024;

/// Environment variable consulted by [`crate::init_logging`].
pub const LOG_ENV: &str = "QUIGGLE_LOG";

/// Rules article linked from the ultimate tic tac toe board.
pub const ULTIMATE_RULES_URL: &str = "https://en.wikipedia.org/wiki/Ultimate_tic-tac-toe";

/// Turn notifications are delivered unless the user opts out.
pub const DM_NOTIFICATIONS_DEFAULT: bool = true;
