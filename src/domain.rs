//! Serializable state records. A [`GameState`] is everything a game needs to
//! continue; it travels inside the rendered message and nowhere else.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Cell, GuildId, Seat, UserId, Winner};
use crate::config::{C4_COLUMNS, C4_ROWS, FLEET_BOARD_SIZE, TTT_SIZE};

/// The two participants. Index meaning is variant specific.
pub type Players = [UserId; 2];

/// A 3×3 grid addressed `[row][col]`.
pub type Grid3 = [[Cell; TTT_SIZE]; TTT_SIZE];

/// One player's view of the opponent's waters, addressed `[row][col]`.
pub type ShotGrid = [[Shot; FLEET_BOARD_SIZE as usize]; FLEET_BOARD_SIZE as usize];

/// The supported games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    UltimateTicTacToe,
    ConnectFour,
    Battleship,
    Chess,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::TicTacToe,
        GameKind::UltimateTicTacToe,
        GameKind::ConnectFour,
        GameKind::Battleship,
        GameKind::Chess,
    ];

    /// Title shown in the message header.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::UltimateTicTacToe => "Ultimate Tic Tac Toe",
            GameKind::ConnectFour => "Connect Four",
            GameKind::Battleship => "Battleship",
            GameKind::Chess => "Chess",
        }
    }

    /// Command name used to start a challenge.
    pub fn command(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::UltimateTicTacToe => "ulttictactoe",
            GameKind::ConnectFour => "connectfour",
            GameKind::Battleship => "battleship",
            GameKind::Chess => "chess",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for GameKind {
    type Err = String;

    /// Accepts the command name or the title, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        GameKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.command() == wanted || kind.title().replace(' ', "").to_lowercase() == wanted
            })
            .ok_or_else(|| format!("unknown game: {}", s))
    }
}

/// Variant-tagged record carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    TicTacToe(TicTacToeState),
    UltimateTicTacToe(UltimateState),
    ConnectFour(ConnectFourState),
    Battleship(BattleshipState),
    Chess(ChessState),
    Invite(InviteState),
}

impl GameState {
    pub fn players(&self) -> &Players {
        match self {
            GameState::TicTacToe(s) => &s.players,
            GameState::UltimateTicTacToe(s) => &s.players,
            GameState::ConnectFour(s) => &s.players,
            GameState::Battleship(s) => &s.players,
            GameState::Chess(s) => &s.players,
            GameState::Invite(s) => &s.players,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    pub players: Players,
    pub guild_id: Option<GuildId>,
    pub turn: Seat,
    pub board: Grid3,
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltimateState {
    pub players: Players,
    pub guild_id: Option<GuildId>,
    pub turn: Seat,
    /// Sub-boards addressed `[board_row][board_col]`, each a [`Grid3`].
    pub boards: [[Grid3; TTT_SIZE]; TTT_SIZE],
    /// Resolved outcome of each sub-board; `None` while still open.
    pub board_winners: [[Option<Winner>; TTT_SIZE]; TTT_SIZE],
    /// Sub-board the next move must be played in; `None` means any.
    pub current_board: Option<(usize, usize)>,
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourState {
    pub players: Players,
    pub guild_id: Option<GuildId>,
    pub turn: Seat,
    /// Columns of discs, `[col][row]` with row 0 at the bottom.
    pub board: [[Cell; C4_ROWS]; C4_COLUMNS],
    pub winner: Option<Winner>,
    /// Discs that form the winning line, same addressing as `board`.
    pub winning_line: [[bool; C4_ROWS]; C4_COLUMNS],
}

/// Outcome of a shot at one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shot {
    #[default]
    Unknown,
    Hit,
    Miss,
}

/// A fleet entry: either still waiting for placement (its length), or the
/// ordered cells it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipSlot {
    Unplaced(usize),
    Placed(Vec<(usize, usize)>),
}

/// Partial coordinate input accumulated across button presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub row: Option<usize>,
    pub col: Option<usize>,
}

impl Selection {
    /// Both axes picked.
    pub fn cell(&self) -> Option<(usize, usize)> {
        Some((self.row?, self.col?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleshipState {
    pub players: Players,
    pub guild_id: Option<GuildId>,
    /// Seat that shoots next; rolled at creation, meaningless during setup.
    pub turn: Seat,
    pub setup: bool,
    /// `shots[seat]` is what `seat` has learned about the opponent's grid.
    pub shots: [ShotGrid; 2],
    pub fleets: [Vec<ShipSlot>; 2],
    pub selections: [Selection; 2],
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessState {
    /// `players[0]` plays white.
    pub players: Players,
    pub guild_id: Option<GuildId>,
    /// Position in the rules capability's compact text form.
    pub board: String,
    /// Source square picked by the side to move, awaiting a destination.
    pub pending: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteState {
    /// `[challenger, invitee]`.
    pub players: Players,
    pub game: GameKind,
    pub guild_id: Option<GuildId>,
}
