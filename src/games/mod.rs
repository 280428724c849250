//! The game variants behind one contract, and the registry that picks the
//! right one for a decoded state.

pub mod battleship;
pub mod chess;
pub mod connect_four;
pub mod tictactoe;
pub mod ultimate;

use core::fmt;

use rand::Rng;

use crate::common::{GuildId, Seat, StateError, Winner};
use crate::config::TTT_SIZE;
use crate::domain::{GameKind, GameState, Players};
use crate::render::Render;

pub use battleship::Battleship;
pub use chess::Chess;
pub use connect_four::ConnectFour;
pub use tictactoe::TicTacToe;
pub use ultimate::UltimateTicTacToe;

/// Result of offering a move token to a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Token not legal here; nothing changed.
    Rejected,
    /// State changed but the same player keeps acting, or the game just ended.
    Updated,
    /// A full turn was consumed and the other player now acts.
    TurnPassed,
    /// Nothing changed; answer the actor privately.
    Private(Notice),
}

impl MoveOutcome {
    /// The boolean form: a turn was fully consumed.
    pub fn applied(&self) -> bool {
        matches!(self, MoveOutcome::TurnPassed)
    }

    /// Whether the shared state was mutated.
    pub fn changed(&self) -> bool {
        matches!(self, MoveOutcome::Updated | MoveOutcome::TurnPassed)
    }
}

/// Private, non-persistent replies shown only to the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotInGame,
    NotYourTurn,
    InviterCannotRespond,
    DecodeFailed,
    RulesFailed,
    /// The actor's own map.
    Map(String),
    /// A direction was picked before both axes; carries the current map.
    PickDirectionLast(String),
    InvalidPlacement,
    NoShipsLeft,
    AlreadyTargeted,
    MapOnlyOffTurn,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotInGame => f.write_str("You are not in this game!"),
            Notice::NotYourTurn => f.write_str("It isn't your turn!"),
            Notice::InviterCannotRespond => f.write_str("You're the inviter, silly!"),
            Notice::DecodeFailed => f.write_str("Something went wrong reading this game."),
            Notice::RulesFailed => f.write_str("Something went wrong applying that move."),
            Notice::Map(map) => f.write_str(map),
            Notice::PickDirectionLast(map) => write!(
                f,
                "Select the ship direction last, this will confirm the ship placement\n\
                 (note: one of your inputs probably got eaten, here is your current grid)\n{}",
                map
            ),
            Notice::InvalidPlacement => f.write_str(
                "Ship placement invalid, ship either overlaps another ship or ends up off the edge of the map\n\
                 try another direction or change ship placement",
            ),
            Notice::NoShipsLeft => f.write_str(
                "You don't have any pieces left, wait for your opponent to finish their selections!",
            ),
            Notice::AlreadyTargeted => {
                f.write_str("You've already fired there, that would be a waste of a turn!")
            }
            Notice::MapOnlyOffTurn => {
                f.write_str("You can only check your map when it isn't your turn!")
            }
        }
    }
}

/// The contract every variant implements.
pub trait GameVariant: Sized {
    const KIND: GameKind;

    fn players(&self) -> &Players;

    fn guild_id(&self) -> Option<GuildId>;

    /// Seat expected to act next.
    fn turn(&self) -> Seat;

    fn winner(&self) -> Option<Winner>;

    /// Tokens accepted by [`GameVariant::apply_move`] right now. Empty once
    /// the game is over.
    fn legal_moves(&self) -> Vec<String>;

    /// Offer `token` on behalf of `seat`. Anything outside
    /// [`GameVariant::legal_moves`] is rejected without mutation.
    fn apply_move(&mut self, seat: Seat, token: &str) -> MoveOutcome;

    /// Draw the current state.
    fn render(&self) -> Render;

    fn serialize(&self) -> GameState;

    fn deserialize(state: GameState) -> Result<Self, StateError>;

    /// Whether players may act when it is not their turn (the variant then
    /// enforces turn order itself).
    fn acts_off_turn(&self) -> bool {
        false
    }

    /// Seat that must act before anything else can happen, if exactly one.
    fn awaiting(&self) -> Option<Seat> {
        match self.winner() {
            Some(_) => None,
            None => Some(self.turn()),
        }
    }
}

/// Registry over the five variants, keyed by the state discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Game {
    TicTacToe(TicTacToe),
    UltimateTicTacToe(UltimateTicTacToe),
    ConnectFour(ConnectFour),
    Battleship(Battleship),
    Chess(Chess),
}

macro_rules! each {
    ($game:expr, $g:ident => $body:expr) => {
        match $game {
            Game::TicTacToe($g) => $body,
            Game::UltimateTicTacToe($g) => $body,
            Game::ConnectFour($g) => $body,
            Game::Battleship($g) => $body,
            Game::Chess($g) => $body,
        }
    };
}

impl Game {
    /// Fresh game of `kind`; all random choices come from `rng`.
    pub fn new<R: Rng>(kind: GameKind, players: Players, guild_id: Option<GuildId>, rng: &mut R) -> Self {
        match kind {
            GameKind::TicTacToe => Game::TicTacToe(TicTacToe::new(players, guild_id, rng)),
            GameKind::UltimateTicTacToe => {
                Game::UltimateTicTacToe(UltimateTicTacToe::new(players, guild_id, rng))
            }
            GameKind::ConnectFour => Game::ConnectFour(ConnectFour::new(players, guild_id, rng)),
            GameKind::Battleship => Game::Battleship(Battleship::new(players, guild_id, rng)),
            GameKind::Chess => Game::Chess(Chess::new(players, guild_id, rng)),
        }
    }

    /// Rebuild the variant named by the state's discriminant.
    pub fn from_state(state: GameState) -> Result<Self, StateError> {
        Ok(match state {
            GameState::TicTacToe(_) => Game::TicTacToe(TicTacToe::deserialize(state)?),
            GameState::UltimateTicTacToe(_) => {
                Game::UltimateTicTacToe(UltimateTicTacToe::deserialize(state)?)
            }
            GameState::ConnectFour(_) => Game::ConnectFour(ConnectFour::deserialize(state)?),
            GameState::Battleship(_) => Game::Battleship(Battleship::deserialize(state)?),
            GameState::Chess(_) => Game::Chess(Chess::deserialize(state)?),
            GameState::Invite(_) => return Err(StateError::WrongVariant),
        })
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Game::TicTacToe(_) => TicTacToe::KIND,
            Game::UltimateTicTacToe(_) => UltimateTicTacToe::KIND,
            Game::ConnectFour(_) => ConnectFour::KIND,
            Game::Battleship(_) => Battleship::KIND,
            Game::Chess(_) => Chess::KIND,
        }
    }

    pub fn players(&self) -> &Players {
        each!(self, g => g.players())
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        each!(self, g => g.guild_id())
    }

    pub fn turn(&self) -> Seat {
        each!(self, g => g.turn())
    }

    pub fn winner(&self) -> Option<Winner> {
        each!(self, g => g.winner())
    }

    pub fn legal_moves(&self) -> Vec<String> {
        each!(self, g => g.legal_moves())
    }

    pub fn apply_move(&mut self, seat: Seat, token: &str) -> MoveOutcome {
        each!(self, g => g.apply_move(seat, token))
    }

    pub fn render(&self) -> Render {
        each!(self, g => g.render())
    }

    pub fn serialize(&self) -> GameState {
        each!(self, g => g.serialize())
    }

    pub fn acts_off_turn(&self) -> bool {
        each!(self, g => g.acts_off_turn())
    }

    pub fn awaiting(&self) -> Option<Seat> {
        each!(self, g => g.awaiting())
    }
}

/// Owner of a complete row, column or diagonal of a 3×3 grid.
pub(crate) fn three_in_a_row(grid: &[[Option<Seat>; TTT_SIZE]; TTT_SIZE]) -> Option<Seat> {
    let mut lines: Vec<[(usize, usize); 3]> = Vec::with_capacity(8);
    for i in 0..TTT_SIZE {
        lines.push([(i, 0), (i, 1), (i, 2)]);
        lines.push([(0, i), (1, i), (2, i)]);
    }
    lines.push([(0, 0), (1, 1), (2, 2)]);
    lines.push([(0, 2), (1, 1), (2, 0)]);
    lines.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|(r, col)| grid[r][col]);
        match a {
            Some(seat) if b == a && c == a => Some(seat),
            _ => None,
        }
    })
}

/// Parse a `"<a>|<b>"` token into its two numeric parts.
pub(crate) fn parse_pair(token: &str) -> Option<(usize, usize)> {
    let (a, b) = token.split_once('|')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// Marks shown for each seat on the three-in-a-row boards.
pub(crate) const MARKS: [&str; 2] = ["🇽", "🇴"];

pub(crate) fn mention(user: u64) -> String {
    format!("<@{}>", user)
}
