use rand::Rng;

use crate::common::{check_cells, check_seat, check_winner, other, GuildId, Seat, StateError, Winner};
use crate::domain::{GameKind, GameState, Grid3, Players, TicTacToeState};
use crate::games::{mention, parse_pair, three_in_a_row, GameVariant, MoveOutcome, MARKS};
use crate::render::{ButtonStyle, Component, Render};

const STYLES: [ButtonStyle; 3] = [ButtonStyle::Danger, ButtonStyle::Primary, ButtonStyle::Secondary];

/// Classic 3×3 noughts and crosses. Tokens are `"x|y"` (column, row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    players: Players,
    guild_id: Option<GuildId>,
    turn: Seat,
    board: Grid3,
    winner: Option<Winner>,
}

impl TicTacToe {
    /// Empty board with a random first player.
    pub fn new<R: Rng>(players: Players, guild_id: Option<GuildId>, rng: &mut R) -> Self {
        TicTacToe {
            players,
            guild_id,
            turn: rng.random_range(0..2),
            board: Grid3::default(),
            winner: None,
        }
    }

    pub fn board(&self) -> &Grid3 {
        &self.board
    }

    fn update_winner(&mut self) {
        self.winner = match three_in_a_row(&self.board) {
            Some(seat) => Some(Winner::Seat(seat)),
            None if self.board.iter().flatten().all(Option::is_some) => Some(Winner::Tie),
            None => None,
        };
    }

    fn style_for(&self, cell: Option<Seat>) -> ButtonStyle {
        match self.winner {
            Some(Winner::Seat(seat)) => STYLES[seat],
            Some(Winner::Tie) => STYLES[2],
            None => cell.map_or(STYLES[2], |seat| STYLES[seat]),
        }
    }
}

impl GameVariant for TicTacToe {
    const KIND: GameKind = GameKind::TicTacToe;

    fn players(&self) -> &Players {
        &self.players
    }

    fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    fn turn(&self) -> Seat {
        self.turn
    }

    fn winner(&self) -> Option<Winner> {
        self.winner
    }

    fn legal_moves(&self) -> Vec<String> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for (y, row) in self.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    moves.push(format!("{}|{}", x, y));
                }
            }
        }
        moves
    }

    fn apply_move(&mut self, _seat: Seat, token: &str) -> MoveOutcome {
        if !self.legal_moves().iter().any(|m| m == token) {
            return MoveOutcome::Rejected;
        }
        let Some((x, y)) = parse_pair(token) else {
            return MoveOutcome::Rejected;
        };
        self.board[y][x] = Some(self.turn);
        self.update_winner();
        log::debug!("tictactoe: seat {} took {}", self.turn, token);
        if self.winner.is_some() {
            return MoveOutcome::Updated;
        }
        self.turn = other(self.turn);
        MoveOutcome::TurnPassed
    }

    fn render(&self) -> Render {
        let rows = self
            .board
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let label = cell.map_or("⬛", |seat| MARKS[seat]);
                        Component::button(format!("{}|{}", x, y), label, self.style_for(*cell))
                            .disabled(cell.is_some() || self.winner.is_some())
                    })
                    .collect()
            })
            .collect();
        let body = match self.winner {
            None => format!("{} {}'s turn!", MARKS[self.turn], mention(self.players[self.turn])),
            Some(Winner::Seat(seat)) => {
                format!("{} {} is the WINNER!", MARKS[seat], mention(self.players[seat]))
            }
            Some(Winner::Tie) => "🚮 TIE!".to_string(),
        };
        Render {
            body,
            rows,
            ..Render::default()
        }
    }

    fn serialize(&self) -> GameState {
        GameState::TicTacToe(TicTacToeState {
            players: self.players,
            guild_id: self.guild_id,
            turn: self.turn,
            board: self.board,
            winner: self.winner,
        })
    }

    fn deserialize(state: GameState) -> Result<Self, StateError> {
        let GameState::TicTacToe(s) = state else {
            return Err(StateError::WrongVariant);
        };
        check_seat(s.turn)?;
        check_cells(s.board.iter().flatten())?;
        check_winner(s.winner)?;
        Ok(TicTacToe {
            players: s.players,
            guild_id: s.guild_id,
            turn: s.turn,
            board: s.board,
            winner: s.winner,
        })
    }
}
