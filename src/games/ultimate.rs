use rand::Rng;

use crate::common::{check_cells, check_seat, check_winner, other, GuildId, Seat, StateError, Winner};
use crate::config::{TTT_SIZE, ULTIMATE_RULES_URL};
use crate::domain::{GameKind, GameState, Grid3, Players, UltimateState};
use crate::games::{mention, parse_pair, three_in_a_row, GameVariant, MoveOutcome, MARKS};
use crate::render::{ButtonStyle, Component, Render};

const STYLES: [ButtonStyle; 3] = [ButtonStyle::Danger, ButtonStyle::Primary, ButtonStyle::Secondary];
const LETTERS: [&str; 2] = ["x", "o"];

type Meta = [[Option<Winner>; TTT_SIZE]; TTT_SIZE];

/// Tic tac toe played on a 3×3 grid of sub-boards.
///
/// Tokens are `"x|y"` (column, row). While a sub-board is selected they pick
/// a cell in it; when the player may choose freely they first pick the
/// sub-board itself, which does not consume the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateTicTacToe {
    players: Players,
    guild_id: Option<GuildId>,
    turn: Seat,
    boards: [[Grid3; TTT_SIZE]; TTT_SIZE],
    board_winners: Meta,
    current_board: Option<(usize, usize)>,
    winner: Option<Winner>,
}

impl UltimateTicTacToe {
    pub fn new<R: Rng>(players: Players, guild_id: Option<GuildId>, rng: &mut R) -> Self {
        UltimateTicTacToe {
            players,
            guild_id,
            turn: rng.random_range(0..2),
            boards: Default::default(),
            board_winners: Default::default(),
            current_board: None,
            winner: None,
        }
    }

    pub fn board_winners(&self) -> &Meta {
        &self.board_winners
    }

    /// Sub-board the next cell must be played in; `None` while the player
    /// still has to pick one.
    pub fn current_board(&self) -> Option<(usize, usize)> {
        self.current_board
    }

    pub fn sub_board(&self, row: usize, col: usize) -> &Grid3 {
        &self.boards[row][col]
    }

    fn resolve_sub_board(&mut self, (br, bc): (usize, usize)) {
        let grid = &self.boards[br][bc];
        self.board_winners[br][bc] = match three_in_a_row(grid) {
            Some(seat) => Some(Winner::Seat(seat)),
            None if grid.iter().flatten().all(Option::is_some) => Some(Winner::Tie),
            None => None,
        };
    }

    fn resolve_meta(&mut self) {
        let seats = self.board_winners.map(|row| row.map(|w| w.and_then(Winner::seat)));
        self.winner = match three_in_a_row(&seats) {
            Some(seat) => Some(Winner::Seat(seat)),
            None if self.board_winners.iter().flatten().all(Option::is_some) => Some(Winner::Tie),
            None => None,
        };
    }

    fn style_for(&self, owner: Option<Seat>) -> ButtonStyle {
        match self.winner {
            Some(Winner::Seat(seat)) => STYLES[seat],
            Some(Winner::Tie) => STYLES[2],
            None => owner.map_or(STYLES[2], |seat| STYLES[seat]),
        }
    }

    /// Text drawing of all 81 cells. Resolved sub-boards collapse to their
    /// outcome letter while the game is running.
    fn drawing(&self) -> String {
        let collapse = self.winner.is_none();
        let mut out = String::new();
        for br in 0..TTT_SIZE {
            for r in 0..TTT_SIZE {
                let blocks: Vec<String> = (0..TTT_SIZE)
                    .map(|bc| {
                        let cells: Vec<&str> = (0..TTT_SIZE)
                            .map(|c| match self.board_winners[br][bc] {
                                Some(Winner::Seat(seat)) if collapse => LETTERS[seat],
                                Some(Winner::Tie) if collapse => "t",
                                _ => self.boards[br][bc][r][c].map_or("_", |seat| LETTERS[seat]),
                            })
                            .collect();
                        cells.join("  ")
                    })
                    .collect();
                out.push('\n');
                out.push_str(&blocks.join(" | "));
            }
            if br + 1 < TTT_SIZE {
                out.push_str("\n--------+---------+--------");
            }
        }
        out
    }
}

impl GameVariant for UltimateTicTacToe {
    const KIND: GameKind = GameKind::UltimateTicTacToe;

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
        match self.current_board {
            Some((br, bc)) => {
                for (y, row) in self.boards[br][bc].iter().enumerate() {
                    for (x, cell) in row.iter().enumerate() {
                        if cell.is_none() {
                            moves.push(format!("{}|{}", x, y));
                        }
                    }
                }
            }
            None => {
                for (y, row) in self.board_winners.iter().enumerate() {
                    for (x, resolved) in row.iter().enumerate() {
                        if resolved.is_none() {
                            moves.push(format!("{}|{}", x, y));
                        }
                    }
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
        let Some(board) = self.current_board else {
            self.current_board = Some((y, x));
            return MoveOutcome::Updated;
        };
        self.boards[board.0][board.1][y][x] = Some(self.turn);
        self.resolve_sub_board(board);
        self.resolve_meta();
        log::debug!("ultimate: seat {} took {} on board {:?}", self.turn, token, board);
        self.current_board = match self.board_winners[y][x] {
            None if self.winner.is_none() => Some((y, x)),
            _ => None,
        };
        if self.winner.is_some() {
            return MoveOutcome::Updated;
        }
        self.turn = other(self.turn);
        MoveOutcome::TurnPassed
    }

    fn render(&self) -> Render {
        let mut rows: Vec<Vec<Component>> = Vec::with_capacity(TTT_SIZE + 1);
        match (self.current_board, self.winner) {
            (Some((br, bc)), None) => {
                for (y, row) in self.boards[br][bc].iter().enumerate() {
                    rows.push(
                        row.iter()
                            .enumerate()
                            .map(|(x, cell)| {
                                let style = if (y, x) == (br, bc) {
                                    ButtonStyle::Success
                                } else {
                                    self.style_for(*cell)
                                };
                                let label = cell.map_or("⬛", |seat| MARKS[seat]);
                                Component::button(format!("{}|{}", x, y), label, style)
                                    .disabled(cell.is_some())
                            })
                            .collect(),
                    );
                }
            }
            _ => {
                for (y, row) in self.board_winners.iter().enumerate() {
                    rows.push(
                        row.iter()
                            .enumerate()
                            .map(|(x, resolved)| {
                                let (label, owner) = match resolved {
                                    Some(Winner::Seat(seat)) => (MARKS[*seat], Some(*seat)),
                                    Some(Winner::Tie) => ("➖", None),
                                    None => ("⬛", None),
                                };
                                Component::button(format!("{}|{}", x, y), label, self.style_for(owner))
                                    .disabled(resolved.is_some() || self.winner.is_some())
                            })
                            .collect(),
                    );
                }
            }
        }
        rows.push(vec![Component::link("Wikipedia Article (Rules)", ULTIMATE_RULES_URL)]);

        let body = match self.winner {
            None => {
                let mut text =
                    format!("{} {}'s turn!", MARKS[self.turn], mention(self.players[self.turn]));
                if self.current_board.is_none() {
                    text.push_str(" pick a board!");
                }
                text
            }
            Some(Winner::Seat(seat)) => {
                format!("{} {} is the WINNER!", MARKS[seat], mention(self.players[seat]))
            }
            Some(Winner::Tie) => "🚮 TIE!".to_string(),
        };
        Render {
            header: self.drawing(),
            body,
            rows,
            ..Render::default()
        }
    }

    fn serialize(&self) -> GameState {
        GameState::UltimateTicTacToe(UltimateState {
            players: self.players,
            guild_id: self.guild_id,
            turn: self.turn,
            boards: self.boards,
            board_winners: self.board_winners,
            current_board: self.current_board,
            winner: self.winner,
        })
    }

    fn deserialize(state: GameState) -> Result<Self, StateError> {
        let GameState::UltimateTicTacToe(s) = state else {
            return Err(StateError::WrongVariant);
        };
        check_seat(s.turn)?;
        check_cells(s.boards.iter().flatten().flatten().flatten())?;
        for resolved in s.board_winners.iter().flatten() {
            check_winner(*resolved)?;
        }
        check_winner(s.winner)?;
        if let Some((br, bc)) = s.current_board {
            if br >= TTT_SIZE || bc >= TTT_SIZE {
                return Err(StateError::OutOfRange(br, bc));
            }
        }
        Ok(UltimateTicTacToe {
            players: s.players,
            guild_id: s.guild_id,
            turn: s.turn,
            boards: s.boards,
            board_winners: s.board_winners,
            current_board: s.current_board,
            winner: s.winner,
        })
    }
}
