use rand::Rng;

use crate::common::{check_cells, check_seat, check_winner, other, Cell, GuildId, Seat, StateError, Winner};
use crate::config::{C4_COLUMNS, C4_ROWS, C4_RUN};
use crate::domain::{ConnectFourState, GameKind, GameState, Players};
use crate::games::{mention, GameVariant, MoveOutcome};
use crate::render::{ButtonStyle, Component, Render};

const NUMBERS: [&str; 10] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"];
const DISCS: [&str; 2] = ["🔴", "🟢"];
const WINNING_DISCS: [&str; 2] = ["👺", "🐸"];
const EMPTY: &str = "🔹";
const BUTTONS_PER_ROW: usize = 5;

/// (column, row) steps: up, right, up-right, down-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Gravity drop game on 7 columns of 6. Tokens are column indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectFour {
    players: Players,
    guild_id: Option<GuildId>,
    turn: Seat,
    board: [[Cell; C4_ROWS]; C4_COLUMNS],
    winner: Option<Winner>,
    winning_line: [[bool; C4_ROWS]; C4_COLUMNS],
}

impl ConnectFour {
    pub fn new<R: Rng>(players: Players, guild_id: Option<GuildId>, rng: &mut R) -> Self {
        ConnectFour {
            players,
            guild_id,
            turn: rng.random_range(0..2),
            board: [[None; C4_ROWS]; C4_COLUMNS],
            winner: None,
            winning_line: [[false; C4_ROWS]; C4_COLUMNS],
        }
    }

    /// Disc at `col`, `row` (row 0 is the bottom).
    pub fn disc(&self, col: usize, row: usize) -> Cell {
        self.board[col][row]
    }

    pub fn is_winning(&self, col: usize, row: usize) -> bool {
        self.winning_line[col][row]
    }

    fn has_room(&self, col: usize) -> bool {
        self.board[col].iter().any(Option::is_none)
    }

    /// First run of [`C4_RUN`] equal discs, scanning columns then rows.
    fn find_run(&self) -> Option<(Seat, Vec<(usize, usize)>)> {
        for col in 0..C4_COLUMNS {
            for row in 0..C4_ROWS {
                let Some(seat) = self.board[col][row] else {
                    continue;
                };
                for (dc, dr) in DIRECTIONS {
                    let run: Vec<(usize, usize)> = (0..C4_RUN as isize)
                        .map_while(|i| {
                            let c = col as isize + dc * i;
                            let r = row as isize + dr * i;
                            let inside = (0..C4_COLUMNS as isize).contains(&c)
                                && (0..C4_ROWS as isize).contains(&r);
                            inside.then_some((c as usize, r as usize))
                        })
                        .take_while(|(c, r)| self.board[*c][*r] == Some(seat))
                        .collect();
                    if run.len() == C4_RUN {
                        return Some((seat, run));
                    }
                }
            }
        }
        None
    }

    fn update_winner(&mut self) {
        if let Some((seat, run)) = self.find_run() {
            for (c, r) in run {
                self.winning_line[c][r] = true;
            }
            self.winner = Some(Winner::Seat(seat));
        } else if !(0..C4_COLUMNS).any(|c| self.has_room(c)) {
            self.winner = Some(Winner::Tie);
        }
    }

    fn drawing(&self) -> String {
        let mut out: String = NUMBERS[..C4_COLUMNS].concat();
        for row in (0..C4_ROWS).rev() {
            out.push('\n');
            for col in 0..C4_COLUMNS {
                out.push_str(match self.board[col][row] {
                    None => EMPTY,
                    Some(seat) if self.winning_line[col][row] => WINNING_DISCS[seat],
                    Some(seat) => DISCS[seat],
                });
            }
        }
        out
    }
}

impl GameVariant for ConnectFour {
    const KIND: GameKind = GameKind::ConnectFour;

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
        (0..C4_COLUMNS)
            .filter(|c| self.has_room(*c))
            .map(|c| c.to_string())
            .collect()
    }

    fn apply_move(&mut self, _seat: Seat, token: &str) -> MoveOutcome {
        if !self.legal_moves().iter().any(|m| m == token) {
            return MoveOutcome::Rejected;
        }
        let Ok(col) = token.parse::<usize>() else {
            return MoveOutcome::Rejected;
        };
        let Some(slot) = self.board[col].iter_mut().find(|cell| cell.is_none()) else {
            return MoveOutcome::Rejected;
        };
        *slot = Some(self.turn);
        self.update_winner();
        log::debug!("connect four: seat {} dropped into column {}", self.turn, col);
        if self.winner.is_some() {
            return MoveOutcome::Updated;
        }
        self.turn = other(self.turn);
        MoveOutcome::TurnPassed
    }

    fn render(&self) -> Render {
        let mut rows = Vec::new();
        if self.winner.is_none() {
            let buttons: Vec<Component> = (0..C4_COLUMNS)
                .map(|col| {
                    let open = self.has_room(col);
                    let style = if open { ButtonStyle::Primary } else { ButtonStyle::Secondary };
                    Component::button(col.to_string(), NUMBERS[col], style).disabled(!open)
                })
                .collect();
            rows = buttons
                .chunks(BUTTONS_PER_ROW)
                .map(<[Component]>::to_vec)
                .collect();
        }
        let status = match self.winner {
            None => format!("{}'s turn!", mention(self.players[self.turn])),
            Some(Winner::Seat(seat)) => format!("{} is the WINNER!", mention(self.players[seat])),
            Some(Winner::Tie) => "TIE!".to_string(),
        };
        Render {
            body: format!("{}\n{}", status, self.drawing()),
            rows,
            ..Render::default()
        }
    }

    fn serialize(&self) -> GameState {
        GameState::ConnectFour(ConnectFourState {
            players: self.players,
            guild_id: self.guild_id,
            turn: self.turn,
            board: self.board,
            winner: self.winner,
            winning_line: self.winning_line,
        })
    }

    fn deserialize(state: GameState) -> Result<Self, StateError> {
        let GameState::ConnectFour(s) = state else {
            return Err(StateError::WrongVariant);
        };
        check_seat(s.turn)?;
        check_cells(s.board.iter().flatten())?;
        check_winner(s.winner)?;
        Ok(ConnectFour {
            players: s.players,
            guild_id: s.guild_id,
            turn: s.turn,
            board: s.board,
            winner: s.winner,
            winning_line: s.winning_line,
        })
    }
}
