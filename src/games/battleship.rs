//! Two-phase fleet game. Both players place their ships at the same time,
//! then take turns firing at the opponent's grid.
//!
//! Tokens: `x|n` picks row `n` (A to J), `y|n` picks column `n` (1 to 10),
//! `d|0..3` places the next ship up/down/left/right from the picked cell,
//! `MAP` privately shows the actor their own grid.

use rand::Rng;

use crate::common::{check_seat, check_winner, other, GuildId, PlacementError, Seat, StateError, Winner};
use crate::config::{FLEET_BOARD_SIZE, TOTAL_SHIP_CELLS};
use crate::domain::{BattleshipState, GameKind, GameState, Players, Selection, Shot, ShotGrid, ShipSlot};
use crate::fleet::Fleet;
use crate::games::{mention, GameVariant, MoveOutcome, Notice};
use crate::render::{ButtonStyle, Component, Embed, Render};
use crate::ship::Direction;

const SIZE: usize = FLEET_BOARD_SIZE as usize;
const COLUMN_LABELS: [&str; SIZE] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"];
const ROW_LABELS: [&str; SIZE] = ["🇦", "🇧", "🇨", "🇩", "🇪", "🇫", "🇬", "🇭", "🇮", "🇯"];
const CORNER: &str = "⬛";
const OCEAN: &str = "🌊";
const SHIP: &str = "🚢";
const HIT: &str = "💥";
const MISS: &str = "💨";
const ROW_PICK: &str = "🚥";
const COLUMN_PICK: &str = "🚦";
const CELL_PICK: &str = "❎";
const BUTTONS_PER_ROW: usize = 5;

/// One parsed move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Row(usize),
    Column(usize),
    Place(Direction),
    Map,
}

impl Action {
    fn parse(token: &str) -> Option<Self> {
        if token == "MAP" {
            return Some(Action::Map);
        }
        let (axis, value) = token.split_once('|')?;
        let n: usize = value.parse().ok()?;
        match axis {
            "x" if n < SIZE => Some(Action::Row(n)),
            "y" if n < SIZE => Some(Action::Column(n)),
            "d" => Direction::from_index(n).map(Action::Place),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battleship {
    players: Players,
    guild_id: Option<GuildId>,
    turn: Seat,
    setup: bool,
    shots: [ShotGrid; 2],
    fleets: [Fleet; 2],
    selections: [Selection; 2],
    winner: Option<Winner>,
    /// Outcome of the shot fired during this interaction; never stored.
    last_shot: Option<Shot>,
}

impl Battleship {
    /// New game in the setup phase. The first shooter is rolled now and kept
    /// hidden until setup ends.
    pub fn new<R: Rng>(players: Players, guild_id: Option<GuildId>, rng: &mut R) -> Self {
        Battleship {
            players,
            guild_id,
            turn: rng.random_range(0..2),
            setup: true,
            shots: [ShotGrid::default(); 2],
            fleets: [Fleet::new(), Fleet::new()],
            selections: [Selection::default(); 2],
            winner: None,
            last_shot: None,
        }
    }

    pub fn in_setup(&self) -> bool {
        self.setup
    }

    pub fn fleet(&self, seat: Seat) -> &Fleet {
        &self.fleets[seat]
    }

    /// What `seat` knows about the opponent's grid.
    pub fn shots(&self, seat: Seat) -> &ShotGrid {
        &self.shots[seat]
    }

    pub fn selection(&self, seat: Seat) -> Selection {
        self.selections[seat]
    }

    /// Number of opponent cells `seat` has hit.
    pub fn hits(&self, seat: Seat) -> usize {
        self.shots[seat]
            .iter()
            .flatten()
            .filter(|shot| **shot == Shot::Hit)
            .count()
    }

    /// Tokens that place `seat`'s next ship somewhere valid.
    pub fn placement_tokens<R: Rng>(&self, seat: Seat, rng: &mut R) -> Result<Vec<String>, PlacementError> {
        let ((row, col), direction) = self.fleets[seat].random_placement(rng)?;
        let index = Direction::ALL
            .iter()
            .position(|d| *d == direction)
            .unwrap_or_default();
        Ok(vec![
            format!("x|{}", row),
            format!("y|{}", col),
            format!("d|{}", index),
        ])
    }

    fn place(&mut self, seat: Seat, direction: Direction) -> MoveOutcome {
        let Some(anchor) = self.selections[seat].cell() else {
            return MoveOutcome::Private(Notice::PickDirectionLast(self.setup_map(seat)));
        };
        match self.fleets[seat].place_next(anchor, direction) {
            Ok(ship) => {
                log::debug!("battleship: seat {} placed {} at {:?} {}", seat, ship.name(), anchor, direction);
                self.selections[seat] = Selection::default();
                if self.fleets.iter().all(Fleet::is_deployed) {
                    self.setup = false;
                    log::info!("battleship: setup finished, seat {} fires first", self.turn);
                    MoveOutcome::TurnPassed
                } else {
                    MoveOutcome::Updated
                }
            }
            Err(PlacementError::NoShipsLeft) => MoveOutcome::Private(Notice::NoShipsLeft),
            Err(_) => MoveOutcome::Private(Notice::InvalidPlacement),
        }
    }

    fn target(&mut self, seat: Seat, action: Action) -> MoveOutcome {
        if seat != self.turn {
            return MoveOutcome::Private(Notice::MapOnlyOffTurn);
        }
        let mut picked = self.selections[seat];
        match action {
            Action::Row(n) => picked.row = Some(n),
            Action::Column(n) => picked.col = Some(n),
            Action::Place(_) | Action::Map => return MoveOutcome::Rejected,
        }
        let Some((row, col)) = picked.cell() else {
            self.selections[seat] = picked;
            return MoveOutcome::Updated;
        };
        if self.shots[seat][row][col] != Shot::Unknown {
            return MoveOutcome::Private(Notice::AlreadyTargeted);
        }
        let shot = if self.fleets[other(seat)].occupies(row, col) {
            Shot::Hit
        } else {
            Shot::Miss
        };
        self.shots[seat][row][col] = shot;
        self.selections[seat] = Selection::default();
        self.last_shot = Some(shot);
        log::debug!("battleship: seat {} fired at ({}, {}): {:?}", seat, row, col, shot);
        if self.hits(seat) == TOTAL_SHIP_CELLS {
            self.winner = Some(Winner::Seat(seat));
            return MoveOutcome::Updated;
        }
        self.turn = other(self.turn);
        MoveOutcome::TurnPassed
    }

    fn top_bar(corner: &str) -> String {
        let mut bar = corner.to_string();
        bar.push_str(&COLUMN_LABELS.concat());
        bar
    }

    /// Marker for an open cell given a pending selection.
    fn pick_marker(selection: Selection, row: usize, col: usize) -> &'static str {
        match (selection.row, selection.col) {
            (Some(r), None) if r == row => ROW_PICK,
            (None, Some(c)) if c == col => COLUMN_PICK,
            (Some(r), Some(c)) if (r, c) == (row, col) => CELL_PICK,
            _ => OCEAN,
        }
    }

    fn grid<F>(corner: &str, mut cell: F) -> String
    where
        F: FnMut(usize, usize) -> &'static str,
    {
        let mut out = Self::top_bar(corner);
        for (row, label) in ROW_LABELS.iter().enumerate() {
            out.push('\n');
            out.push_str(label);
            for col in 0..SIZE {
                out.push_str(cell(row, col));
            }
        }
        out
    }

    /// Placement progress and grid for `seat` during setup.
    fn setup_map(&self, seat: Seat) -> String {
        let fleet = &self.fleets[seat];
        let selection = self.selections[seat];
        let status = match fleet.next_unplaced() {
            None => "All pieces selected, waiting on other player!".to_string(),
            Some((_, ship)) => {
                let left: Vec<String> = fleet
                    .slots()
                    .iter()
                    .filter_map(|slot| match slot {
                        ShipSlot::Unplaced(len) => Some(len.to_string()),
                        ShipSlot::Placed(_) => None,
                    })
                    .collect();
                format!(
                    "selecting space for a {} tile long {}\nShips left:\n{}",
                    ship.length(),
                    ship.name(),
                    left.join(", ")
                )
            }
        };
        let grid = Self::grid(CORNER, |row, col| {
            if fleet.occupies(row, col) {
                SHIP
            } else {
                Self::pick_marker(selection, row, col)
            }
        });
        format!("```\n{}```{}", status, grid)
    }

    /// `seat`'s own ships.
    fn fleet_map(&self, seat: Seat) -> String {
        let fleet = &self.fleets[seat];
        Self::grid(CORNER, |row, col| if fleet.occupies(row, col) { SHIP } else { OCEAN })
    }

    /// The shooter's view of the opponent's grid.
    fn shot_map(&self, seat: Seat) -> String {
        let shots = &self.shots[seat];
        let selection = self.selections[seat];
        Self::grid(CORNER, |row, col| match shots[row][col] {
            Shot::Unknown => Self::pick_marker(selection, row, col),
            Shot::Hit => HIT,
            Shot::Miss => MISS,
        })
    }

    /// `seat`'s fleet together with every shot it took.
    fn final_map(&self, seat: Seat) -> String {
        let fleet = &self.fleets[seat];
        let incoming = &self.shots[other(seat)];
        Self::grid(CORNER, |row, col| match (incoming[row][col], fleet.occupies(row, col)) {
            (Shot::Unknown, true) => SHIP,
            (Shot::Unknown, false) => OCEAN,
            (_, true) => HIT,
            (_, false) => MISS,
        })
    }

    fn private_map(&self, seat: Seat) -> String {
        if self.setup {
            self.setup_map(seat)
        } else {
            self.fleet_map(seat)
        }
    }

    fn axis_rows(prefix: &str, labels: &[&'static str; SIZE]) -> Vec<Vec<Component>> {
        let buttons: Vec<Component> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Component::button(format!("{}|{}", prefix, i), *label, ButtonStyle::Primary))
            .collect();
        buttons.chunks(BUTTONS_PER_ROW).map(<[Component]>::to_vec).collect()
    }

    fn controls(&self) -> Vec<Vec<Component>> {
        let mut rows = Self::axis_rows("y", &COLUMN_LABELS);
        let direction = |i: usize| {
            Component::button(format!("d|{}", i), Direction::ALL[i].arrow(), ButtonStyle::Success)
                .disabled(!self.setup)
        };
        rows.push(vec![
            direction(0),
            direction(1),
            Component::button("MAP", "🗺️", ButtonStyle::Secondary),
            direction(2),
            direction(3),
        ]);
        rows.extend(Self::axis_rows("x", &ROW_LABELS));
        rows
    }
}

impl GameVariant for Battleship {
    const KIND: GameKind = GameKind::Battleship;

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
        let mut moves: Vec<String> = (0..SIZE).map(|i| format!("y|{}", i)).collect();
        moves.extend((0..SIZE).map(|i| format!("x|{}", i)));
        if self.setup {
            moves.extend((0..Direction::ALL.len()).map(|i| format!("d|{}", i)));
        }
        moves.push("MAP".to_string());
        moves
    }

    fn apply_move(&mut self, seat: Seat, token: &str) -> MoveOutcome {
        self.last_shot = None;
        if seat > 1 || !self.legal_moves().iter().any(|m| m == token) {
            return MoveOutcome::Rejected;
        }
        let Some(action) = Action::parse(token) else {
            return MoveOutcome::Rejected;
        };
        if action == Action::Map {
            return MoveOutcome::Private(Notice::Map(self.private_map(seat)));
        }
        if !self.setup {
            return self.target(seat, action);
        }
        if self.fleets[seat].is_deployed() {
            return MoveOutcome::Private(Notice::NoShipsLeft);
        }
        match action {
            Action::Row(n) => self.selections[seat].row = Some(n),
            Action::Column(n) => self.selections[seat].col = Some(n),
            Action::Place(direction) => return self.place(seat, direction),
            Action::Map => {}
        }
        MoveOutcome::Updated
    }

    fn render(&self) -> Render {
        if let Some(Winner::Seat(seat)) = self.winner {
            let embeds = (0..2)
                .map(|i| Embed {
                    title: format!("Player {}", i + 1),
                    description: self.final_map(i),
                })
                .collect();
            return Render {
                body: format!(
                    "{} (player {}) is the WINNER!",
                    mention(self.players[seat]),
                    seat + 1
                ),
                embeds,
                ..Render::default()
            };
        }
        if self.setup {
            return Render {
                body: "SETUP!".to_string(),
                rows: self.controls(),
                ..Render::default()
            };
        }
        let feedback = match self.last_shot {
            Some(Shot::Hit) => "💥 HIT! ",
            Some(Shot::Miss) => "💨 MISS! ",
            _ => "",
        };
        Render {
            body: format!(
                "{}{}'s turn!\n{}",
                feedback,
                mention(self.players[self.turn]),
                self.shot_map(self.turn)
            ),
            rows: self.controls(),
            ..Render::default()
        }
    }

    fn serialize(&self) -> GameState {
        GameState::Battleship(BattleshipState {
            players: self.players,
            guild_id: self.guild_id,
            turn: self.turn,
            setup: self.setup,
            shots: self.shots,
            fleets: [
                self.fleets[0].slots().to_vec(),
                self.fleets[1].slots().to_vec(),
            ],
            selections: self.selections,
            winner: self.winner,
        })
    }

    fn deserialize(state: GameState) -> Result<Self, StateError> {
        let GameState::Battleship(s) = state else {
            return Err(StateError::WrongVariant);
        };
        check_seat(s.turn)?;
        check_winner(s.winner)?;
        for selection in &s.selections {
            let row = selection.row.unwrap_or(0);
            let col = selection.col.unwrap_or(0);
            if row >= SIZE || col >= SIZE {
                return Err(StateError::OutOfRange(row, col));
            }
        }
        let [first, second] = s.fleets;
        Ok(Battleship {
            players: s.players,
            guild_id: s.guild_id,
            turn: s.turn,
            setup: s.setup,
            shots: s.shots,
            fleets: [Fleet::from_slots(first)?, Fleet::from_slots(second)?],
            selections: s.selections,
            winner: s.winner,
            last_shot: None,
        })
    }

    /// Setup is simultaneous, and off-turn players may still look at their
    /// map; turn order is enforced in [`Battleship::apply_move`].
    fn acts_off_turn(&self) -> bool {
        true
    }

    fn awaiting(&self) -> Option<Seat> {
        if self.setup || self.winner.is_some() {
            None
        } else {
            Some(self.turn)
        }
    }
}
