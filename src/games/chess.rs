use rand::Rng;

use crate::common::{other, GuildId, Seat, StateError, Winner};
use crate::config::SELECT_CHUNK;
use crate::domain::{ChessState, GameKind, GameState, Players};
use crate::games::{mention, GameVariant, MoveOutcome, Notice};
use crate::render::{Component, Embed, Render, SelectOption};
use crate::rules::{ChessRules, LegalMove, Side, StandardRules};

const SOURCE_MENU: &str = "select|-2";
const FIRST_DESTINATION_MENU: &str = "select|-1";
const PLACEHOLDER: &str = "ignore";
const FILES: &str = "abcdefgh";

/// Chess with a two-step move: pick a source square, then a destination.
///
/// Source tokens are square ids (`"e2"`); destination tokens are full move
/// ids (`"e2e4"`). `players[0]` plays white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame<R: ChessRules = StandardRules> {
    players: Players,
    guild_id: Option<GuildId>,
    rules: R,
    pending: Option<String>,
    winner: Option<Winner>,
}

pub type Chess = ChessGame<StandardRules>;

fn seat_of(side: Side) -> Seat {
    match side {
        Side::White => 0,
        Side::Black => 1,
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::White => "⚪ White",
        Side::Black => "⚫ Black",
    }
}

impl<R: ChessRules> ChessGame<R> {
    /// Starting position; colours are assigned at random.
    pub fn new<G: Rng>(players: Players, guild_id: Option<GuildId>, rng: &mut G) -> Self {
        let players = if rng.random::<bool>() {
            [players[1], players[0]]
        } else {
            players
        };
        ChessGame {
            players,
            guild_id,
            rules: R::initial(),
            pending: None,
            winner: None,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Mate is a win for the side that delivered it; no moves without check
    /// is a stalemate.
    fn outcome(rules: &R) -> Option<Winner> {
        if rules.is_checkmate() {
            return Some(Winner::Seat(other(seat_of(rules.side_to_move()))));
        }
        if rules.legal_moves().is_empty() && !rules.is_check() {
            return Some(Winner::Tie);
        }
        None
    }

    /// Distinct source squares with the moving piece, in generation order.
    fn sources(moves: &[LegalMove]) -> Vec<&LegalMove> {
        let mut seen: Vec<&LegalMove> = Vec::new();
        for m in moves {
            if !seen.iter().any(|s| s.from == m.from) {
                seen.push(m);
            }
        }
        seen
    }

    fn destinations<'a>(&self, moves: &'a [LegalMove]) -> Vec<&'a LegalMove> {
        match &self.pending {
            Some(from) => moves.iter().filter(|m| &m.from == from).collect(),
            None => Vec::new(),
        }
    }

    fn drawing(&self) -> String {
        let mut out = String::from("🔲");
        for file in FILES.chars() {
            out.push(' ');
            out.push(file);
        }
        for rank in (0..8).rev() {
            out.push('\n');
            out.push_str(&(rank + 1).to_string());
            out.push(' ');
            for file in 0..8 {
                let cell = match self.rules.piece_at(file, rank) {
                    Some((side, kind)) => kind.glyph(side),
                    None if (file + rank) % 2 == 0 => '▪',
                    None => '▫',
                };
                out.push(cell);
                out.push(' ');
            }
        }
        out
    }

    fn menus(&self) -> Vec<Vec<Component>> {
        let moves = self.rules.legal_moves();
        let sources = Self::sources(&moves)
            .into_iter()
            .map(|m| {
                SelectOption::new(m.from.to_uppercase(), m.from.clone())
                    .describe(m.piece.name())
                    .default_if(self.pending.as_deref() == Some(m.from.as_str()))
            })
            .collect();
        let mut rows = vec![vec![Component::Select {
            id: SOURCE_MENU.to_string(),
            options: sources,
            disabled: false,
        }]];

        let placeholder = || SelectOption::new("select move to make", PLACEHOLDER).default_if(true);
        let destinations = self.destinations(&moves);
        if destinations.is_empty() {
            rows.push(vec![Component::Select {
                id: FIRST_DESTINATION_MENU.to_string(),
                options: vec![placeholder()],
                disabled: true,
            }]);
            return rows;
        }
        for (chunk_index, chunk) in destinations.chunks(SELECT_CHUNK).enumerate() {
            let id = if chunk_index == 0 {
                FIRST_DESTINATION_MENU.to_string()
            } else {
                format!("select|{}", chunk_index * SELECT_CHUNK)
            };
            let mut options = vec![placeholder()];
            options.extend(chunk.iter().map(|m| {
                let description = match m.capture {
                    Some(piece) => format!("capture {}", piece.name()),
                    None => "move".to_string(),
                };
                SelectOption::new(m.uci.to_uppercase(), m.uci.clone()).describe(description)
            }));
            rows.push(vec![Component::Select {
                id,
                options,
                disabled: false,
            }]);
        }
        rows
    }
}

impl<R: ChessRules> GameVariant for ChessGame<R> {
    const KIND: GameKind = GameKind::Chess;

    fn players(&self) -> &Players {
        &self.players
    }

    fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    fn turn(&self) -> Seat {
        seat_of(self.rules.side_to_move())
    }

    fn winner(&self) -> Option<Winner> {
        self.winner
    }

    fn legal_moves(&self) -> Vec<String> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let moves = self.rules.legal_moves();
        let mut tokens: Vec<String> = Self::sources(&moves)
            .into_iter()
            .map(|m| m.from.clone())
            .collect();
        tokens.extend(self.destinations(&moves).into_iter().map(|m| m.uci.clone()));
        tokens
    }

    fn apply_move(&mut self, _seat: Seat, token: &str) -> MoveOutcome {
        if self.winner.is_some() {
            return MoveOutcome::Rejected;
        }
        let moves = self.rules.legal_moves();
        if Self::sources(&moves).iter().any(|m| m.from == token) {
            self.pending = Some(token.to_string());
            return MoveOutcome::Updated;
        }
        if !self.destinations(&moves).iter().any(|m| m.uci == token) {
            return MoveOutcome::Rejected;
        }
        if let Err(e) = self.rules.push(token) {
            log::warn!("chess: rules engine refused {}: {}", token, e);
            return MoveOutcome::Private(Notice::RulesFailed);
        }
        log::debug!("chess: played {}", token);
        self.pending = None;
        self.winner = Self::outcome(&self.rules);
        if self.winner.is_some() {
            MoveOutcome::Updated
        } else {
            MoveOutcome::TurnPassed
        }
    }

    fn render(&self) -> Render {
        let side = self.rules.side_to_move();
        let title = match self.winner {
            Some(Winner::Seat(seat)) => {
                let winner = if seat == 0 { Side::White } else { Side::Black };
                format!("{} is the WINNER!", side_name(winner))
            }
            Some(Winner::Tie) => "🤝 Stalemate, TIE!".to_string(),
            None if self.rules.is_check() => format!("{} Check!", side_name(side)),
            None => side_name(side).to_string(),
        };
        let body = match self.winner {
            Some(Winner::Seat(seat)) => mention(self.players[seat]),
            _ => mention(self.players[seat_of(side)]),
        };
        Render {
            body,
            embeds: vec![Embed {
                title,
                description: self.drawing(),
            }],
            rows: if self.winner.is_none() { self.menus() } else { Vec::new() },
            ..Render::default()
        }
    }

    fn serialize(&self) -> GameState {
        GameState::Chess(ChessState {
            players: self.players,
            guild_id: self.guild_id,
            board: self.rules.to_text(),
            pending: self.pending.clone(),
        })
    }

    fn deserialize(state: GameState) -> Result<Self, StateError> {
        let GameState::Chess(s) = state else {
            return Err(StateError::WrongVariant);
        };
        let rules = R::from_text(&s.board).map_err(|e| StateError::Position(e.to_string()))?;
        let winner = Self::outcome(&rules);
        Ok(ChessGame {
            players: s.players,
            guild_id: s.guild_id,
            rules,
            pending: s.pending,
            winner,
        })
    }
}
