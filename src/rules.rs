//! Chess move legality, behind a small capability trait so another engine
//! can be dropped in. [`StandardRules`] wraps the `chess` crate.

use core::fmt;
use core::str::FromStr;

use chess::{
    Board, BoardBuilder, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square,
    ALL_SQUARES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Figurine for `side`.
    pub fn glyph(self, side: Side) -> char {
        match (side, self) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A legal move with what the board shows about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMove {
    /// Source square, e.g. `"e2"`.
    pub from: String,
    pub to: String,
    /// Full move id, e.g. `"e2e4"` or `"e7e8q"`.
    pub uci: String,
    pub piece: PieceKind,
    /// Piece standing on the destination square, if any.
    pub capture: Option<PieceKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    InvalidPosition(String),
    IllegalMove(String),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidPosition(text) => write!(f, "invalid position: {}", text),
            RulesError::IllegalMove(uci) => write!(f, "illegal move: {}", uci),
        }
    }
}

impl std::error::Error for RulesError {}

/// What a chess variant needs from a rules engine.
pub trait ChessRules: Clone + fmt::Debug + PartialEq + Eq + Sized {
    /// Standard starting position.
    fn initial() -> Self;

    fn from_text(text: &str) -> Result<Self, RulesError>;

    /// Compact text form accepted by [`ChessRules::from_text`].
    fn to_text(&self) -> String;

    fn legal_moves(&self) -> Vec<LegalMove>;

    /// Apply the move with id `uci`.
    fn push(&mut self, uci: &str) -> Result<(), RulesError>;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn side_to_move(&self) -> Side;

    /// Piece on `file`/`rank`, both 0-based from a1.
    fn piece_at(&self, file: usize, rank: usize) -> Option<(Side, PieceKind)>;
}

/// [`ChessRules`] backed by the `chess` crate; text form is FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardRules {
    board: Board,
}

fn kind_of(piece: Piece) -> PieceKind {
    match piece {
        Piece::Pawn => PieceKind::Pawn,
        Piece::Knight => PieceKind::Knight,
        Piece::Bishop => PieceKind::Bishop,
        Piece::Rook => PieceKind::Rook,
        Piece::Queen => PieceKind::Queen,
        Piece::King => PieceKind::King,
    }
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

impl StandardRules {
    fn moves(&self) -> impl Iterator<Item = ChessMove> {
        MoveGen::new_legal(&self.board)
    }
}

impl ChessRules for StandardRules {
    fn initial() -> Self {
        StandardRules {
            board: Board::default(),
        }
    }

    fn from_text(text: &str) -> Result<Self, RulesError> {
        let invalid = |why: String| RulesError::InvalidPosition(format!("{}: {}", text, why));
        let builder = BoardBuilder::from_str(text).map_err(|e| invalid(e.to_string()))?;
        // The board conversion assumes one king per side and misbehaves otherwise.
        for color in [Color::White, Color::Black] {
            let kings = ALL_SQUARES
                .iter()
                .filter(|sq| builder[**sq] == Some((Piece::King, color)))
                .count();
            if kings != 1 {
                return Err(invalid(format!("{:?} has {} kings", color, kings)));
            }
        }
        Board::try_from(&builder)
            .map(|board| StandardRules { board })
            .map_err(|e| invalid(e.to_string()))
    }

    fn to_text(&self) -> String {
        self.board.to_string()
    }

    fn legal_moves(&self) -> Vec<LegalMove> {
        self.moves()
            .filter_map(|m| {
                let piece = self.board.piece_on(m.get_source())?;
                Some(LegalMove {
                    from: m.get_source().to_string(),
                    to: m.get_dest().to_string(),
                    uci: m.to_string(),
                    piece: kind_of(piece),
                    capture: self.board.piece_on(m.get_dest()).map(kind_of),
                })
            })
            .collect()
    }

    fn push(&mut self, uci: &str) -> Result<(), RulesError> {
        let chosen = self
            .moves()
            .find(|m| m.to_string() == uci)
            .ok_or_else(|| RulesError::IllegalMove(uci.to_string()))?;
        self.board = self.board.make_move_new(chosen);
        Ok(())
    }

    fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn side_to_move(&self) -> Side {
        side_of(self.board.side_to_move())
    }

    fn piece_at(&self, file: usize, rank: usize) -> Option<(Side, PieceKind)> {
        if file > 7 || rank > 7 {
            return None;
        }
        let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((side_of(color), kind_of(piece)))
    }
}
