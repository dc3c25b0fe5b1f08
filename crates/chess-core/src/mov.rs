//! Move representation.

use crate::Square;
use std::fmt;

/// The special action a move carries, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain move or capture.
    Normal,
    /// Pawn double step from its starting row.
    DoubleStep,
    /// En passant capture.
    EnPassant,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// Pawn reaching the far row; always becomes a queen.
    Promotion,
}

impl MoveKind {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// A chess move as exposed to callers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a normal move (no special action).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Parses the squares of a coordinate move such as `"e2e4"` or `"e7e8q"`.
    ///
    /// Only the squares are returned: the kind depends on the position and
    /// must be resolved against generated legal moves.
    pub fn parse_squares(s: &str) -> Option<(Square, Square)> {
        let s = s.trim();
        match s.len() {
            4 => {}
            5 if s.ends_with(['q', 'Q']) => {}
            _ => return None,
        }
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        Some((from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self, self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.kind == MoveKind::Promotion {
            write!(f, "q")?;
        }
        Ok(())
    }
}
