//! Board model: 64 squares holding optional pieces.

use chess_core::{Color, Piece, PieceKind, Square};
use std::fmt;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// The board is a plain value: cloning it copies every piece, so a clone
/// can be mutated speculatively without touching the original. No
/// legality checks happen here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            let back = color.back_rank() as usize * 8;
            let pawns = color.pawn_start_row() as usize * 8;
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[back + col] = Some(Piece::new(*kind, color));
                board.squares[pawns + col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Puts a piece on a square, or clears it with `None`.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over every occupied square in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the pieces of one color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Material balance in centipawns, positive when White is ahead.
    pub fn material(&self) -> i32 {
        self.occupied().map(|(_, p)| p.signed_value()).sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8u8 {
                let c = Square::from_index(row * 8 + col)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(
            board.get(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(Square::D8),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq("c7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(board.is_empty_at(sq("e4")));
        assert_eq!(board.material(), 0);
    }

    #[test]
    fn king_square() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        let pawn = copy.take(sq("e2"));
        copy.set(sq("e4"), pawn.map(Piece::moved));

        assert_ne!(copy, original);
        assert!(original.get(sq("e2")).is_some());
        assert!(original.is_empty_at(sq("e4")));
        assert!(copy.get(sq("e4")).unwrap().has_moved);
    }

    #[test]
    fn material_counts_signs() {
        let mut board = Board::empty();
        board.set(sq("a1"), Some(Piece::new(PieceKind::Queen, Color::White)));
        board.set(sq("h8"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(board.material(), 400);
    }

    #[test]
    fn display_diagram() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
