//! Chess position: board plus the state legality depends on.

use chess_core::{Color, Fen, FenError, Move, MoveKind, Piece, PieceKind, Square};

use crate::Board;

/// One side of the board for castling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    pub const BOTH: [Wing; 2] = [Wing::Kingside, Wing::Queenside];

    /// The castling move kind for this wing.
    #[inline]
    pub const fn move_kind(self) -> MoveKind {
        match self {
            Wing::Kingside => MoveKind::CastleKingside,
            Wing::Queenside => MoveKind::CastleQueenside,
        }
    }

    /// The wing a castling move kind belongs to.
    #[inline]
    pub const fn of_move(kind: MoveKind) -> Option<Wing> {
        match kind {
            MoveKind::CastleKingside => Some(Wing::Kingside),
            MoveKind::CastleQueenside => Some(Wing::Queenside),
            _ => None,
        }
    }

    const fn rook_col(self) -> u8 {
        match self {
            Wing::Kingside => 7,
            Wing::Queenside => 0,
        }
    }

    const fn king_target_col(self) -> u8 {
        match self {
            Wing::Kingside => 6,
            Wing::Queenside => 2,
        }
    }

    const fn rook_target_col(self) -> u8 {
        match self {
            Wing::Kingside => 5,
            Wing::Queenside => 3,
        }
    }

    /// Columns that must be empty between king and rook.
    pub(crate) const fn between_cols(self) -> &'static [u8] {
        match self {
            Wing::Kingside => &[5, 6],
            Wing::Queenside => &[1, 2, 3],
        }
    }

    /// Columns the king stands on or crosses, destination included.
    pub(crate) const fn king_path_cols(self) -> &'static [u8] {
        match self {
            Wing::Kingside => &[4, 5, 6],
            Wing::Queenside => &[4, 3, 2],
        }
    }

    /// Home square of this wing's rook.
    pub fn rook_home(self, color: Color) -> Square {
        back_rank_square(color, self.rook_col())
    }

    /// Where the king lands after castling on this wing.
    pub fn king_target(self, color: Color) -> Square {
        back_rank_square(color, self.king_target_col())
    }

    /// Where the rook lands after castling on this wing.
    pub fn rook_target(self, color: Color) -> Square {
        back_rank_square(color, self.rook_target_col())
    }
}

/// Home square of the king.
pub fn king_home(color: Color) -> Square {
    back_rank_square(color, 4)
}

pub(crate) fn back_rank_square(color: Color, col: u8) -> Square {
    // Both coordinates are always in 0..8 here.
    match Square::from_index(color.back_rank() * 8 + col) {
        Some(sq) => sq,
        None => unreachable!("back rank column {} out of range", col),
    }
}

/// Castling availability for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl WingRights {
    pub const BOTH: WingRights = WingRights {
        kingside: true,
        queenside: true,
    };

    #[inline]
    pub const fn get(self, wing: Wing) -> bool {
        match wing {
            Wing::Kingside => self.kingside,
            Wing::Queenside => self.queenside,
        }
    }
}

/// Castling rights for both colors.
///
/// Rights only ever go from `true` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white: WingRights,
    pub black: WingRights,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white: WingRights {
            kingside: false,
            queenside: false,
        },
        black: WingRights {
            kingside: false,
            queenside: false,
        },
    };

    pub const ALL: CastlingRights = CastlingRights {
        white: WingRights::BOTH,
        black: WingRights::BOTH,
    };

    /// Returns the rights of one color.
    #[inline]
    pub const fn of(self, color: Color) -> WingRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Returns true if `color` may still castle on `wing`.
    #[inline]
    pub const fn can_castle(self, color: Color, wing: Wing) -> bool {
        self.of(color).get(wing)
    }

    fn of_mut(&mut self, color: Color) -> &mut WingRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Removes both rights of a color.
    pub fn remove_color(&mut self, color: Color) {
        *self.of_mut(color) = WingRights::default();
    }

    /// Removes the right of a color on one wing.
    pub fn remove(&mut self, color: Color, wing: Wing) {
        let rights = self.of_mut(color);
        match wing {
            Wing::Kingside => rights.kingside = false,
            Wing::Queenside => rights.queenside = false,
        }
    }

    /// Removes the right tied to a rook home square, if `sq` is one.
    fn remove_for_rook_square(&mut self, sq: Square) {
        for color in Color::BOTH {
            for wing in Wing::BOTH {
                if wing.rook_home(color) == sq {
                    self.remove(color, wing);
                }
            }
        }
    }
}

/// The square a pawn skipped over with a double step.
///
/// Valid for exactly one reply by the other color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassantTarget {
    pub square: Square,
    /// Color of the pawn that double-stepped.
    pub pawn_color: Color,
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target left by the previous move (if any).
    pub en_passant: Option<EnPassantTarget>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// Kings and rooks are marked unmoved only when a castling right still
    /// depends on them; every other king or rook counts as moved.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let [wk, wq, bk, bq] = parsed.castling;
        let castling = CastlingRights {
            white: WingRights {
                kingside: wk,
                queenside: wq,
            },
            black: WingRights {
                kingside: bk,
                queenside: bq,
            },
        };

        let mut board = Board::empty();
        for (sq, kind, color) in parsed.pieces {
            let rights = castling.of(color);
            let unmoved = match kind {
                PieceKind::King => {
                    sq == king_home(color) && (rights.kingside || rights.queenside)
                }
                PieceKind::Rook => Wing::BOTH
                    .iter()
                    .any(|&wing| rights.get(wing) && sq == wing.rook_home(color)),
                _ => true,
            };
            let piece = Piece::new(kind, color);
            board.set(sq, Some(if unmoved { piece } else { piece.moved() }));
        }

        let en_passant = parsed.en_passant.map(|square| EnPassantTarget {
            square,
            pawn_color: parsed.side_to_move.opposite(),
        });

        Ok(Position {
            board,
            side_to_move: parsed.side_to_move,
            castling,
            en_passant,
        })
    }

    /// Applies a move and returns the resulting position together with the
    /// captured piece, if any.
    ///
    /// The move must come from legal move generation for this position.
    /// Performs, in order: clearing the en passant target, removing an en
    /// passant victim, relocating the castling rook, moving (and promoting)
    /// the piece, recording a new en passant target, updating castling
    /// rights, and flipping the side to move.
    ///
    /// A move from an empty square changes nothing but the side to move
    /// and clears the en passant target.
    pub fn make_move(&self, m: Move) -> (Position, Option<Piece>) {
        let mut next = self.clone();
        next.en_passant = None;

        let Some(piece) = next.board.take(m.from) else {
            next.side_to_move = self.side_to_move.opposite();
            return (next, None);
        };
        let us = piece.color;

        let mut captured = next.board.take(m.to);

        if m.kind == MoveKind::EnPassant {
            // The victim sits beside the mover, on the destination column.
            if let Ok(victim) = Square::new(m.from.row() as i32, m.to.col() as i32) {
                captured = next.board.take(victim);
            }
        }

        if let Some(wing) = Wing::of_move(m.kind) {
            let rook = next.board.take(wing.rook_home(us));
            next.board
                .set(wing.rook_target(us), rook.map(Piece::moved));
        }

        let landed = if piece.kind == PieceKind::Pawn && m.to.row() == us.promotion_row() {
            piece.promoted(PieceKind::Queen)
        } else {
            piece
        };
        next.board.set(m.to, Some(landed.moved()));

        if m.kind == MoveKind::DoubleStep {
            let mid_row = (m.from.row() + m.to.row()) / 2;
            if let Ok(square) = Square::new(mid_row as i32, m.from.col() as i32) {
                next.en_passant = Some(EnPassantTarget {
                    square,
                    pawn_color: us,
                });
            }
        }

        match piece.kind {
            PieceKind::King => next.castling.remove_color(us),
            PieceKind::Rook => next.castling.remove_for_rook_square(m.from),
            _ => {}
        }
        if captured.is_some_and(|p| p.kind == PieceKind::Rook) {
            next.castling.remove_for_rook_square(m.to);
        }

        next.side_to_move = self.side_to_move.opposite();
        (next, captured)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
