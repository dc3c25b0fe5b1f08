//! Attack detection.
//!
//! These functions answer "does `by` attack this square?" straight from
//! the board, without generating moves. Legality filtering and castling
//! safety are both built on top of them.

use crate::Board;
use chess_core::{Color, PieceKind, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns true if any piece of color `by` attacks `target`.
///
/// Whose turn it is plays no part. Pawns attack diagonally forward only,
/// and sliders are stopped by the first piece on each ray regardless of
/// its color.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    // A pawn of `by` attacks target from one row behind it, on either side.
    let behind = -by.pawn_direction();
    for dc in [-1, 1] {
        if let Some(p) = target.offset(behind, dc).and_then(|sq| board.get(sq)) {
            if p.is(PieceKind::Pawn, by) {
                return true;
            }
        }
    }

    if hits_by_step(board, target, by, &KNIGHT_OFFSETS, PieceKind::Knight) {
        return true;
    }

    if hits_by_step(board, target, by, &KING_OFFSETS, PieceKind::King) {
        return true;
    }

    if hits_by_ray(board, target, by, &ORTHOGONAL, PieceKind::Rook) {
        return true;
    }

    hits_by_ray(board, target, by, &DIAGONAL, PieceKind::Bishop)
}

/// Returns true if the king of `color` is attacked.
///
/// A board without that king is reported as not in check; such a
/// position cannot arise in play.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

fn hits_by_step(
    board: &Board,
    target: Square,
    by: Color,
    offsets: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    offsets.iter().any(|&(dr, dc)| {
        target
            .offset(dr, dc)
            .and_then(|sq| board.get(sq))
            .is_some_and(|p| p.is(kind, by))
    })
}

/// Walks each ray until the first piece; it attacks if it belongs to `by`
/// and is either `slider` or a queen.
fn hits_by_ray(
    board: &Board,
    target: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(dr, dc) in directions {
        let mut current = target;
        while let Some(next) = current.offset(dr, dc) {
            if let Some(p) = board.get(next) {
                if p.color == by && (p.kind == slider || p.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}
