//! Move generation.
//!
//! Pseudo-legal moves follow the movement rules of each piece kind;
//! legal moves are the pseudo-legal ones that do not leave the mover's own
//! king attacked. Generation order is deterministic: squares in row-major
//! order, then each piece's directions in a fixed order.

pub mod perft;

use crate::attacks::{
    is_in_check, is_square_attacked, DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL,
};
use crate::position::{back_rank_square, king_home, Wing};
use crate::{Board, Position};
use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Square};

/// Generates pseudo-legal moves for the piece on `from`.
///
/// Moves are generated for the piece's own color, whoever is to move.
/// An empty square yields no moves.
pub fn pseudo_moves(position: &Position, from: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    let Some(piece) = position.board.get(from) else {
        return moves;
    };

    let board = &position.board;
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, color, &mut moves),
        PieceKind::Knight => step_moves(board, from, color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slide_moves(board, from, color, &DIAGONAL, &mut moves),
        PieceKind::Rook => slide_moves(board, from, color, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => {
            slide_moves(board, from, color, &ORTHOGONAL, &mut moves);
            slide_moves(board, from, color, &DIAGONAL, &mut moves);
        }
        PieceKind::King => {
            step_moves(board, from, color, &KING_OFFSETS, &mut moves);
            castling_moves(position, from, piece, &mut moves);
        }
    }

    moves
}

/// Generates the legal moves of the piece on `from`.
pub fn legal_moves(position: &Position, from: Square) -> Vec<Move> {
    let Some(piece) = position.board.get(from) else {
        return Vec::new();
    };
    let mut moves = pseudo_moves(position, from);
    moves.retain(|&m| leaves_king_safe(position, m, piece.color));
    moves
}

/// Generates every legal move of `color`, in generation order.
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    position
        .board
        .pieces(color)
        .flat_map(|(sq, _)| legal_moves(position, sq))
        .collect()
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(position: &Position, color: Color) -> bool {
    position
        .board
        .pieces(color)
        .any(|(sq, piece)| {
            pseudo_moves(position, sq)
                .into_iter()
                .any(|m| leaves_king_safe(position, m, piece.color))
        })
}

/// Plays the move on a copy of the board and checks the mover's king.
fn leaves_king_safe(position: &Position, m: Move, color: Color) -> bool {
    let (next, _) = position.make_move(m);
    !is_in_check(&next.board, color)
}

fn pawn_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Move>) {
    let board = &position.board;
    let dir = color.pawn_direction();
    let promotes = |to: Square| to.row() == color.promotion_row();
    let plain = |to: Square| {
        if promotes(to) {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        }
    };

    // Forward steps
    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty_at(sq)) {
        moves.push(Move::new(from, one, plain(one)));

        if from.row() == color.pawn_start_row() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.is_empty_at(sq)) {
                moves.push(Move::new(from, two, MoveKind::DoubleStep));
            }
        }
    }

    // Diagonal captures, including en passant
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != color => {
                moves.push(Move::new(from, to, plain(to)));
            }
            Some(_) => {}
            None => {
                let en_passant = position
                    .en_passant
                    .is_some_and(|ep| ep.square == to && ep.pawn_color != color);
                if en_passant {
                    moves.push(Move::new(from, to, MoveKind::EnPassant));
                }
            }
        }
    }
}

fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if board.get(to).map_or(true, |p| p.color != color) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board.get(to) {
                None => moves.push(Move::normal(from, to)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Castling needs an unmoved king on its home square with the right still
/// held, an unmoved rook of its color in the corner, empty squares between
/// them, and no attacked square on the king's path (start and destination
/// included).
fn castling_moves(position: &Position, from: Square, king: Piece, moves: &mut Vec<Move>) {
    let us = king.color;
    let them = us.opposite();
    let board = &position.board;

    if king.has_moved || from != king_home(us) {
        return;
    }

    for wing in Wing::BOTH {
        if !position.castling.can_castle(us, wing) {
            continue;
        }

        let rook_ready = board
            .get(wing.rook_home(us))
            .is_some_and(|r| r.is(PieceKind::Rook, us) && !r.has_moved);
        if !rook_ready {
            continue;
        }

        let path_clear = wing
            .between_cols()
            .iter()
            .all(|&col| board.is_empty_at(back_rank_square(us, col)));
        if !path_clear {
            continue;
        }

        let path_safe = wing
            .king_path_cols()
            .iter()
            .all(|&col| !is_square_attacked(board, back_rank_square(us, col), them));
        if path_safe {
            moves.push(Move::new(from, wing.king_target(us), wing.move_kind()));
        }
    }
}
