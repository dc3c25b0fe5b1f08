//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions only ever produce a queen here, so reference counts only
//! match for positions where no promotion happens within `depth`.

use super::all_legal_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(position, position.side_to_move);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&position.make_move(m).0, depth - 1))
        .sum()
}

/// Perft with divide: node count below each root move.
/// Useful for narrowing down which move has an incorrect count.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = all_legal_moves(position, position.side_to_move);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|&m| {
            let nodes = perft(&position.make_move(m).0, depth.saturating_sub(1));
            (m.to_string(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
