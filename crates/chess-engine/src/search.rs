//! Minimax search with alpha-beta pruning.
//!
//! White maximizes and Black minimizes a material score. Every node works
//! on its own copy of the position, so a search never touches the live
//! game and needs no shared state beyond a node counter.

use crate::attacks::is_in_check;
use crate::movegen::all_legal_moves;
use crate::{Board, Position};
use chess_core::{Color, Move};
use tracing::{debug, trace};

/// Default search depth in plies, counting the root move.
pub const DEFAULT_DEPTH: u32 = 3;

/// Score of a checkmate, from White's point of view when White delivers it.
pub const MATE_SCORE: i32 = 999_999;

/// How a node without legal moves is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalScoring {
    /// Checkmate scores `∓MATE_SCORE`, stalemate scores 0.
    #[default]
    Exact,
    /// Fall back to the material count, as if the node were a leaf.
    Material,
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search, root move included. Zero is treated as one.
    pub depth: u32,
    pub terminal: TerminalScoring,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            terminal: TerminalScoring::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u32) -> Self {
        SearchConfig {
            depth,
            ..Self::default()
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the searching side has no legal move.
    pub best_move: Option<Move>,
    /// Score of the chosen line, positive when it favors White.
    pub score: i32,
    /// Nodes visited below the root.
    pub nodes: u64,
}

/// Static evaluation: material only, positive when White is ahead.
#[inline]
pub fn evaluate(board: &Board) -> i32 {
    board.material()
}

/// Picks a move for `color` with a search of `depth` plies.
///
/// Returns `None` if `color` has no legal move. Equal scores keep the
/// first move in generation order, so repeated calls agree.
pub fn choose_best_move(position: &Position, color: Color, depth: u32) -> Option<Move> {
    search(position, color, &SearchConfig::with_depth(depth)).best_move
}

/// Searches the position with `color` to move.
pub fn search(position: &Position, color: Color, config: &SearchConfig) -> SearchResult {
    let mut root = position.clone();
    root.side_to_move = color;

    let mut searcher = Searcher {
        terminal: config.terminal,
        nodes: 0,
    };
    let depth = config.depth.max(1);
    let maximizing = color == Color::White;

    let mut best_move = None;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;

    for m in all_legal_moves(&root, color) {
        let (next, _) = root.make_move(m);
        let score = searcher.minimax(&next, depth - 1, alpha, beta);
        trace!(mv = %m, score, "root move");

        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if improves || best_move.is_none() {
            best_score = score;
            best_move = Some(m);
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    if best_move.is_none() {
        best_score = searcher.terminal_score(&root);
    }

    debug!(
        %color,
        depth,
        best = ?best_move.map(|m| m.to_string()),
        score = best_score,
        nodes = searcher.nodes,
        "search finished"
    );

    SearchResult {
        best_move,
        score: best_score,
        nodes: searcher.nodes,
    }
}

struct Searcher {
    terminal: TerminalScoring,
    nodes: u64,
}

impl Searcher {
    fn minimax(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(&position.board);
        }

        let us = position.side_to_move;
        let moves = all_legal_moves(position, us);
        if moves.is_empty() {
            return self.terminal_score(position);
        }

        let maximizing = us == Color::White;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for m in moves {
            let (next, _) = position.make_move(m);
            let score = self.minimax(&next, depth - 1, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    fn terminal_score(&self, position: &Position) -> i32 {
        match self.terminal {
            TerminalScoring::Material => evaluate(&position.board),
            TerminalScoring::Exact => {
                let us = position.side_to_move;
                if is_in_check(&position.board, us) {
                    -us.sign() * MATE_SCORE
                } else {
                    0
                }
            }
        }
    }
}
