//! Chess rules engine with a fixed-depth minimax player.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces, cheap to clone for speculation
//! - [`attacks`] - square attack and check detection
//! - [`movegen`] - pseudo-legal and legal move generation, plus perft
//! - [`Position`] - board, side to move, castling rights and en passant target
//! - [`GameState`] - a game in progress with history, undo and status
//! - [`search`] - minimax with alpha-beta pruning over material scores
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! assert_eq!(game.all_legal_moves().len(), 20);
//!
//! game.apply_coordinates("e2e4").unwrap();
//! let reply = game.choose_best_move(2).expect("black has moves");
//! let outcome = game.apply_move(reply).unwrap();
//! assert!(!outcome.is_checkmate);
//! ```

pub mod attacks;
mod board;
mod game;
pub mod movegen;
mod position;
pub mod search;

pub use attacks::{is_in_check, is_square_attacked};
pub use board::Board;
pub use game::{GameError, GameResult, GameState, HistoryEntry, MoveOutcome};
pub use movegen::{all_legal_moves, has_legal_move, legal_moves, pseudo_moves};
pub use position::{king_home, CastlingRights, EnPassantTarget, Position, Wing, WingRights};
pub use search::{
    choose_best_move, evaluate, search, SearchConfig, SearchResult, TerminalScoring,
    DEFAULT_DEPTH, MATE_SCORE,
};
