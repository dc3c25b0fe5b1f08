//! Core types for chess.
//!
//! This crate provides the fundamental value types used by the engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveKind`] for move representation
//! - FEN field parsing for setting up arbitrary positions

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::{Square, SquareError};
