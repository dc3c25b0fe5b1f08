//! Game state machine: turn order, move application and game status.
//!
//! [`GameState`] owns the live [`Position`] plus a history of owned
//! snapshots. Moves are only ever committed after being matched against
//! the legal moves of the side to move, so a rejected move leaves the game
//! untouched.

use crate::attacks::is_in_check;
use crate::movegen::{all_legal_moves, has_legal_move, legal_moves};
use crate::search::{choose_best_move, search, SearchConfig, SearchResult};
use crate::{Board, Position};
use chess_core::{Color, FenError, Move, Piece, Square, SquareError};
use thiserror::Error;
use tracing::debug;

/// Errors returned by game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinates outside the board.
    #[error("invalid square: {0}")]
    InvalidSquare(#[from] SquareError),

    /// The move is not among the legal moves of the side to move.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The position has no king of the given color.
    #[error("no {0} king on the board")]
    NoKingPresent(Color),

    /// The FEN string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    /// No legal moves while not in check.
    Stalemate,
}

/// What an applied move did, for logs and status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// The piece as it stood before moving.
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// The side now to move is in check.
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Owned snapshot of the position before the move.
    pub before: Position,
    pub mv: Move,
    pub captured: Option<Piece>,
}

/// A chess game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    start: Position,
    history: Vec<HistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game from the standard starting position: White to move,
    /// all castling rights, no en passant target.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        GameState {
            start: position.clone(),
            position,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Restarts from the position the game was created with.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns the recorded moves, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the king square of `color`.
    pub fn king_square(&self, color: Color) -> Result<Square, GameError> {
        self.position
            .board
            .king_square(color)
            .ok_or(GameError::NoKingPresent(color))
    }

    /// Legal moves of the piece on `square`.
    ///
    /// Empty when the square is empty or holds a piece of the side not to
    /// move.
    pub fn legal_moves(&self, square: Square) -> Vec<Move> {
        match self.position.board.get(square) {
            Some(piece) if piece.color == self.position.side_to_move => {
                legal_moves(&self.position, square)
            }
            _ => Vec::new(),
        }
    }

    /// Every legal move of the side to move, in generation order.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        all_legal_moves(&self.position, self.position.side_to_move)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(&self.position.board, self.position.side_to_move)
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !has_legal_move(&self.position, self.position.side_to_move)
    }

    /// Returns true if the side to move has no legal move but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !has_legal_move(&self.position, self.position.side_to_move)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        if has_legal_move(&self.position, self.position.side_to_move) {
            return None;
        }
        Some(if self.is_check() {
            match self.position.side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            }
        } else {
            GameResult::Stalemate
        })
    }

    /// Applies a move of the side to move.
    ///
    /// The move must equal one of the generated legal moves (kind
    /// included); anything else is rejected with [`GameError::IllegalMove`]
    /// and the game is left unchanged.
    pub fn apply_move(&mut self, m: Move) -> Result<MoveOutcome, GameError> {
        if !self.legal_moves(m.from).contains(&m) {
            return Err(GameError::IllegalMove(m.to_string()));
        }
        let moved = self
            .position
            .board
            .get(m.from)
            .ok_or_else(|| GameError::IllegalMove(m.to_string()))?;

        let (next, captured) = self.position.make_move(m);
        let before = std::mem::replace(&mut self.position, next);
        self.history.push(HistoryEntry {
            before,
            mv: m,
            captured,
        });

        let is_check = self.is_check();
        let no_moves = !has_legal_move(&self.position, self.position.side_to_move);
        let outcome = MoveOutcome {
            mv: m,
            moved,
            captured,
            is_check,
            is_checkmate: is_check && no_moves,
            is_stalemate: !is_check && no_moves,
        };
        debug!(
            mv = %m,
            piece = %moved,
            captured = ?captured.map(|p| p.kind),
            check = outcome.is_check,
            checkmate = outcome.is_checkmate,
            stalemate = outcome.is_stalemate,
            "applied move"
        );
        Ok(outcome)
    }

    /// Applies the legal move going from `from` to `to`, whatever its kind.
    ///
    /// This is the entry point for input that only names two squares.
    pub fn apply_squares(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        let m = self
            .legal_moves(from)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or_else(|| GameError::IllegalMove(format!("{}{}", from, to)))?;
        self.apply_move(m)
    }

    /// Applies a move given as coordinates such as `"e2e4"`.
    pub fn apply_coordinates(&mut self, text: &str) -> Result<MoveOutcome, GameError> {
        let (from, to) = Move::parse_squares(text)
            .ok_or_else(|| GameError::IllegalMove(text.trim().to_string()))?;
        self.apply_squares(from, to)
    }

    /// Takes back the last move, returning it.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.position = entry.before;
        debug!(mv = %entry.mv, "undid move");
        Some(entry.mv)
    }

    /// Picks a move for the side to move with a search of `depth` plies.
    pub fn choose_best_move(&self, depth: u32) -> Option<Move> {
        choose_best_move(&self.position, self.position.side_to_move, depth)
    }

    /// Runs a configured search for the side to move.
    pub fn search(&self, config: &SearchConfig) -> SearchResult {
        search(&self.position, self.position.side_to_move, config)
    }
}
