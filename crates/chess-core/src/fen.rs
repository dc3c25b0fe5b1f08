//! FEN (Forsyth-Edwards Notation) parsing for position setup.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidMoveCounter(String),
}

/// The fields of a FEN record, validated and decoded.
///
/// Move counters are accepted for compatibility but not kept: the engine
/// has no fifty-move or move-number bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Every occupied square with its piece.
    pub pieces: Vec<(Square, PieceKind, Color)>,
    pub side_to_move: Color,
    /// White kingside, White queenside, Black kingside, Black queenside.
    pub castling: [bool; 4],
    pub en_passant: Option<Square>,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let pieces = Self::parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(fields[2])?;
        let en_passant = Self::parse_en_passant(fields[3])?;

        for counter in &fields[4..] {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter(counter.to_string()))?;
        }

        Ok(Fen {
            pieces,
            side_to_move,
            castling,
            en_passant,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceKind, Color)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::new();
        // FEN lists rank 8 first
        for (i, rank) in ranks.iter().enumerate() {
            let row = 7 - i as i32;
            let mut col = 0i32;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as i32;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let sq = Square::new(row, col).map_err(|_| {
                        FenError::InvalidPiecePlacement(format!("rank {} is too long", row + 1))
                    })?;
                    pieces.push((sq, kind, color));
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        row + 1
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    row + 1,
                    col
                )));
            }
        }

        Ok(pieces)
    }

    fn parse_castling(castling: &str) -> Result<[bool; 4], FenError> {
        let mut rights = [false; 4];
        if castling == "-" {
            return Ok(rights);
        }
        for c in castling.chars() {
            let slot = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}' in '{}'",
                        c, castling
                    )))
                }
            };
            rights[slot] = true;
        }
        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(ep) {
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}
