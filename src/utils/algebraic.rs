//! Square-notation boundary layer.
//!
//! Converts between coordinates such as `e4` (case-insensitive on input) and
//! internal `0..=63` indices.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{make_square, Bitboard, Square};

const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", //
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", //
];

/// Lowercase name of an in-range square. Panics on an index above 63.
#[inline]
pub fn square_name(square: Square) -> &'static str {
    SQUARE_NAMES[square as usize]
}

/// Convert notation such as `e4` or `E4` to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

/// Convert a square index to lowercase notation, rejecting indices above 63.
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    SQUARE_NAMES
        .get(square as usize)
        .map(|name| (*name).to_owned())
        .ok_or_else(|| ChessError::InvalidSquare(format!("index {square}")))
}

/// Convert notation to a one-hot bitboard.
pub fn algebraic_to_bitboard(square: &str) -> ChessResult<Bitboard> {
    Ok(1u64 << algebraic_to_square(square)?)
}
