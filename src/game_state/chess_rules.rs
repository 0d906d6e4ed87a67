//! Canonical chess-rule constants.
//!
//! Starting position, home squares used by castling, and the clock limit used
//! by the fifty-move rule.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const WHITE_KING_HOME: Square = 4;
pub const BLACK_KING_HOME: Square = 60;

pub const WHITE_KINGSIDE_ROOK_HOME: Square = 7;
pub const WHITE_QUEENSIDE_ROOK_HOME: Square = 0;
pub const BLACK_KINGSIDE_ROOK_HOME: Square = 63;
pub const BLACK_QUEENSIDE_ROOK_HOME: Square = 56;

/// Halfmove clock value at which the game is drawn by the fifty-move rule.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Geometry of one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingMove {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook.
    pub must_be_empty: Bitboard,
    /// King start, transit and destination squares; none may be attacked.
    pub king_path: [Square; 3],
}

pub static CASTLING_MOVES: [CastlingMove; 4] = [
    CastlingMove {
        color: Color::White,
        right: CASTLE_WHITE_KINGSIDE,
        king_from: WHITE_KING_HOME,
        king_to: 6,
        rook_from: WHITE_KINGSIDE_ROOK_HOME,
        rook_to: 5,
        must_be_empty: (1 << 5) | (1 << 6),
        king_path: [4, 5, 6],
    },
    CastlingMove {
        color: Color::White,
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: WHITE_KING_HOME,
        king_to: 2,
        rook_from: WHITE_QUEENSIDE_ROOK_HOME,
        rook_to: 3,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        king_path: [4, 3, 2],
    },
    CastlingMove {
        color: Color::Black,
        right: CASTLE_BLACK_KINGSIDE,
        king_from: BLACK_KING_HOME,
        king_to: 62,
        rook_from: BLACK_KINGSIDE_ROOK_HOME,
        rook_to: 61,
        must_be_empty: (1 << 61) | (1 << 62),
        king_path: [60, 61, 62],
    },
    CastlingMove {
        color: Color::Black,
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: BLACK_KING_HOME,
        king_to: 58,
        rook_from: BLACK_QUEENSIDE_ROOK_HOME,
        rook_to: 59,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        king_path: [60, 59, 58],
    },
];

/// Castling move whose king lands on `king_to`, if any.
pub fn castling_move_for(color: Color, king_to: Square) -> Option<&'static CastlingMove> {
    CASTLING_MOVES
        .iter()
        .find(|c| c.color == color && c.king_to == king_to)
}

/// Rights that disappear once anything leaves or arrives on `square`.
#[inline]
pub const fn rights_touched_by_square(square: Square) -> CastlingRights {
    match square {
        WHITE_KING_HOME => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        BLACK_KING_HOME => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        WHITE_KINGSIDE_ROOK_HOME => CASTLE_WHITE_KINGSIDE,
        WHITE_QUEENSIDE_ROOK_HOME => CASTLE_WHITE_QUEENSIDE,
        BLACK_KINGSIDE_ROOK_HOME => CASTLE_BLACK_KINGSIDE,
        BLACK_QUEENSIDE_ROOK_HOME => CASTLE_BLACK_QUEENSIDE,
        _ => 0,
    }
}
