//! Precomputed attack masks for the non-sliding pieces.
//!
//! King, knight and pawn attacks depend only on the origin square, so they are
//! built once at compile time from edge-safe shifts.

use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::bitboard_geometry::{shift, Direction, NOT_FILE_A, NOT_FILE_H};

const NOT_FILE_AB: Bitboard = NOT_FILE_A & (NOT_FILE_A << 1);
const NOT_FILE_GH: Bitboard = NOT_FILE_H & (NOT_FILE_H >> 1);

#[derive(Clone, Copy)]
enum Leaper {
    King,
    Knight,
    WhitePawn,
    BlackPawn,
}

pub const KING_ATTACKS: [Bitboard; 64] = build_table(Leaper::King);
pub const KNIGHT_ATTACKS: [Bitboard; 64] = build_table(Leaper::Knight);
pub const WHITE_PAWN_ATTACKS: [Bitboard; 64] = build_table(Leaper::WhitePawn);
pub const BLACK_PAWN_ATTACKS: [Bitboard; 64] = build_table(Leaper::BlackPawn);

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

const fn build_table(leaper: Leaper) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let bb = 1u64 << sq;
        table[sq] = match leaper {
            Leaper::King => king_mask(bb),
            Leaper::Knight => knight_mask(bb),
            Leaper::WhitePawn => white_pawn_mask(bb),
            Leaper::BlackPawn => black_pawn_mask(bb),
        };
        sq += 1;
    }
    table
}

const fn king_mask(bb: Bitboard) -> Bitboard {
    let sideways = shift(bb, Direction::East) | shift(bb, Direction::West);
    let row = bb | sideways;
    sideways | shift(row, Direction::North) | shift(row, Direction::South)
}

const fn knight_mask(bb: Bitboard) -> Bitboard {
    ((bb & NOT_FILE_H) << 17)
        | ((bb & NOT_FILE_A) << 15)
        | ((bb & NOT_FILE_GH) << 10)
        | ((bb & NOT_FILE_AB) << 6)
        | ((bb & NOT_FILE_A) >> 17)
        | ((bb & NOT_FILE_H) >> 15)
        | ((bb & NOT_FILE_AB) >> 10)
        | ((bb & NOT_FILE_GH) >> 6)
}

const fn white_pawn_mask(bb: Bitboard) -> Bitboard {
    shift(bb, Direction::NorthEast) | shift(bb, Direction::NorthWest)
}

const fn black_pawn_mask(bb: Bitboard) -> Bitboard {
    shift(bb, Direction::SouthEast) | shift(bb, Direction::SouthWest)
}
