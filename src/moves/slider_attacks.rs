//! Occupancy-aware sliding attacks for bishops, rooks and queens.
//!
//! Each ray walks outward one square at a time and stops on the first
//! occupied square, which is included in the result (it may be a capture).

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bitboard_geometry::{shift, Direction};

const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

/// Empty-board bishop lines per square.
pub const BISHOP_RAYS: [Bitboard; 64] = build_rays(&BISHOP_DIRECTIONS);
/// Empty-board rook lines per square.
pub const ROOK_RAYS: [Bitboard; 64] = build_rays(&ROOK_DIRECTIONS);

#[inline]
pub fn ray_attacks(square: Square, occupancy: Bitboard, direction: Direction) -> Bitboard {
    let mut attacks = 0u64;
    let mut cursor = 1u64 << square;
    loop {
        cursor = shift(cursor, direction);
        if cursor == 0 {
            break;
        }
        attacks |= cursor;
        if cursor & occupancy != 0 {
            break;
        }
    }
    attacks
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(square, occupancy, dir))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(square, occupancy, dir))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

const fn build_rays(directions: &[Direction; 4]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let mut d = 0usize;
        while d < 4 {
            let mut cursor = shift(1u64 << sq, directions[d]);
            while cursor != 0 {
                table[sq] |= cursor;
                cursor = shift(cursor, directions[d]);
            }
            d += 1;
        }
        sq += 1;
    }
    table
}
