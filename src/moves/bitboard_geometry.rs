//! Bit-level board geometry.
//!
//! File and rank masks, edge-safe directional shifts and square iteration.
//! Shifts that move east or west mask off the wrapped file so a bit never
//! jumps from the H file to the A file of the next rank (or back).

use crate::game_state::chess_types::{Bitboard, Square};

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;

#[inline]
pub const fn file_mask(file: u8) -> Bitboard {
    FILE_A << file
}

#[inline]
pub const fn rank_mask(rank: u8) -> Bitboard {
    RANK_1 << (rank * 8)
}

#[inline]
pub const fn square_bit(square: Square) -> Bitboard {
    1u64 << square
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Shift every bit one step in `direction`, dropping bits that leave the board.
#[inline]
pub const fn shift(bb: Bitboard, direction: Direction) -> Bitboard {
    match direction {
        Direction::North => bb << 8,
        Direction::South => bb >> 8,
        Direction::East => (bb & NOT_FILE_H) << 1,
        Direction::West => (bb & NOT_FILE_A) >> 1,
        Direction::NorthEast => (bb & NOT_FILE_H) << 9,
        Direction::NorthWest => (bb & NOT_FILE_A) << 7,
        Direction::SouthEast => (bb & NOT_FILE_H) >> 7,
        Direction::SouthWest => (bb & NOT_FILE_A) >> 9,
    }
}

/// Remove and return the lowest set square.
#[inline]
pub fn pop_lsb(bb: &mut Bitboard) -> Option<Square> {
    if *bb == 0 {
        return None;
    }
    let square = bb.trailing_zeros() as Square;
    *bb &= *bb - 1;
    Some(square)
}

/// Iterator over the set squares of a bitboard, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct Squares(pub Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        pop_lsb(&mut self.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

#[inline]
pub const fn squares(bb: Bitboard) -> Squares {
    Squares(bb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_shift_does_not_wrap_from_h_file() {
        let h4 = square_bit(31);
        assert_eq!(shift(h4, Direction::East), 0);
        assert_eq!(shift(h4, Direction::NorthEast), 0);
        assert_eq!(shift(h4, Direction::West), square_bit(30));
    }

    #[test]
    fn west_shift_does_not_wrap_from_a_file() {
        let a5 = square_bit(32);
        assert_eq!(shift(a5, Direction::West), 0);
        assert_eq!(shift(a5, Direction::SouthWest), 0);
        assert_eq!(shift(a5, Direction::SouthEast), square_bit(25));
    }

    #[test]
    fn vertical_shifts_fall_off_the_board() {
        assert_eq!(shift(RANK_8, Direction::North), 0);
        assert_eq!(shift(RANK_1, Direction::South), 0);
        assert_eq!(shift(RANK_2, Direction::North), RANK_3);
    }

    #[test]
    fn masks_cover_expected_squares() {
        assert_eq!(file_mask(0), FILE_A);
        assert_eq!(file_mask(7), FILE_H);
        assert_eq!(rank_mask(6), RANK_7);
        assert_eq!(file_mask(4).count_ones(), 8);
    }

    #[test]
    fn squares_iterates_low_to_high() {
        let collected: Vec<Square> = squares(square_bit(3) | square_bit(40) | square_bit(63)).collect();
        assert_eq!(collected, vec![3, 40, 63]);
    }
}
