//! Self-describing move records.
//!
//! A `ChessMove` carries everything needed to apply it: origin, destination,
//! the moving piece, any captured piece, the promotion choice and a set of
//! independent flag bits.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

pub type MoveFlags = u8;

pub const FLAG_CAPTURE: MoveFlags = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: MoveFlags = 1 << 1;
pub const FLAG_EN_PASSANT: MoveFlags = 1 << 2;
pub const FLAG_CASTLING: MoveFlags = 1 << 3;
pub const FLAG_PROMOTION: MoveFlags = 1 << 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    /// Present iff `FLAG_PROMOTION` is set.
    pub promotion_piece: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl ChessMove {
    /// Build a move; the capture and promotion flags are derived from the
    /// optional pieces so they can never disagree.
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        extra_flags: MoveFlags,
    ) -> Self {
        let mut flags = extra_flags;
        if captured_piece.is_some() {
            flags |= FLAG_CAPTURE;
        }
        if promotion_piece.is_some() {
            flags |= FLAG_PROMOTION;
        }
        Self {
            from,
            to,
            moved_piece,
            captured_piece,
            promotion_piece,
            flags,
        }
    }

    #[inline]
    pub fn quiet(from: Square, to: Square, moved_piece: PieceKind) -> Self {
        Self::new(from, to, moved_piece, None, None, 0)
    }

    #[inline]
    pub const fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.has_flag(FLAG_CAPTURE)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.has_flag(FLAG_EN_PASSANT)
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.has_flag(FLAG_CASTLING)
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.has_flag(FLAG_DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.has_flag(FLAG_PROMOTION)
    }

    /// Captures and promotions; the moves quiescence search resolves.
    #[inline]
    pub const fn is_tactical(&self) -> bool {
        self.flags & (FLAG_CAPTURE | FLAG_PROMOTION) != 0
    }

    /// Same origin, destination and promotion choice.
    #[inline]
    pub fn same_action(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to && self.promotion_piece == other.promotion_piece
    }
}

/// Long algebraic form, e.g. `e2e4` or `a7a8q`.
impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(promo) = self.promotion_piece {
            write!(f, "{}", promo.fen_char())?;
        }
        Ok(())
    }
}
