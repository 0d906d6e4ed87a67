//! Pseudo-legal moves for knights, bishops, rooks and queens.
//!
//! Each generator intersects the piece's attack set with the squares allowed
//! by the generation mode (own pieces are always excluded).

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_moves_to_targets, target_mask, GenMode};
use crate::moves::bitboard_geometry::squares;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

/// Attack set of a non-pawn, non-king piece standing on `square`.
#[inline]
pub fn piece_attacks(kind: PieceKind, square: Square, occupancy: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::Pawn | PieceKind::King => 0,
    }
}

fn generate_for_kind(game_state: &GameState, kind: PieceKind, mode: GenMode, out: &mut Vec<ChessMove>) {
    let allowed = target_mask(game_state, mode);
    for from in squares(game_state.pieces_of(game_state.side_to_move, kind)) {
        let targets = piece_attacks(kind, from, game_state.occupancy_all) & allowed;
        push_moves_to_targets(game_state, from, kind, targets, out);
    }
}

pub fn generate_knight_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    generate_for_kind(game_state, PieceKind::Knight, mode, out);
}

pub fn generate_bishop_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    generate_for_kind(game_state, PieceKind::Bishop, mode, out);
}

pub fn generate_rook_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    generate_for_kind(game_state, PieceKind::Rook, mode, out);
}

pub fn generate_queen_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    generate_for_kind(game_state, PieceKind::Queen, mode, out);
}
