//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, then keeps only the moves
//! that do not leave the mover's king attacked. Pins, double check and king
//! steps next to the enemy king all fall out of that single re-check.
//! Castling is exempt because its generator already proved the king's path
//! safe.

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_color_in_check, is_king_in_check};
use crate::move_generation::legal_move_shared::GenMode;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::move_descriptions::ChessMove;

pub fn generate_pseudo_legal_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    generate_pawn_moves(game_state, mode, out);
    generate_knight_moves(game_state, mode, out);
    generate_bishop_moves(game_state, mode, out);
    generate_rook_moves(game_state, mode, out);
    generate_queen_moves(game_state, mode, out);
    generate_king_moves(game_state, mode, out);
}

/// Whether the pseudo-legal `mv` keeps the mover's king safe.
#[inline]
pub fn is_legal(game_state: &GameState, mv: ChessMove) -> bool {
    if mv.is_castling() {
        return true;
    }
    let next = apply_move(game_state, mv);
    !is_color_in_check(&next, game_state.side_to_move)
}

fn generate_filtered(game_state: &GameState, mode: GenMode) -> Vec<ChessMove> {
    let mut pseudo = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, mode, &mut pseudo);
    pseudo.retain(|&mv| is_legal(game_state, mv));
    pseudo
}

/// Every legal move for the side to move.
pub fn generate_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    generate_filtered(game_state, GenMode::All)
}

/// Legal captures and promotions only.
pub fn generate_legal_tactical_moves(game_state: &GameState) -> Vec<ChessMove> {
    generate_filtered(game_state, GenMode::Tactical)
}

/// Stops at the first legal move found.
pub fn has_legal_moves(game_state: &GameState) -> bool {
    let mut pseudo = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, GenMode::All, &mut pseudo);
    pseudo.into_iter().any(|mv| is_legal(game_state, mv))
}

/// Recompute `status` for the side to move.
pub fn refresh_status(game_state: &mut GameState) {
    let in_check = is_king_in_check(game_state);
    let can_move = has_legal_moves(game_state);
    game_state.status = GameStatus {
        in_check,
        is_checkmate: in_check && !can_move,
        is_stalemate: !in_check && !can_move,
        is_fifty_move_draw: can_move && game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES,
    };
}
