use crate::game_state::chess_rules::CASTLING_MOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_moves_to_targets, target_mask, GenMode};
use crate::moves::bitboard_geometry::square_bit;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::move_descriptions::{ChessMove, FLAG_CASTLING};

pub fn generate_king_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let king_bb = game_state.pieces_of(side, PieceKind::King);
    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as Square;
    let targets = king_attacks(from) & target_mask(game_state, mode);
    push_moves_to_targets(game_state, from, PieceKind::King, targets, out);

    if mode == GenMode::All {
        generate_castling_moves(game_state, out);
    }
}

/// Castling is fully validated here: the right, both pieces on their home
/// squares, an empty corridor, and no attacked square on the king's path.
fn generate_castling_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let king = Piece::new(side, PieceKind::King);
    let rook = Piece::new(side, PieceKind::Rook);

    for castle in CASTLING_MOVES.iter().filter(|c| c.color == side) {
        if !game_state.has_castling_right(castle.right)
            || game_state.piece_at(castle.king_from) != Some(king)
            || game_state.piece_at(castle.rook_from) != Some(rook)
            || game_state.occupancy_all & castle.must_be_empty != 0
        {
            continue;
        }
        if castle
            .king_path
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }
        debug_assert_eq!(game_state.occupancy_all & square_bit(castle.king_to), 0);
        out.push(ChessMove::new(
            castle.king_from,
            castle.king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}
