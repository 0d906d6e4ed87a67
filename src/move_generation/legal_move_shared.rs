use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bitboard_geometry::squares;
use crate::moves::move_descriptions::ChessMove;

/// Which pseudo-legal moves a generator should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Every pseudo-legal move.
    All,
    /// Captures (including en passant) and promotions only.
    Tactical,
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color != game_state.side_to_move)
        .map(|piece| piece.kind)
}

/// Squares a piece of the side to move may land on in `mode`.
#[inline]
pub fn target_mask(game_state: &GameState, mode: GenMode) -> Bitboard {
    let side = game_state.side_to_move;
    match mode {
        GenMode::All => !game_state.occupancy(side),
        GenMode::Tactical => game_state.occupancy(side.opposite()),
    }
}

/// Emit one move per target square, classifying captures from the mailbox.
#[inline]
pub fn push_moves_to_targets(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    targets: Bitboard,
    out: &mut Vec<ChessMove>,
) {
    for to in squares(targets) {
        out.push(ChessMove::new(
            from,
            to,
            kind,
            enemy_piece_on(game_state, to),
            None,
            0,
        ));
    }
}
