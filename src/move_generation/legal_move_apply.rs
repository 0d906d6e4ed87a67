//! Move application.
//!
//! `make_move` performs the board update shared by legality filtering and
//! search. `apply_move_complete` adds the game-status refresh and is the
//! public entry point for playing a move. `play_move` validates a caller's
//! `from`/`to` request against the legal move set first.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_move_for, rights_touched_by_square};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, refresh_status};
use crate::move_generation::legal_moves_pawn::square_behind;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::square_name;

/// Apply `mv` in place. Every field except the mate/stalemate flags is
/// updated; `status.in_check` is refreshed because it is cheap.
pub fn make_move(game_state: &mut GameState, mv: ChessMove) {
    let side = game_state.side_to_move;

    if mv.is_en_passant() {
        game_state.remove_piece(square_behind(side, mv.to));
    } else if mv.is_capture() {
        game_state.remove_piece(mv.to);
    }

    let Some(moving) = game_state.remove_piece(mv.from) else {
        panic!("no piece on {} for move {mv}", square_name(mv.from));
    };
    debug_assert_eq!(moving, Piece::new(side, mv.moved_piece), "move {mv} does not match board");

    let placed = mv
        .promotion_piece
        .map(|kind| Piece::new(side, kind))
        .unwrap_or(moving);
    game_state.put_piece(placed, mv.to);

    if mv.is_castling() {
        if let Some(castle) = castling_move_for(side, mv.to) {
            game_state.move_piece(castle.rook_from, castle.rook_to);
        }
    }

    let lost = rights_touched_by_square(mv.from) | rights_touched_by_square(mv.to);
    if game_state.castling_rights & lost != 0 {
        game_state.set_castling_rights(game_state.castling_rights & !lost);
    }

    let en_passant = mv
        .is_double_pawn_push()
        .then(|| square_behind(side, mv.to));
    if en_passant != game_state.en_passant_square {
        game_state.set_en_passant_square(en_passant);
    }

    if mv.moved_piece == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if side == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.set_side_to_move(side.opposite());
    game_state.status = GameStatus {
        in_check: is_king_in_check(game_state),
        ..GameStatus::default()
    };
}

/// Copy-make: the original board is untouched.
#[inline]
pub fn apply_move(game_state: &GameState, mv: ChessMove) -> GameState {
    let mut next = *game_state;
    make_move(&mut next, mv);
    next
}

/// Apply a legal move and recompute the cached game status.
pub fn apply_move_complete(game_state: &mut GameState, mv: ChessMove) {
    make_move(game_state, mv);
    refresh_status(game_state);
    #[cfg(debug_assertions)]
    game_state.assert_consistent();
}

/// Play the legal move `from` -> `to`. A promotion without an explicit piece
/// promotes to a queen. Rejects empty or opponent-owned origins and any
/// destination outside the legal set.
pub fn play_move(
    game_state: &mut GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<ChessMove> {
    let illegal = || ChessError::IllegalMove {
        from: square_name(from).to_owned(),
        to: square_name(to).to_owned(),
    };
    if from > 63 || to > 63 {
        return Err(ChessError::InvalidSquare(format!("index {}", from.max(to))));
    }

    match game_state.piece_at(from) {
        Some(piece) if piece.color == game_state.side_to_move => {}
        _ => return Err(illegal()),
    }

    let wanted_promotion = promotion.or(Some(PieceKind::Queen));
    let mv = generate_legal_moves(game_state)
        .into_iter()
        .find(|mv| {
            mv.from == from
                && mv.to == to
                && (mv.promotion_piece.is_none() || mv.promotion_piece == wanted_promotion)
        })
        .ok_or_else(illegal)?;

    apply_move_complete(game_state, mv);
    Ok(mv)
}
