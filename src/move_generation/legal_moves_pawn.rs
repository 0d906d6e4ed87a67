//! Pseudo-legal pawn moves.
//!
//! Pushes are generated set-wise by shifting the whole pawn bitboard; captures
//! and en passant walk the pawns one at a time through the attack table.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_piece_on, GenMode};
use crate::moves::bitboard_geometry::{rank_mask, shift, square_bit, squares, Direction};
use crate::moves::leaper_attacks::pawn_attacks;
use crate::moves::move_descriptions::{ChessMove, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

#[inline]
fn push_direction(side: Color) -> Direction {
    match side {
        Color::White => Direction::North,
        Color::Black => Direction::South,
    }
}

/// Square one step behind `square` from `side`'s point of view.
#[inline]
pub fn square_behind(side: Color, square: Square) -> Square {
    match side {
        Color::White => square - 8,
        Color::Black => square + 8,
    }
}

fn push_pawn_move(
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    side: Color,
    out: &mut Vec<ChessMove>,
) {
    if square_rank(to) == side.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, Some(promo), 0));
        }
    } else {
        out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, None, 0));
    }
}

pub fn generate_pawn_moves(game_state: &GameState, mode: GenMode, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let pawns = game_state.pieces_of(side, PieceKind::Pawn);
    if pawns == 0 {
        return;
    }
    let empty = !game_state.occupancy_all;
    let enemy_occ = game_state.occupancy(side.opposite());
    let dir = push_direction(side);
    let promotion_rank = rank_mask(side.promotion_rank());

    let single = shift(pawns, dir) & empty;
    let pushes = match mode {
        GenMode::All => single,
        GenMode::Tactical => single & promotion_rank,
    };
    for to in squares(pushes) {
        push_pawn_move(square_behind(side, to), to, None, side, out);
    }

    if mode == GenMode::All {
        // Pawns that stepped off their home rank onto an empty square.
        let from_home = shift(pawns & rank_mask(side.pawn_home_rank()), dir) & empty;
        for to in squares(shift(from_home, dir) & empty) {
            let from = square_behind(side, square_behind(side, to));
            out.push(ChessMove::new(from, to, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH));
        }
    }

    for from in squares(pawns) {
        let attacks = pawn_attacks(side, from);
        for to in squares(attacks & enemy_occ) {
            push_pawn_move(from, to, enemy_piece_on(game_state, to), side, out);
        }

        if let Some(ep) = game_state.en_passant_square {
            let victim_square = square_behind(side, ep);
            let victim_is_enemy_pawn =
                game_state.pieces_of(side.opposite(), PieceKind::Pawn) & square_bit(victim_square) != 0;
            if attacks & square_bit(ep) != 0 && victim_is_enemy_pawn {
                out.push(ChessMove::new(
                    from,
                    ep,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves(fen: &str, mode: GenMode) -> Vec<ChessMove> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, mode, &mut out);
        out
    }

    #[test]
    fn start_position_has_sixteen_pawn_moves_each_side() {
        let white = pawn_moves(crate::game_state::chess_rules::STARTING_POSITION_FEN, GenMode::All);
        assert_eq!(white.len(), 16);
        assert_eq!(white.iter().filter(|mv| mv.is_double_pawn_push()).count(), 8);
        let black = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", GenMode::All);
        assert_eq!(black.len(), 16);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        // e3 blocked: neither push. d4 blocked: single push only.
        let moves = pawn_moves("4k3/8/8/8/3n4/4n3/3PP3/4K3 w - - 0 1", GenMode::All);
        let from_e2: Vec<_> = moves.iter().filter(|mv| mv.from == 12).collect();
        assert!(from_e2.iter().all(|mv| mv.is_capture()));
        let from_d2: Vec<_> = moves.iter().filter(|mv| mv.from == 11 && !mv.is_capture()).collect();
        assert_eq!(from_d2.len(), 1);
        assert_eq!(from_d2[0].to, 19);
    }

    #[test]
    fn promotions_generate_four_pieces_quiet_and_capturing() {
        let quiet = pawn_moves("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", GenMode::All);
        assert_eq!(quiet.len(), 4);
        assert!(quiet.iter().all(|mv| mv.is_promotion() && !mv.is_capture()));

        let both = pawn_moves("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", GenMode::All);
        assert_eq!(both.len(), 8);
        assert_eq!(both.iter().filter(|mv| mv.is_capture()).count(), 4);
    }

    #[test]
    fn black_promotes_on_first_rank() {
        let moves = pawn_moves("4k3/8/8/8/8/8/p7/4K3 b - - 0 1", GenMode::All);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.to == 0));
    }

    #[test]
    fn en_passant_targets_the_passed_square() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", GenMode::All);
        let ep: Vec<_> = moves.iter().filter(|mv| mv.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!((ep[0].from, ep[0].to), (36, 43));
        assert_eq!(ep[0].captured_piece, Some(PieceKind::Pawn));
    }

    #[test]
    fn tactical_mode_skips_quiet_pushes() {
        let moves = pawn_moves("1r2k3/P7/8/8/8/8/4P3/4K3 w - - 0 1", GenMode::Tactical);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.is_promotion()));
    }
}
