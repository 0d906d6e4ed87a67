//! Attack detection.
//!
//! `is_square_attacked` is the single source of truth for check detection,
//! legality filtering and castling safety. It looks outward from the target
//! square: a piece of kind K attacks the square iff a K standing on the square
//! would attack that piece (pawns use the defender's attack direction).

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces_of(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

/// Bitboard of every `attacker_color` piece attacking `square` under the
/// current occupancy.
pub fn attackers_to_square(game_state: &GameState, square: Square, attacker_color: Color) -> Bitboard {
    let occupancy = game_state.occupancy_all;
    let pawns = game_state.pieces_of(attacker_color, PieceKind::Pawn);
    let knights = game_state.pieces_of(attacker_color, PieceKind::Knight);
    let kings = game_state.pieces_of(attacker_color, PieceKind::King);
    let queens = game_state.pieces_of(attacker_color, PieceKind::Queen);
    let diagonal = game_state.pieces_of(attacker_color, PieceKind::Bishop) | queens;
    let orthogonal = game_state.pieces_of(attacker_color, PieceKind::Rook) | queens;

    (pawn_attacks(attacker_color.opposite(), square) & pawns)
        | (knight_attacks(square) & knights)
        | (king_attacks(square) & kings)
        | (bishop_attacks(square, occupancy) & diagonal)
        | (rook_attacks(square, occupancy) & orthogonal)
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let pawns = game_state.pieces_of(attacker_color, PieceKind::Pawn);
    if pawn_attacks(attacker_color.opposite(), square) & pawns != 0 {
        return true;
    }

    if knight_attacks(square) & game_state.pieces_of(attacker_color, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & game_state.pieces_of(attacker_color, PieceKind::King) != 0 {
        return true;
    }

    let queens = game_state.pieces_of(attacker_color, PieceKind::Queen);
    let diagonal = game_state.pieces_of(attacker_color, PieceKind::Bishop) | queens;
    if diagonal != 0 && bishop_attacks(square, game_state.occupancy_all) & diagonal != 0 {
        return true;
    }

    let orthogonal = game_state.pieces_of(attacker_color, PieceKind::Rook) | queens;
    orthogonal != 0 && rook_attacks(square, game_state.occupancy_all) & orthogonal != 0
}

/// Whether `color`'s king is attacked. A side without a king is never in
/// check.
#[inline]
pub fn is_color_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether the side to move is in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState) -> bool {
    is_color_in_check(game_state, game_state.side_to_move)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_attacks_respect_direction() {
        let game = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        // White pawn e4 attacks d5 and f5; black pawn d5 attacks c4 and e4.
        assert!(is_square_attacked(&game, 35, Color::White));
        assert!(is_square_attacked(&game, 37, Color::White));
        assert!(!is_square_attacked(&game, 19, Color::White));
        assert!(is_square_attacked(&game, 28, Color::Black));
        assert!(is_square_attacked(&game, 26, Color::Black));
        assert!(!is_square_attacked(&game, 43, Color::Black));
    }

    #[test]
    fn sliders_are_blocked_by_pieces() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, 3, Color::White));
        assert!(is_square_attacked(&game, 56, Color::White));
        // Rook on a1 cannot see past the king on e1.
        assert!(!is_square_attacked(&game, 6, Color::White));
    }

    #[test]
    fn detects_check_and_lists_attackers() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&game));
        assert_eq!(attackers_to_square(&game, 4, Color::Black), 1u64 << 7);
        assert!(is_color_in_check(&game, Color::White));
        assert!(!is_color_in_check(&game, Color::Black));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let mut game = GameState::new_empty();
        game.put_piece(Piece::new(Color::Black, PieceKind::Queen), 0);
        assert!(!is_king_in_check(&game));
        assert_eq!(king_square(&game, Color::White), None);
    }
}
