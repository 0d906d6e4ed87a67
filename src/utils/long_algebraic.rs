//! Long algebraic move notation (`e2e4`, `e7e8q`).
//!
//! Parsing resolves the text against the legal move list of the given board,
//! so the returned `ChessMove` carries the correct flags and captured piece.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_long_algebraic(game_state: &GameState, text: &str) -> ChessResult<ChessMove> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveNotation(text.to_owned()));
    }

    let bad = |_| ChessError::InvalidMoveNotation(text.to_owned());
    let from = algebraic_to_square(&text[0..2]).map_err(bad)?;
    let to = algebraic_to_square(&text[2..4]).map_err(bad)?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_fen_char(ch) {
            Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => Some(kind),
            _ => return Err(ChessError::InvalidMoveNotation(text.to_owned())),
        },
    };

    generate_legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion_piece == promotion)
        .ok_or_else(|| ChessError::IllegalMove {
            from: text[0..2].to_ascii_lowercase(),
            to: text[2..4].to_ascii_lowercase(),
        })
}

#[inline]
pub fn to_long_algebraic(mv: &ChessMove) -> String {
    mv.to_string()
}
