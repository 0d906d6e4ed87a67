//! FEN-to-GameState parser.
//!
//! Builds a fully-populated board from Forsyth-Edwards Notation and then
//! validates it: one king per side, no pawns on the back ranks, castling
//! rights matching the home squares, a plausible en-passant target, and the
//! side not to move not left in check. Bad input is rejected, not repaired.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::CASTLING_MOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_color_in_check;
use crate::move_generation::legal_move_generator::refresh_status;
use crate::moves::bitboard_geometry::{square_bit, RANK_1, RANK_8};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fen_err = |msg: &str| ChessError::InvalidFen(msg.to_owned());
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_err("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_err("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_err("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_err("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| fen_err("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| fen_err("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(fen_err("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.set_side_to_move(parse_side_to_move(side_part)?);
    game_state.set_castling_rights(parse_castling_rights(castling_part)?);
    game_state.set_en_passant_square(parse_en_passant_square(en_passant_part)?);
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFen(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::InvalidFen(format!("invalid fullmove number: {fullmove_part}")))?;
    if game_state.fullmove_number == 0 {
        // Some tools emit 0; the convention starts counting at 1.
        game_state.fullmove_number = 1;
    }

    validate_position(&game_state)?;
    refresh_status(&mut game_state);
    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFen(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    break;
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| ChessError::InvalidFen(format!("invalid piece character '{ch}'")))?;
            if file >= 8 {
                file = 9;
                break;
            }
            game_state.put_piece(piece, make_square(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank {} does not sum to 8 files: '{rank_str}'",
                board_rank + 1
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" | "W" => Ok(Color::White),
        "b" | "B" => Ok(Color::Black),
        _ => Err(ChessError::InvalidFen(format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(ChessError::InvalidFen(format!("invalid castling character '{ch}'"))),
        };
        if rights & right != 0 {
            return Err(ChessError::InvalidFen(format!("duplicate castling character '{ch}'")));
        }
        rights |= right;
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| ChessError::InvalidFen(format!("invalid en-passant square: {en_passant_part}")))
}

/// Check the invariants every component downstream relies on.
pub fn validate_position(game_state: &GameState) -> ChessResult<()> {
    let invalid = |msg: String| Err(ChessError::InvalidPosition(msg));

    for color in Color::ALL {
        let kings = game_state.pieces_of(color, PieceKind::King).count_ones();
        if kings != 1 {
            return invalid(format!("{color:?} must have exactly one king, found {kings}"));
        }
        if game_state.occupancy(color).count_ones() > 16 {
            return invalid(format!("{color:?} has more than 16 pieces"));
        }
        if game_state.pieces_of(color, PieceKind::Pawn).count_ones() > 8 {
            return invalid(format!("{color:?} has more than 8 pawns"));
        }
    }

    let pawns = game_state.pieces_of(Color::White, PieceKind::Pawn)
        | game_state.pieces_of(Color::Black, PieceKind::Pawn);
    if pawns & (RANK_1 | RANK_8) != 0 {
        return invalid("pawn on the first or eighth rank".to_owned());
    }

    for castle in &CASTLING_MOVES {
        if !game_state.has_castling_right(castle.right) {
            continue;
        }
        let king_home = game_state.piece_at(castle.king_from) == Some(Piece::new(castle.color, PieceKind::King));
        let rook_home = game_state.piece_at(castle.rook_from) == Some(Piece::new(castle.color, PieceKind::Rook));
        if !king_home || !rook_home {
            return invalid(format!(
                "castling right for {:?} without king and rook on their home squares",
                castle.color
            ));
        }
    }

    if let Some(ep) = game_state.en_passant_square {
        validate_en_passant(game_state, ep)?;
    }

    if is_color_in_check(game_state, game_state.side_to_move.opposite()) {
        return invalid("side not to move is in check".to_owned());
    }

    Ok(())
}

fn validate_en_passant(game_state: &GameState, ep: Square) -> ChessResult<()> {
    let side = game_state.side_to_move;
    // The pawn that just double-pushed belongs to the side not to move.
    let (target_rank, pawn_square, origin_square) = match side {
        Color::White => (5, ep.wrapping_sub(8), ep.wrapping_add(8)),
        Color::Black => (2, ep.wrapping_add(8), ep.wrapping_sub(8)),
    };
    let pushed_pawn = Piece::new(side.opposite(), PieceKind::Pawn);

    let plausible = square_rank(ep) == target_rank
        && game_state.piece_at(pawn_square) == Some(pushed_pawn)
        && game_state.occupancy_all & (square_bit(ep) | square_bit(origin_square)) == 0;
    if plausible {
        Ok(())
    } else {
        Err(ChessError::InvalidPosition(format!(
            "en-passant target {ep} does not follow a double pawn push"
        )))
    }
}
