//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static position scoring to the
//! `BoardScorer` trait. `evaluate` layers terminal handling (mate, stalemate,
//! dead draws) on top of a scorer and answers from a chosen perspective.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_moves;
use crate::moves::bitboard_geometry::{file_mask, squares};

pub const MATE_SCORE: i32 = 30000;
/// Scores beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;
pub const DRAW_SCORE: i32 = 0;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&kind| {
                let white = game_state.pieces_of(Color::White, kind).count_ones() as i32;
                let black = game_state.pieces_of(Color::Black, kind).count_ones() as i32;
                (white - black) * Self::piece_value(kind)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        relative_to_side_to_move(game_state, Self::material_balance_white_minus_black(game_state))
    }
}

/// Material plus piece-square tables, with a king table tapered between
/// middlegame shelter and endgame centralization, and a bonus for rooks on
/// open or half-open files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    const OPEN_FILE_BONUS: i32 = 16;
    const SEMI_OPEN_FILE_BONUS: i32 = 8;

    fn positional_white_minus_black(game_state: &GameState) -> i32 {
        let phase = middlegame_phase(game_state);
        let mut score = 0i32;
        for color in Color::ALL {
            let sign = if color == Color::White { 1 } else { -1 };
            let mut side = 0i32;
            for kind in PieceKind::ALL {
                for sq in squares(game_state.pieces_of(color, kind)) {
                    side += piece_square_bonus(kind, color, sq, phase);
                }
            }
            side += Self::rook_file_bonus(game_state, color);
            score += sign * side;
        }
        score
    }

    fn rook_file_bonus(game_state: &GameState, color: Color) -> i32 {
        let own_pawns = game_state.pieces_of(color, PieceKind::Pawn);
        let enemy_pawns = game_state.pieces_of(color.opposite(), PieceKind::Pawn);
        squares(game_state.pieces_of(color, PieceKind::Rook))
            .map(|sq| {
                let file = file_mask(square_file(sq));
                match (own_pawns & file == 0, enemy_pawns & file == 0) {
                    (true, true) => Self::OPEN_FILE_BONUS,
                    (true, false) => Self::SEMI_OPEN_FILE_BONUS,
                    _ => 0,
                }
            })
            .sum()
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let material = MaterialScorer::material_balance_white_minus_black(game_state);
        let positional = Self::positional_white_minus_black(game_state);
        relative_to_side_to_move(game_state, material + positional)
    }
}

#[inline]
fn relative_to_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

/// Score for a node with no legal moves, seen by the side to move.
/// Mates found closer to the root score further from zero.
#[inline]
pub fn terminal_score(in_check: bool, ply: u8) -> i32 {
    if in_check {
        -MATE_SCORE + i32::from(ply)
    } else {
        DRAW_SCORE
    }
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// True when neither side can possibly deliver mate: bare kings, a single
/// minor piece, or bishops that all stand on one square color.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawns = Color::ALL.iter().any(|&color| {
        game_state.pieces_of(color, PieceKind::Pawn)
            | game_state.pieces_of(color, PieceKind::Rook)
            | game_state.pieces_of(color, PieceKind::Queen)
            != 0
    });
    if heavy_or_pawns {
        return false;
    }

    let knights = game_state.pieces_of(Color::White, PieceKind::Knight)
        | game_state.pieces_of(Color::Black, PieceKind::Knight);
    let bishops = game_state.pieces_of(Color::White, PieceKind::Bishop)
        | game_state.pieces_of(Color::Black, PieceKind::Bishop);
    let minors = (knights | bishops).count_ones();
    if minors <= 1 {
        return true;
    }

    const DARK_SQUARES: Bitboard = 0xAA55_AA55_AA55_AA55;
    knights == 0 && (bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0)
}

/// Evaluate `game_state` from `perspective`, ply 0 from the root.
pub fn evaluate(game_state: &GameState, perspective: Color) -> i32 {
    evaluate_at_ply(game_state, perspective, 0, &PieceSquareScorer)
}

/// Full evaluation: terminal positions dominate, dead draws score zero, and
/// everything else defers to `scorer`.
pub fn evaluate_at_ply<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    perspective: Color,
    ply: u8,
    scorer: &S,
) -> i32 {
    let side_relative = if !has_legal_moves(game_state) {
        terminal_score(is_king_in_check(game_state), ply)
    } else if is_insufficient_material(game_state) {
        DRAW_SCORE
    } else {
        scorer.score(game_state)
    };

    if perspective == game_state.side_to_move {
        side_relative
    } else {
        -side_relative
    }
}

/// Non-pawn material phase: 24 with all pieces on the board, 0 in a pawn
/// ending.
fn middlegame_phase(game_state: &GameState) -> i32 {
    let phase: i32 = Color::ALL
        .iter()
        .map(|&color| {
            game_state.pieces_of(color, PieceKind::Queen).count_ones() as i32 * 4
                + game_state.pieces_of(color, PieceKind::Rook).count_ones() as i32 * 2
                + game_state.pieces_of(color, PieceKind::Bishop).count_ones() as i32
                + game_state.pieces_of(color, PieceKind::Knight).count_ones() as i32
        })
        .sum();
    phase.clamp(0, 24)
}

// Tables are written as seen from White with rank 8 on the first row, so a
// white piece on `sq` reads index `sq ^ 56` and a black piece reads `sq`.

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

fn piece_square_bonus(kind: PieceKind, color: Color, sq: Square, phase: i32) -> i32 {
    let idx = match color {
        Color::White => (sq ^ 56) as usize,
        Color::Black => sq as usize,
    };
    match kind {
        PieceKind::Pawn => PAWN_TABLE[idx],
        PieceKind::Knight => KNIGHT_TABLE[idx],
        PieceKind::Bishop => BISHOP_TABLE[idx],
        PieceKind::Rook => ROOK_TABLE[idx],
        PieceKind::Queen => QUEEN_TABLE[idx],
        PieceKind::King => {
            (KING_MIDDLEGAME_TABLE[idx] * phase + KING_ENDGAME_TABLE[idx] * (24 - phase)) / 24
        }
    }
}
