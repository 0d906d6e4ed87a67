//! Zobrist hashing for position identity.
//!
//! One key per (color, piece, square), one for "white to move", one per
//! castling right and one per en-passant file. The key tables are a
//! process-wide singleton filled from a fixed seed on first use, so hashes are
//! identical across runs.
//!
//! `GameState` keeps its key up to date incrementally; `compute_zobrist_key`
//! rebuilds it from scratch and must always agree.

use std::sync::OnceLock;

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::game_state::chess_types::*;
use crate::moves::bitboard_geometry::squares;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    white_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.next_u64();
            }
        }
    }

    let white_to_move = rng.next_u64();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        white_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// XOR of the keys of every right set in `rights`.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    let keys = &tables().castling;
    (0..4)
        .filter(|bit| rights & (1 << bit) != 0)
        .fold(0, |acc, bit| acc ^ keys[bit])
}

#[inline]
pub fn en_passant_key(en_passant_square: Option<Square>) -> u64 {
    en_passant_square
        .map(|sq| tables().en_passant_file[square_file(sq) as usize])
        .unwrap_or(0)
}

#[inline]
pub fn side_to_move_key(side: Color) -> u64 {
    match side {
        Color::White => tables().white_to_move,
        Color::Black => 0,
    }
}

/// Full recomputation from the complete board state.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for sq in squares(game_state.pieces[color.index()][kind.index()]) {
                key ^= piece_square_key(Piece::new(color, kind), sq);
            }
        }
    }

    key ^= side_to_move_key(game_state.side_to_move);
    key ^= castling_key(game_state.castling_rights);
    key ^= en_passant_key(game_state.en_passant_square);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move_complete;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::long_algebraic::parse_long_algebraic;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key, b.zobrist_key);
        assert_eq!(a.zobrist_key, compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let one_right =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key, one_right.zobrist_key);
        assert_ne!(one_right.zobrist_key, without_rights.zobrist_key);
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key, ep.zobrist_key);
    }

    #[test]
    fn transpositions_hash_identically() {
        let mut a = GameState::new_game();
        for lan in ["g1f3", "g8f6", "b1c3", "b8c6"] {
            let mv = parse_long_algebraic(&a, lan).expect("legal");
            apply_move_complete(&mut a, mv);
        }
        let mut b = GameState::new_game();
        for lan in ["b1c3", "b8c6", "g1f3", "g8f6"] {
            let mv = parse_long_algebraic(&b, lan).expect("legal");
            apply_move_complete(&mut b, mv);
        }
        assert_eq!(a.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn incremental_matches_recompute_through_special_moves() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let root = GameState::from_fen(fen).expect("FEN should parse");
        for mv in generate_legal_moves(&root) {
            let mut child = root;
            apply_move_complete(&mut child, mv);
            assert_eq!(child.zobrist_key, compute_zobrist_key(&child), "after {mv}");
            for reply in generate_legal_moves(&child) {
                let mut grandchild = child;
                apply_move_complete(&mut grandchild, reply);
                assert_eq!(grandchild.zobrist_key, compute_zobrist_key(&grandchild), "after {mv} {reply}");
            }
        }
    }
}
