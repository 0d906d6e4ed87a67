//! Core board state representation.
//!
//! `GameState` is the central model for the engine. It stores a dense
//! per-square mailbox next to per-piece bitboards and occupancy composites,
//! turn/state flags, clocks, the incremental Zobrist key and a cached game
//! status. All fields are plain values, so copying a board is a flat copy.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::moves::bitboard_geometry::square_bit;
use crate::search::zobrist::{self, piece_square_key};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Derived game-over flags for the side to move. Recomputed after every
/// complete move application, never edited by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub in_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_fifty_move_draw: bool,
}

impl GameStatus {
    #[inline]
    pub const fn is_game_over(&self) -> bool {
        self.is_checkmate || self.is_stalemate || self.is_fifty_move_draw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    // --- Mailbox ---
    pub placement: [Option<Piece>; 64],

    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Occupancy composites.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Incremental hashing ---
    pub zobrist_key: u64,

    pub status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        let mut state = Self {
            placement: [None; 64],
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            status: GameStatus::default(),
        };
        state.zobrist_key = zobrist::compute_zobrist_key(&state);
        state
    }
}

impl GameState {
    /// Board with no pieces, white to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        match parse_fen(STARTING_POSITION_FEN) {
            Ok(state) => state,
            Err(err) => unreachable!("starting FEN must parse: {err}"),
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.placement[square as usize]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    /// Put `piece` on an empty square, updating mailbox, bitboards,
    /// composites and hash together.
    #[inline]
    pub fn put_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.placement[square as usize].is_none(), "square {square} occupied");
        let bit = square_bit(square);
        self.placement[square as usize] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy_by_color[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
        self.zobrist_key ^= piece_square_key(piece, square);
    }

    /// Remove and return whatever stands on `square`.
    #[inline]
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.placement[square as usize].take()?;
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= !bit;
        self.occupancy_by_color[piece.color.index()] &= !bit;
        self.occupancy_all &= !bit;
        self.zobrist_key ^= piece_square_key(piece, square);
        Some(piece)
    }

    #[inline]
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove_piece(from) {
            self.put_piece(piece, to);
        }
    }

    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.zobrist_key ^= zobrist::castling_key(self.castling_rights);
        self.castling_rights = rights & CASTLE_ALL;
        self.zobrist_key ^= zobrist::castling_key(self.castling_rights);
    }

    #[inline]
    pub fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.zobrist_key ^= zobrist::en_passant_key(self.en_passant_square);
        self.en_passant_square = square;
        self.zobrist_key ^= zobrist::en_passant_key(self.en_passant_square);
    }

    #[inline]
    pub fn set_side_to_move(&mut self, side: Color) {
        self.zobrist_key ^= zobrist::side_to_move_key(self.side_to_move);
        self.side_to_move = side;
        self.zobrist_key ^= zobrist::side_to_move_key(self.side_to_move);
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// Panics if mailbox, bitboards, composites or hash disagree. These are
    /// programmer errors; every downstream search result would be corrupt.
    pub fn assert_consistent(&self) {
        let mut by_color = [0u64; 2];
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let bb = self.pieces_of(color, kind);
                assert_eq!(by_color[color.index()] & bb, 0, "{color:?} bitboards overlap");
                by_color[color.index()] |= bb;
            }
        }
        assert_eq!(by_color, self.occupancy_by_color, "color composites out of sync");
        assert_eq!(by_color[0] & by_color[1], 0, "a square holds both colors");
        assert_eq!(by_color[0] | by_color[1], self.occupancy_all, "occupancy out of sync");

        for square in 0..64u8 {
            let bit = square_bit(square);
            match self.placement[square as usize] {
                Some(piece) => assert_ne!(
                    self.pieces_of(piece.color, piece.kind) & bit,
                    0,
                    "mailbox has {piece:?} on {square} but its bitboard does not"
                ),
                None => assert_eq!(self.occupancy_all & bit, 0, "bitboard set on empty square {square}"),
            }
        }

        assert_eq!(
            self.zobrist_key,
            zobrist::compute_zobrist_key(self),
            "incremental hash diverged from recomputation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_layout() {
        let game = GameState::new_game();
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(game.piece_at(4), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(game.piece_at(59), Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(game.piece_at(28), None);
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert_eq!(game.side_to_move, Color::White);
        assert!(!game.status.in_check);
        game.assert_consistent();
    }

    #[test]
    fn put_and_remove_keep_every_view_in_sync() {
        let mut game = GameState::new_empty();
        let empty_key = game.zobrist_key;
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        game.put_piece(knight, 36);
        game.assert_consistent();
        assert_eq!(game.pieces_of(Color::Black, PieceKind::Knight), 1u64 << 36);
        assert_eq!(game.occupancy(Color::Black), 1u64 << 36);

        assert_eq!(game.remove_piece(36), Some(knight));
        assert_eq!(game.remove_piece(36), None);
        game.assert_consistent();
        assert_eq!(game.zobrist_key, empty_key);
    }

    #[test]
    fn copies_are_independent() {
        let original = GameState::new_game();
        let mut copy = original;
        copy.move_piece(12, 28);
        assert_eq!(original.piece_at(12), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(copy.piece_at(12), None);
        assert_ne!(original.zobrist_key, copy.zobrist_key);
    }

    #[test]
    fn state_setters_update_hash_reversibly() {
        let mut game = GameState::new_game();
        let key = game.zobrist_key;
        game.set_castling_rights(CASTLE_WHITE_KINGSIDE);
        game.set_en_passant_square(Some(20));
        game.set_side_to_move(Color::Black);
        game.assert_consistent();
        game.set_castling_rights(CASTLE_ALL);
        game.set_en_passant_square(None);
        game.set_side_to_move(Color::White);
        assert_eq!(game.zobrist_key, key);
    }
}
