//! Crate root module declarations for the Plum Tactics chess engine.
//!
//! This file exposes the top-level subsystems (board state, bitboard move
//! primitives, legal move generation, search, and notation utilities) so the
//! binary, benchmarks, and external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bitboard_geometry;
    pub mod leaper_attacks;
    pub mod move_descriptions;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub use errors::{ChessError, ChessResult};
pub use game_state::chess_types::{Color, Piece, PieceKind, Square};
pub use game_state::game_state::{GameState, GameStatus};
pub use move_generation::legal_move_apply::{apply_move, apply_move_complete, play_move};
pub use move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
pub use move_generation::legal_move_generator::generate_legal_moves;
pub use moves::move_descriptions::ChessMove;
pub use search::board_scoring::evaluate;
pub use search::iterative_deepening::{find_best_move, SearchConfig, SearchResult, Searcher};
