//! Perft: exhaustive legal-move tree counts.
//!
//! Leaf statistics (captures, en passant, castles, promotions, checks and
//! checkmates) are gathered at the final ply so results can be compared with
//! published reference tables.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_moves};
use crate::moves::move_descriptions::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn leaf(mv: ChessMove, next: &GameState) -> Self {
        let gives_check = is_king_in_check(next);
        Self {
            nodes: 1,
            captures: u64::from(mv.is_capture()),
            en_passant: u64::from(mv.is_en_passant()),
            castles: u64::from(mv.is_castling()),
            promotions: u64::from(mv.is_promotion()),
            checks: u64::from(gives_check),
            checkmates: u64::from(gives_check && !has_legal_moves(next)),
        }
    }
}

/// Count leaf nodes and leaf statistics `depth` plies below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        let next = apply_move(game_state, mv);
        if depth == 1 {
            total.merge(PerftCounts::leaf(mv, &next));
        } else {
            total.merge(perft(&next, depth - 1));
        }
    }
    total
}

/// Node count only; skips the per-leaf statistics.
pub fn perft_nodes(game_state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft_nodes(&apply_move(game_state, mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Vec<(ChessMove, u64)> {
    generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let nodes = perft_nodes(&apply_move(game_state, mv), depth.saturating_sub(1));
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn start_position_reference_counts() {
        let start = GameState::new_game();
        assert_eq!(perft_nodes(&start, 1), 20);
        assert_eq!(perft_nodes(&start, 2), 400);
        let depth3 = perft(&start, 3);
        assert_eq!(depth3.nodes, 8902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
        assert_eq!(depth3.checkmates, 0);
    }

    #[test]
    fn kiwipete_reference_counts() {
        let kiwipete = game(KIWIPETE);
        let depth1 = perft(&kiwipete, 1);
        assert_eq!(depth1.nodes, 48);
        assert_eq!(depth1.captures, 8);
        assert_eq!(depth1.castles, 2);

        let depth2 = perft(&kiwipete, 2);
        assert_eq!(depth2.nodes, 2039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn endgame_position_reference_counts() {
        let position = game(POSITION_3);
        assert_eq!(perft_nodes(&position, 1), 14);
        assert_eq!(perft_nodes(&position, 2), 191);
        let depth3 = perft(&position, 3);
        assert_eq!(depth3.nodes, 2812);
        assert_eq!(depth3.captures, 209);
        assert_eq!(depth3.en_passant, 2);
        assert_eq!(depth3.checks, 267);
    }

    #[test]
    fn promotion_heavy_reference_counts() {
        let position = game(POSITION_4);
        assert_eq!(perft_nodes(&position, 1), 6);
        assert_eq!(perft_nodes(&position, 2), 264);
        assert_eq!(perft_nodes(&position, 3), 9467);

        let position = game(POSITION_5);
        assert_eq!(perft_nodes(&position, 1), 44);
        assert_eq!(perft_nodes(&position, 2), 1486);
    }

    #[test]
    fn divide_sums_to_total() {
        let start = GameState::new_game();
        let divided = perft_divide(&start, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
