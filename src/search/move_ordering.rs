//! Move ordering for alpha-beta search.
//!
//! Priority, highest first: transposition-table move, queen promotions,
//! captures by MVV-LVA, killer moves for the ply, remaining quiet moves, and
//! finally under-promotions. Selection is lazy so a beta cutoff skips the
//! cost of ordering the moves that were never tried.

use crate::game_state::chess_types::PieceKind;
use crate::moves::move_descriptions::ChessMove;

pub const MAX_PLY: usize = 128;

const TT_MOVE_SCORE: i32 = 1_000_000;
const QUEEN_PROMOTION_SCORE: i32 = 900_000;
const CAPTURE_SCORE: i32 = 100_000;
const KILLER_SCORES: [i32; 2] = [90_000, 80_000];
const UNDERPROMOTION_SCORE: i32 = -100_000;

/// Per-ply store of two quiet moves that recently caused a beta cutoff.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: [[Option<ChessMove>; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self {
            slots: [[None; 2]; MAX_PLY],
        }
    }
}

impl KillerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }

    /// Remember a quiet cutoff move; captures and promotions are ignored.
    pub fn record(&mut self, ply: u8, mv: ChessMove) {
        if mv.is_tactical() {
            return;
        }
        let Some(slot) = self.slots.get_mut(ply as usize) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    #[inline]
    pub fn killers(&self, ply: u8) -> [Option<ChessMove>; 2] {
        self.slots.get(ply as usize).copied().unwrap_or([None; 2])
    }
}

/// Ordering weight of a piece as capture victim or attacker.
#[inline]
const fn order_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 20,
    }
}

/// Most valuable victim, least valuable attacker.
#[inline]
pub const fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    order_value(victim) * 100 - order_value(attacker)
}

pub fn score_move(mv: &ChessMove, tt_move: Option<&ChessMove>, killers: &[Option<ChessMove>; 2]) -> i32 {
    if tt_move.is_some_and(|tt| tt.same_action(mv)) {
        return TT_MOVE_SCORE;
    }

    let capture = mv.captured_piece.map_or(0, |victim| mvv_lva(victim, mv.moved_piece));
    match mv.promotion_piece {
        Some(PieceKind::Queen) => return QUEEN_PROMOTION_SCORE + capture,
        Some(_) => return UNDERPROMOTION_SCORE + capture,
        None => {}
    }
    if mv.is_capture() {
        return CAPTURE_SCORE + capture;
    }

    killers
        .iter()
        .zip(KILLER_SCORES)
        .find(|(killer, _)| killer.is_some_and(|k| k.same_action(mv)))
        .map_or(0, |(_, score)| score)
}

/// Lazily ordered iterator over a node's moves.
#[derive(Debug, Clone)]
pub struct MovePicker {
    moves: Vec<ChessMove>,
    scores: Vec<i32>,
    next: usize,
}

impl MovePicker {
    pub fn new(moves: Vec<ChessMove>, tt_move: Option<ChessMove>, killers: [Option<ChessMove>; 2]) -> Self {
        let scores = moves
            .iter()
            .map(|mv| score_move(mv, tt_move.as_ref(), &killers))
            .collect();
        Self {
            moves,
            scores,
            next: 0,
        }
    }

    /// Moves not yet handed out.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.next
    }
}

impl Iterator for MovePicker {
    type Item = ChessMove;

    fn next(&mut self) -> Option<ChessMove> {
        let start = self.next;
        if start >= self.moves.len() {
            return None;
        }

        // Selection step: first maximum wins ties, keeping generation order.
        let mut best = start;
        for i in start + 1..self.scores.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(start, best);
        self.scores.swap(start, best);
        self.next += 1;
        Some(self.moves[start])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn picked(fen: &str, tt: Option<&str>, killers: &[&str]) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let tt_move = tt.map(|text| parse_long_algebraic(&game, text).expect("legal"));
        let mut table = KillerTable::new();
        for text in killers.iter().rev() {
            table.record(3, parse_long_algebraic(&game, text).expect("legal"));
        }
        MovePicker::new(generate_legal_moves(&game), tt_move, table.killers(3))
            .map(|mv| mv.to_string())
            .collect()
    }

    #[test]
    fn mvv_lva_prefers_big_victims_and_small_attackers() {
        assert!(mvv_lva(PieceKind::Queen, PieceKind::Pawn) > mvv_lva(PieceKind::Queen, PieceKind::Rook));
        assert!(mvv_lva(PieceKind::Queen, PieceKind::Queen) > mvv_lva(PieceKind::Rook, PieceKind::Pawn));
        assert!(mvv_lva(PieceKind::Pawn, PieceKind::King) > 0);
    }

    #[test]
    fn orders_tt_move_then_captures_then_killers() {
        // White: pawn takes queen (d4xc5), rook takes queen (a5xc5), quiet moves.
        let fen = "4k3/8/8/R1q5/3P4/8/8/4K3 w - - 0 1";
        let order = picked(fen, Some("e1f1"), &["a5a6", "e1d2"]);
        assert_eq!(order[0], "e1f1");
        assert_eq!(order[1], "d4c5");
        assert_eq!(order[2], "a5c5");
        assert_eq!(order[3], "a5a6");
        assert_eq!(order[4], "e1d2");
    }

    #[test]
    fn queen_promotion_first_and_underpromotions_last() {
        let fen = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let order = picked(fen, None, &[]);
        assert_eq!(order[0], "a7b8q");
        assert_eq!(order[1], "a7a8q");
        let tail: Vec<&str> = order.iter().rev().take(6).map(String::as_str).collect();
        assert!(tail.iter().all(|mv| mv.ends_with('r') || mv.ends_with('b') || mv.ends_with('n')));
    }

    #[test]
    fn picker_yields_every_move_once() {
        let game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game);
        let mut picker = MovePicker::new(moves.clone(), None, [None; 2]);
        assert_eq!(picker.remaining(), 48);
        let mut seen: Vec<ChessMove> = picker.by_ref().collect();
        assert_eq!(picker.remaining(), 0);
        let mut expected = moves;
        seen.sort_by_key(|mv| (mv.from, mv.to, mv.promotion_piece.map(|p| p.index())));
        expected.sort_by_key(|mv| (mv.from, mv.to, mv.promotion_piece.map(|p| p.index())));
        assert_eq!(seen, expected);
    }

    #[test]
    fn killer_table_keeps_two_most_recent_quiets() {
        let mut table = KillerTable::new();
        let a = ChessMove::quiet(1, 18, PieceKind::Knight);
        let b = ChessMove::quiet(6, 21, PieceKind::Knight);
        let c = ChessMove::quiet(12, 20, PieceKind::Pawn);
        let capture = ChessMove::new(12, 21, PieceKind::Pawn, Some(PieceKind::Knight), None, 0);

        table.record(2, a);
        table.record(2, a);
        assert_eq!(table.killers(2), [Some(a), None]);
        table.record(2, b);
        table.record(2, c);
        table.record(2, capture);
        assert_eq!(table.killers(2), [Some(c), Some(b)]);
        assert_eq!(table.killers(200), [None, None]);

        table.clear();
        assert_eq!(table.killers(2), [None, None]);
    }
}
