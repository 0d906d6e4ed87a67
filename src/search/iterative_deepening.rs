//! Iterative deepening search with principal-variation negamax.
//!
//! Each iteration runs a full alpha-beta pass at the next depth, seeding move
//! ordering with the previous best move and the transposition table. From the
//! second iteration on, the root window is narrowed around the previous score
//! and widened on failure. Leaves resolve captures through quiescence search,
//! and checks extend the depth by one ply. The total distance from the root is
//! capped at `base_depth + extended_depth`, which bounds recursion.

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_legal_tactical_moves, has_legal_moves,
};
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::{
    is_insufficient_material, is_mate_score, terminal_score, BoardScorer, PieceSquareScorer,
    DRAW_SCORE, MATE_SCORE,
};
use crate::search::move_ordering::{KillerTable, MovePicker, MAX_PLY};
use crate::search::transposition_table::{Bound, TTStats, TranspositionTable};

pub const DEFAULT_TT_SIZE_BYTES: usize = 16 * 1024 * 1024;

const INFINITY: i32 = MATE_SCORE + 1;
const ASPIRATION_WINDOW: i32 = 50;
/// Past this half-width the aspiration loop falls back to a full window.
const ASPIRATION_MAX_DELTA: i32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_depth: u8,
    /// Extra plies check extensions and quiescence may reach past `base_depth`.
    pub extended_depth: u8,
    /// Requested table size. `Searcher::search` rebuilds its table when this
    /// differs from the size it was built with.
    pub tt_size_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_depth: 4,
            extended_depth: 4,
            tt_size_bytes: DEFAULT_TT_SIZE_BYTES,
        }
    }
}

impl SearchConfig {
    /// Configuration for a playing level (0-5, higher is stronger).
    pub fn for_level(level: u8) -> Self {
        let (base_depth, extended_depth) = level_to_depth(level);
        Self {
            base_depth,
            extended_depth,
            ..Self::default()
        }
    }
}

/// Map a playing level to `(base_depth, extended_depth)`: level 1 searches
/// depth 1-2, level 5 depth 5-7. Levels above 5 clamp to 5.
pub fn level_to_depth(level: u8) -> (u8, u8) {
    match level {
        0 => (1, 0),
        level => {
            let base = level.min(5);
            (base, ((base + 1) / 2).min(2))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: ChessMove,
    /// Score for the side to move at the root.
    pub score: i32,
    pub nodes_searched: u64,
    pub reached_depth: u8,
    pub tt_stats: TTStats,
}

/// Owns the per-search state: transposition table, killer moves and scorer.
/// Reusing one `Searcher` across calls keeps the table warm; each call starts
/// a new table generation.
pub struct Searcher<S: BoardScorer = PieceSquareScorer> {
    tt: TranspositionTable,
    tt_size_bytes: usize,
    killers: KillerTable,
    scorer: S,
    nodes: u64,
    max_ply: u8,
}

impl Searcher<PieceSquareScorer> {
    pub fn new(tt_size_bytes: usize) -> Self {
        Self::with_scorer(tt_size_bytes, PieceSquareScorer)
    }
}

impl<S: BoardScorer> Searcher<S> {
    pub fn with_scorer(tt_size_bytes: usize, scorer: S) -> Self {
        Self {
            tt: TranspositionTable::new(tt_size_bytes),
            tt_size_bytes,
            killers: KillerTable::new(),
            scorer,
            nodes: 0,
            max_ply: 0,
        }
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Search with `config`. A different `tt_size_bytes` replaces the table,
    /// dropping its contents.
    pub fn search(&mut self, game_state: &GameState, config: &SearchConfig) -> Option<SearchResult> {
        if config.tt_size_bytes != self.tt_size_bytes {
            self.tt = TranspositionTable::new(config.tt_size_bytes);
            self.tt_size_bytes = config.tt_size_bytes;
        }
        self.find_best_move(game_state, config.base_depth, config.extended_depth)
    }

    /// Best move for the side to move, or `None` when there is no legal move.
    pub fn find_best_move(
        &mut self,
        game_state: &GameState,
        base_depth: u8,
        extended_depth: u8,
    ) -> Option<SearchResult> {
        let root_moves = generate_legal_moves(game_state);
        let first_move = *root_moves.first()?;

        let base_depth = base_depth.clamp(1, (MAX_PLY - 1) as u8);
        let max_ply = usize::from(base_depth) + usize::from(extended_depth);
        self.max_ply = max_ply.min(MAX_PLY - 1) as u8;
        self.tt.new_search();
        self.killers.clear();
        self.nodes = 0;

        let mut result = SearchResult {
            best_move: first_move,
            score: 0,
            nodes_searched: 0,
            reached_depth: 0,
            tt_stats: TTStats::default(),
        };

        for depth in 1..=base_depth {
            let (score, best_move) = if depth > 1 && !is_mate_score(result.score) {
                self.aspiration_search(game_state, &root_moves, depth, result.score, result.best_move)
            } else {
                self.search_root(game_state, &root_moves, depth, -INFINITY, INFINITY, result.best_move)
            };

            result.best_move = best_move;
            result.score = score;
            result.reached_depth = depth;
            log::debug!(
                "depth {depth} score {score} nodes {} best {best_move}",
                self.nodes
            );
        }

        result.nodes_searched = self.nodes;
        result.tt_stats = self.tt.stats();
        Some(result)
    }

    fn aspiration_search(
        &mut self,
        game_state: &GameState,
        root_moves: &[ChessMove],
        depth: u8,
        previous: i32,
        hint: ChessMove,
    ) -> (i32, ChessMove) {
        let mut delta_low = ASPIRATION_WINDOW;
        let mut delta_high = ASPIRATION_WINDOW;
        loop {
            let alpha = if delta_low > ASPIRATION_MAX_DELTA { -INFINITY } else { previous - delta_low };
            let beta = if delta_high > ASPIRATION_MAX_DELTA { INFINITY } else { previous + delta_high };
            let (score, best_move) = self.search_root(game_state, root_moves, depth, alpha, beta, hint);

            if score <= alpha && alpha > -INFINITY {
                log::trace!("depth {depth}: fail low {score} <= {alpha}, widening");
                delta_low *= 4;
            } else if score >= beta && beta < INFINITY {
                log::trace!("depth {depth}: fail high {score} >= {beta}, widening");
                delta_high *= 4;
            } else {
                return (score, best_move);
            }
        }
    }

    fn search_root(
        &mut self,
        game_state: &GameState,
        root_moves: &[ChessMove],
        depth: u8,
        mut alpha: i32,
        beta: i32,
        hint: ChessMove,
    ) -> (i32, ChessMove) {
        self.nodes += 1;
        let alpha_orig = alpha;
        let tt_move = self.tt.probe(game_state.zobrist_key, depth, alpha, beta, 0).best_move();
        let picker = MovePicker::new(root_moves.to_vec(), tt_move.or(Some(hint)), self.killers.killers(0));

        let mut best_score = -INFINITY;
        let mut best_move = hint;
        for (i, mv) in picker.enumerate() {
            let child = apply_move(game_state, mv);
            let score = self.principal_variation_child(&child, depth - 1, alpha, beta, 1, i == 0);
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = bound_for(best_score, alpha_orig, beta);
        self.tt.store(game_state.zobrist_key, depth, best_score, bound, Some(best_move), 0);
        (best_score, best_move)
    }

    /// Search one child: full window for the first move, null window with a
    /// full re-search on surprise for the rest. Returns the score from the
    /// parent's point of view.
    #[inline]
    fn principal_variation_child(
        &mut self,
        child: &GameState,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: u8,
        first: bool,
    ) -> i32 {
        if first {
            return -self.negamax(child, depth, -beta, -alpha, ply);
        }
        let score = -self.negamax(child, depth, -alpha - 1, -alpha, ply);
        if score > alpha && score < beta {
            -self.negamax(child, depth, -beta, -alpha, ply)
        } else {
            score
        }
    }

    fn negamax(&mut self, game_state: &GameState, depth: u8, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        if let Some(score) = adjudicated_score(game_state, ply) {
            self.nodes += 1;
            return score;
        }

        let in_check = game_state.status.in_check;
        let depth = if in_check { depth.saturating_add(1) } else { depth };
        if depth == 0 || ply >= self.max_ply {
            return self.quiescence(game_state, alpha, beta, ply, 0);
        }
        self.nodes += 1;

        let key = game_state.zobrist_key;
        let probe = self.tt.probe(key, depth, alpha, beta, ply);
        if let Some(score) = probe.cutoff_score {
            return score;
        }

        let moves = generate_legal_moves(game_state);
        if moves.is_empty() {
            let score = terminal_score(in_check, ply);
            self.tt.store(key, depth, score, Bound::Exact, None, ply);
            return score;
        }

        let alpha_orig = alpha;
        let picker = MovePicker::new(moves, probe.best_move(), self.killers.killers(ply));
        let mut best_score = -INFINITY;
        let mut best_move = None;
        for (i, mv) in picker.enumerate() {
            let child = apply_move(game_state, mv);
            let score = self.principal_variation_child(&child, depth - 1, alpha, beta, ply + 1, i == 0);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.killers.record(ply, mv);
                break;
            }
        }

        let bound = bound_for(best_score, alpha_orig, beta);
        self.tt.store(key, depth, best_score, bound, best_move, ply);
        best_score
    }

    /// Captures and promotions until the position is quiet. The first
    /// quiescence ply also tries quiet checks, and a side in check searches
    /// every evasion.
    fn quiescence(&mut self, game_state: &GameState, mut alpha: i32, beta: i32, ply: u8, qply: u8) -> i32 {
        self.nodes += 1;
        if let Some(score) = adjudicated_score(game_state, ply) {
            return score;
        }

        let in_check = game_state.status.in_check;
        if ply >= self.max_ply {
            return self.horizon_score(game_state, in_check, ply);
        }

        let key = game_state.zobrist_key;
        let probe = self.tt.probe(key, 0, alpha, beta, ply);
        if let Some(score) = probe.cutoff_score {
            return score;
        }

        let alpha_orig = alpha;
        let mut best_score = -INFINITY;
        let moves = if in_check {
            let evasions = generate_legal_moves(game_state);
            if evasions.is_empty() {
                let score = terminal_score(true, ply);
                self.tt.store(key, 0, score, Bound::Exact, None, ply);
                return score;
            }
            evasions
        } else {
            let (can_move, moves) = if qply == 0 {
                let all = generate_legal_moves(game_state);
                (!all.is_empty(), tactical_and_checking_moves(game_state, all))
            } else {
                let tactical = generate_legal_tactical_moves(game_state);
                (!tactical.is_empty() || has_legal_moves(game_state), tactical)
            };
            if !can_move {
                self.tt.store(key, 0, DRAW_SCORE, Bound::Exact, None, ply);
                return DRAW_SCORE;
            }

            let stand_pat = self.scorer.score(game_state);
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
            best_score = stand_pat;
            moves
        };

        let mut best_move = None;
        for mv in MovePicker::new(moves, probe.best_move(), [None; 2]) {
            let child = apply_move(game_state, mv);
            let score = -self.quiescence(&child, -beta, -alpha, ply + 1, qply.saturating_add(1));
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = bound_for(best_score, alpha_orig, beta);
        self.tt.store(key, 0, best_score, bound, best_move, ply);
        best_score
    }

    fn horizon_score(&self, game_state: &GameState, in_check: bool, ply: u8) -> i32 {
        if has_legal_moves(game_state) {
            self.scorer.score(game_state)
        } else {
            terminal_score(in_check, ply)
        }
    }
}

/// Search `game_state` with a fresh table of `tt_size_bytes`.
pub fn find_best_move(
    game_state: &GameState,
    base_depth: u8,
    extended_depth: u8,
    tt_size_bytes: usize,
) -> Option<SearchResult> {
    Searcher::new(tt_size_bytes).find_best_move(game_state, base_depth, extended_depth)
}

#[inline]
fn bound_for(score: i32, alpha_orig: i32, beta: i32) -> Bound {
    if score <= alpha_orig {
        Bound::Upper
    } else if score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    }
}

/// Score fixed by the draw rules: bare material, or the fifty-move rule
/// unless the side to move is already checkmated.
fn adjudicated_score(game_state: &GameState, ply: u8) -> Option<i32> {
    if is_insufficient_material(game_state) {
        return Some(DRAW_SCORE);
    }
    if game_state.halfmove_clock < FIFTY_MOVE_HALFMOVES {
        return None;
    }
    if game_state.status.in_check && !has_legal_moves(game_state) {
        Some(terminal_score(true, ply))
    } else {
        Some(DRAW_SCORE)
    }
}

fn tactical_and_checking_moves(game_state: &GameState, moves: Vec<ChessMove>) -> Vec<ChessMove> {
    moves
        .into_iter()
        .filter(|&mv| mv.is_tactical() || apply_move(game_state, mv).status.in_check)
        .collect()
}
