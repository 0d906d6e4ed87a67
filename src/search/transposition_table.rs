//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct indexing into a power-of-two slot array. A slot is overwritten when
//! it is empty, holds a result from an earlier search generation, or holds a
//! search no deeper than the new one, so a deep current result is never
//! evicted by a shallow one. Mate scores are stored relative to the node,
//! not the root.

use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::MATE_THRESHOLD;

pub const MAX_TT_SIZE_MB: usize = 4096;

/// Byte size for a table of `size_mb` MiB, clamped to `1..=MAX_TT_SIZE_MB`.
#[inline]
pub fn tt_bytes_for_mb(size_mb: usize) -> usize {
    size_mb.clamp(1, MAX_TT_SIZE_MB).saturating_mul(1024 * 1024)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
    pub generation: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub cutoffs: u64,
    pub stores: u64,
}

/// Result of a probe: a score usable for an immediate cutoff (already
/// converted back to root-relative mate distance), and the raw entry for
/// move ordering whenever the slot holds this position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTProbe {
    pub cutoff_score: Option<i32>,
    pub entry: Option<TTEntry>,
}

impl TTProbe {
    #[inline]
    pub fn best_move(&self) -> Option<ChessMove> {
        self.entry.and_then(|e| e.best_move)
    }
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
    current_generation: u8,
    stats: TTStats,
}

impl TranspositionTable {
    /// Largest power-of-two slot count that fits in `size_bytes` (at least one).
    pub fn new(size_bytes: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let fit = (size_bytes / entry_size).max(1);
        let count = if fit.is_power_of_two() {
            fit
        } else {
            fit.next_power_of_two() >> 1
        };
        log::debug!(
            "transposition table: {count} slots of {entry_size} bytes ({} bytes requested)",
            size_bytes
        );
        Self {
            entries: vec![None; count],
            mask: count - 1,
            current_generation: 0,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn new_with_mb(size_mb: usize) -> Self {
        Self::new(tt_bytes_for_mb(size_mb))
    }

    /// Advance the generation; entries from older generations become
    /// replaceable regardless of depth.
    #[inline]
    pub fn new_search(&mut self) {
        self.current_generation = self.current_generation.wrapping_add(1);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.current_generation = 0;
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u8 {
        self.current_generation
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Raw slot contents for `key`, without touching statistics.
    #[inline]
    pub fn entry(&self, key: u64) -> Option<TTEntry> {
        self.entries[self.idx(key)].filter(|e| e.key == key)
    }

    /// Look up `key` for a node searched to `depth` at `ply` from the root,
    /// inside the window `(alpha, beta)`.
    pub fn probe(&mut self, key: u64, depth: u8, alpha: i32, beta: i32, ply: u8) -> TTProbe {
        self.stats.probes += 1;
        let Some(entry) = self.entry(key) else {
            return TTProbe::default();
        };
        self.stats.hits += 1;

        let mut probe = TTProbe {
            cutoff_score: None,
            entry: Some(entry),
        };
        if entry.depth < depth {
            return probe;
        }

        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        if usable {
            self.stats.cutoffs += 1;
            probe.cutoff_score = Some(score);
        }
        probe
    }

    /// Record a search result. `score` is root-relative and is normalized to
    /// the node before storing.
    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        score: i32,
        bound: Bound,
        best_move: Option<ChessMove>,
        ply: u8,
    ) {
        let idx = self.idx(key);
        let replace = match self.entries[idx] {
            None => true,
            Some(existing) => {
                existing.generation != self.current_generation || depth >= existing.depth
            }
        };
        if !replace {
            return;
        }

        // Keep a known best move when re-storing the same position without one.
        let best_move = best_move.or_else(|| {
            self.entries[idx]
                .filter(|e| e.key == key)
                .and_then(|e| e.best_move)
        });
        self.stats.stores += 1;
        self.entries[idx] = Some(TTEntry {
            key,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move,
            generation: self.current_generation,
        });
    }
}

/// Convert a root-relative mate score into "mate in N from this node".
#[inline]
pub fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

/// Inverse of `score_to_tt` for a node `ply` plies from the current root.
#[inline]
pub fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;
    use crate::search::board_scoring::MATE_SCORE;

    fn small_table() -> TranspositionTable {
        TranspositionTable::new(64 * 1024)
    }

    #[test]
    fn capacity_is_a_power_of_two() {
        for bytes in [1, 1000, 64 * 1024, 3 * 1024 * 1024] {
            let tt = TranspositionTable::new(bytes);
            assert!(tt.len().is_power_of_two());
            assert!(tt.len() == 1 || tt.len() * std::mem::size_of::<Option<TTEntry>>() <= bytes);
        }
    }

    #[test]
    fn megabyte_sizes_are_clamped() {
        assert_eq!(tt_bytes_for_mb(0), 1024 * 1024);
        assert_eq!(tt_bytes_for_mb(16), 16 * 1024 * 1024);
        assert_eq!(tt_bytes_for_mb(usize::MAX), MAX_TT_SIZE_MB * 1024 * 1024);
        assert_eq!(TranspositionTable::new_with_mb(0).len(), TranspositionTable::new(1024 * 1024).len());
    }

    #[test]
    fn exact_entry_hits_at_equal_or_shallower_depth() {
        let mut tt = small_table();
        let mv = ChessMove::quiet(12, 28, PieceKind::Pawn);
        tt.store(123, 5, 42, Bound::Exact, Some(mv), 0);

        for depth in [5, 3, 0] {
            let probe = tt.probe(123, depth, -100, 100, 0);
            assert_eq!(probe.cutoff_score, Some(42));
            let entry = probe.entry.expect("entry should exist");
            assert_eq!(entry.bound, Bound::Exact);
            assert_eq!(entry.best_move, Some(mv));
        }
    }

    #[test]
    fn deeper_probe_misses_but_keeps_move_hint() {
        let mut tt = small_table();
        let mv = ChessMove::quiet(6, 21, PieceKind::Knight);
        tt.store(77, 2, 10, Bound::Exact, Some(mv), 0);

        let probe = tt.probe(77, 3, -100, 100, 0);
        assert_eq!(probe.cutoff_score, None);
        assert_eq!(probe.best_move(), Some(mv));

        let miss = tt.probe(78, 0, -100, 100, 0);
        assert_eq!(miss, TTProbe::default());
        assert_eq!(tt.stats().probes, 2);
        assert_eq!(tt.stats().hits, 1);
    }

    #[test]
    fn bounds_only_cut_outside_the_window() {
        let mut tt = small_table();
        tt.store(1, 4, 50, Bound::Lower, None, 0);
        assert_eq!(tt.probe(1, 4, -10, 40, 0).cutoff_score, Some(50));
        assert_eq!(tt.probe(1, 4, -10, 60, 0).cutoff_score, None);

        tt.store(2, 4, -50, Bound::Upper, None, 0);
        assert_eq!(tt.probe(2, 4, -40, 10, 0).cutoff_score, Some(-50));
        assert_eq!(tt.probe(2, 4, -60, 10, 0).cutoff_score, None);
    }

    #[test]
    fn shallow_result_does_not_evict_deep_current_entry() {
        let mut tt = TranspositionTable::new(std::mem::size_of::<Option<TTEntry>>());
        assert_eq!(tt.len(), 1);
        tt.store(10, 6, 1, Bound::Exact, None, 0);
        tt.store(11, 2, 2, Bound::Exact, None, 0);
        assert_eq!(tt.entry(10).map(|e| e.depth), Some(6));
        assert_eq!(tt.entry(11), None);

        // The same position refreshes its slot only with an equal or deeper result.
        tt.store(10, 1, 3, Bound::Upper, None, 0);
        assert_eq!(tt.entry(10).map(|e| e.score), Some(1));
        tt.store(10, 6, 4, Bound::Lower, None, 0);
        assert_eq!(tt.entry(10).map(|e| (e.score, e.bound)), Some((4, Bound::Lower)));
    }

    #[test]
    fn stale_entries_are_replaced() {
        let mut tt = TranspositionTable::new(std::mem::size_of::<Option<TTEntry>>());
        tt.store(10, 8, 1, Bound::Exact, None, 0);
        tt.new_search();
        tt.store(11, 1, 2, Bound::Exact, None, 0);
        let entry = tt.entry(11).expect("stale slot should be replaced");
        assert_eq!(entry.generation, tt.generation());
    }

    #[test]
    fn mate_scores_are_stored_relative_to_the_node() {
        let mut tt = small_table();
        // Mate found 3 plies below a node that sits at ply 4.
        let root_relative = MATE_SCORE - 7;
        tt.store(99, 3, root_relative, Bound::Exact, None, 4);
        assert_eq!(tt.entry(99).map(|e| e.score), Some(MATE_SCORE - 3));
        // Reached again at ply 2 of a later search: mate is 5 plies away.
        assert_eq!(tt.probe(99, 3, -100, 100, 2).cutoff_score, Some(MATE_SCORE - 5));

        assert_eq!(score_from_tt(score_to_tt(-MATE_SCORE + 9, 6), 6), -MATE_SCORE + 9);
        assert_eq!(score_to_tt(120, 9), 120);
    }
}
