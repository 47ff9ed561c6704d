// src/game/search/tt.rs

use std::collections::HashMap;

use crate::game::rules::{Move, PositionKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Returns the stored score if it settles a query at `depth` within
    /// the `(alpha, beta)` window.
    pub fn resolve(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Position cache that is wiped entirely once it fills up, so a stale
/// shallow entry can never outlive the clear.
pub struct TranspositionTable {
    table: HashMap<PositionKey, TTEntry>,
    capacity: usize,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            table: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn probe(&self, key: PositionKey) -> Option<&TTEntry> {
        self.table.get(&key)
    }

    pub fn store(&mut self, key: PositionKey, depth: i32, score: i32, bound: Bound, best_move: Option<Move>) {
        if self.table.len() >= self.capacity {
            self.table.clear();
        }
        self.table.insert(key, TTEntry { depth, score, bound, best_move });
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entry_returns_stored_score() {
        let mut tt = TranspositionTable::new(16);
        tt.store(42, 3, 125, Bound::Exact, None);
        let entry = tt.probe(42).unwrap();
        assert_eq!(entry.resolve(3, -1000, 1000), Some(125));
        assert_eq!(entry.resolve(1, 200, 300), Some(125));
    }

    #[test]
    fn test_shallow_entry_never_resolves_deeper_query() {
        let mut tt = TranspositionTable::new(16);
        tt.store(7, 2, 50, Bound::Exact, None);
        assert_eq!(tt.probe(7).unwrap().resolve(3, -1000, 1000), None);
    }

    #[test]
    fn test_lower_bound_needs_beta_cutoff() {
        let entry = TTEntry { depth: 4, score: 80, bound: Bound::Lower, best_move: None };
        assert_eq!(entry.resolve(4, 0, 60), Some(80));
        assert_eq!(entry.resolve(4, 0, 100), None);
    }

    #[test]
    fn test_upper_bound_needs_alpha_fail() {
        let entry = TTEntry { depth: 4, score: -30, bound: Bound::Upper, best_move: None };
        assert_eq!(entry.resolve(4, -10, 100), Some(-30));
        assert_eq!(entry.resolve(4, -50, 100), None);
    }

    #[test]
    fn test_store_overwrites_regardless_of_depth() {
        let mut tt = TranspositionTable::new(16);
        tt.store(1, 6, 10, Bound::Exact, None);
        tt.store(1, 2, 20, Bound::Upper, None);
        let entry = tt.probe(1).unwrap();
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.score, 20);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_full_table_is_cleared_before_insert() {
        let mut tt = TranspositionTable::new(3);
        for key in 0..3 {
            tt.store(key, 1, 0, Bound::Exact, None);
        }
        assert_eq!(tt.len(), 3);
        tt.store(99, 1, 5, Bound::Exact, None);
        assert_eq!(tt.len(), 1);
        assert!(tt.probe(0).is_none());
        assert!(tt.probe(99).is_some());
    }
}
