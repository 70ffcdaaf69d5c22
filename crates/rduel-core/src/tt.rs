//! Transposition table for caching search results
//!
//! Owned by one searcher; entries are keyed by the full node key
//! (see [`crate::zobrist::node_key`]) so a hit never aliases another node.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::Score;

/// Type of node in the search tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    /// Exact score (every child searched inside the window)
    Exact = 0,
    /// Lower bound (fail-high/cut node)
    LowerBound = 1,
    /// Upper bound (fail-low/all node)
    UpperBound = 2,
}

impl NodeType {
    /// Bound type of `score` returned from a window that opened at (`alpha`, `beta`).
    #[inline]
    pub fn classify(score: Score, alpha: Score, beta: Score) -> NodeType {
        if score <= alpha {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }
}

/// When cached entries are thrown away
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TablePolicy {
    /// Empty the table at the start of every top-level search
    #[default]
    ClearPerSearch,
    /// Keep entries across searches; at `capacity`, the shallowest entries go first
    Persist { capacity: usize },
}

/// Transposition table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry<M> {
    depth: u32,
    score: Score,
    node_type: NodeType,
    best_move: Option<M>,
}

impl<M: Copy> TTEntry<M> {
    pub fn new(depth: u32, score: Score, node_type: NodeType, best_move: Option<M>) -> Self {
        TTEntry {
            depth,
            score,
            node_type,
            best_move,
        }
    }

    /// Remaining depth the score was searched to
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    #[inline]
    pub fn best_move(&self) -> Option<M> {
        self.best_move
    }

    /// Score usable at a node searching `depth` with window (`alpha`, `beta`).
    ///
    /// Shallower entries never answer. Bounds answer only when they already
    /// decide the window.
    #[inline]
    pub fn cutoff(&self, depth: u32, alpha: Score, beta: Score) -> Option<Score> {
        if self.depth < depth {
            return None;
        }
        match self.node_type {
            NodeType::Exact => Some(self.score),
            NodeType::LowerBound if self.score >= beta => Some(self.score),
            NodeType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Map from node key to the last result stored for it
#[derive(Debug)]
pub struct TranspositionTable<M> {
    entries: HashMap<u64, TTEntry<M>>,
    policy: TablePolicy,
    /// Searches started since creation
    searches: u64,
}

impl<M: Copy> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(TablePolicy::default())
    }
}

impl<M: Copy> TranspositionTable<M> {
    pub fn new(policy: TablePolicy) -> Self {
        let entries = match policy {
            TablePolicy::Persist { capacity } => HashMap::with_capacity(capacity),
            TablePolicy::ClearPerSearch => HashMap::new(),
        };
        TranspositionTable {
            entries,
            policy,
            searches: 0,
        }
    }

    /// Entry stored under `key`, regardless of depth
    #[inline]
    pub fn probe(&self, key: u64) -> Option<&TTEntry<M>> {
        self.entries.get(&key)
    }

    /// Cached score for `key` if it was searched at least `required_depth` deep.
    pub fn lookup(&self, key: u64, required_depth: u32) -> Option<Score> {
        self.probe(key)
            .filter(|entry| entry.depth >= required_depth)
            .map(|entry| entry.score)
    }

    /// Store a result. An existing entry for `key` is overwritten whatever its depth.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        score: Score,
        node_type: NodeType,
        best_move: Option<M>,
    ) {
        let entry = TTEntry::new(depth, score, node_type, best_move);

        if let TablePolicy::Persist { capacity } = self.policy {
            if capacity == 0 {
                return;
            }
            if !self.entries.contains_key(&key) && self.entries.len() >= capacity {
                self.evict_shallowest();
            }
        }

        self.entries.insert(key, entry);
    }

    /// Drop every entry at the smallest stored depth.
    fn evict_shallowest(&mut self) {
        let Some(shallowest) = self.entries.values().map(|e| e.depth).min() else {
            return;
        };
        let before = self.entries.len();
        self.entries.retain(|_, e| e.depth > shallowest);
        log::trace!(
            "tt: evicted {} entries at depth {}",
            before - self.entries.len(),
            shallowest
        );
    }

    /// Clear the transposition table
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Start a top-level search, applying the table policy.
    pub fn new_search(&mut self) {
        self.searches += 1;
        match self.policy {
            TablePolicy::ClearPerSearch => self.clear(),
            TablePolicy::Persist { .. } => {
                log::trace!(
                    "tt: search {} reuses {} entries",
                    self.searches,
                    self.entries.len()
                );
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill rate in permille of the capacity; 0 for an unbounded table
    pub fn hashfull(&self) -> u16 {
        match self.policy {
            TablePolicy::Persist { capacity } if capacity > 0 => {
                ((self.entries.len() * 1000) / capacity) as u16
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(NodeType::classify(5, 10, 20), NodeType::UpperBound);
        assert_eq!(NodeType::classify(10, 10, 20), NodeType::UpperBound);
        assert_eq!(NodeType::classify(15, 10, 20), NodeType::Exact);
        assert_eq!(NodeType::classify(20, 10, 20), NodeType::LowerBound);
    }

    #[test]
    fn test_lookup_respects_depth() {
        let mut tt = TranspositionTable::<u8>::default();
        tt.store(0xABCD, 4, 77, NodeType::Exact, Some(3));

        assert_eq!(tt.lookup(0xABCD, 4), Some(77));
        assert_eq!(tt.lookup(0xABCD, 2), Some(77));
        assert_eq!(tt.lookup(0xABCD, 5), None);
        assert_eq!(tt.lookup(0x1234, 0), None);
        assert_eq!(tt.probe(0xABCD).unwrap().best_move(), Some(3));
    }

    #[test]
    fn test_store_last_write_wins() {
        let mut tt = TranspositionTable::<u8>::default();
        tt.store(1, 8, 100, NodeType::Exact, None);
        // shallower write still replaces
        tt.store(1, 2, -5, NodeType::UpperBound, None);

        let entry = tt.probe(1).unwrap();
        assert_eq!(entry.depth(), 2);
        assert_eq!(entry.score(), -5);
        assert_eq!(entry.node_type(), NodeType::UpperBound);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_cutoff_by_node_type() {
        let exact = TTEntry::<u8>::new(3, 50, NodeType::Exact, None);
        assert_eq!(exact.cutoff(3, 0, 10), Some(50));
        assert_eq!(exact.cutoff(4, 0, 10), None);

        let lower = TTEntry::<u8>::new(3, 50, NodeType::LowerBound, None);
        assert_eq!(lower.cutoff(2, 0, 40), Some(50));
        assert_eq!(lower.cutoff(2, 0, 60), None);

        let upper = TTEntry::<u8>::new(3, 50, NodeType::UpperBound, None);
        assert_eq!(upper.cutoff(2, 60, 100), Some(50));
        assert_eq!(upper.cutoff(2, 40, 100), None);
    }

    #[test]
    fn test_clear_per_search() {
        let mut tt = TranspositionTable::<u8>::new(TablePolicy::ClearPerSearch);
        tt.store(1, 1, 1, NodeType::Exact, None);
        assert!(!tt.is_empty());
        tt.new_search();
        assert!(tt.is_empty());
    }

    #[test]
    fn test_persist_evicts_shallowest() {
        let mut tt = TranspositionTable::<u8>::new(TablePolicy::Persist { capacity: 3 });
        tt.store(1, 5, 0, NodeType::Exact, None);
        tt.store(2, 1, 0, NodeType::Exact, None);
        tt.store(3, 3, 0, NodeType::Exact, None);
        tt.new_search();
        assert_eq!(tt.len(), 3);
        assert_eq!(tt.hashfull(), 1000);

        // overwriting an existing key needs no room
        tt.store(3, 4, 0, NodeType::Exact, None);
        assert_eq!(tt.len(), 3);

        tt.store(4, 2, 0, NodeType::Exact, None);
        assert_eq!(tt.len(), 3);
        assert!(tt.probe(2).is_none());
        assert!(tt.probe(1).is_some());
        assert!(tt.probe(4).is_some());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut tt = TranspositionTable::<u8>::new(TablePolicy::Persist { capacity: 0 });
        tt.store(1, 1, 1, NodeType::Exact, None);
        assert!(tt.is_empty());
        assert_eq!(tt.hashfull(), 0);
    }
}
