//! Depth-limited alpha-beta search
//!
//! A [`Searcher`] owns its transposition table, so cache lifetime is the
//! searcher's lifetime and the [`TablePolicy`] decides what survives between
//! top-level calls.

mod alpha_beta;

use serde::Deserialize;

use crate::game::{Evaluator, Game};
use crate::tt::{TablePolicy, TranspositionTable};
use crate::types::{INFINITE, Score, Side};
use crate::zobrist::node_key;

/// Search settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to look ahead; `None` uses the game's default
    pub depth: Option<u32>,
    /// Transposition table lifetime
    pub table: TablePolicy,
}

impl SearchConfig {
    pub fn with_depth(depth: u32) -> Self {
        SearchConfig {
            depth: Some(depth),
            ..SearchConfig::default()
        }
    }

    /// Depth to search `G` at
    pub fn depth_for<G: Game>(&self) -> u32 {
        self.depth.unwrap_or(G::DEFAULT_DEPTH)
    }
}

/// Counters for one top-level search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, including terminal and horizon nodes
    pub nodes: u64,
    /// Nodes answered from the transposition table
    pub tt_hits: u64,
    /// Move loops stopped early by alpha >= beta
    pub cutoffs: u64,
    /// Forced passes searched through
    pub passes: u64,
}

/// Outcome of a top-level search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Move to play; `None` only when the side has no legal move
    pub best_move: Option<M>,
    /// Backed-up score from the searching side's perspective
    pub score: Score,
    pub stats: SearchStats,
}

/// Alpha-beta searcher for one game
pub struct Searcher<G: Game, E = <G as Game>::Eval> {
    tt: TranspositionTable<G::Move>,
    eval: E,
    config: SearchConfig,
    stats: SearchStats,
}

impl<G: Game> Default for Searcher<G> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<G: Game> Searcher<G> {
    /// Searcher with the game's default evaluator
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, G::Eval::default())
    }
}

impl<G: Game, E: Evaluator<G>> Searcher<G, E> {
    pub fn with_evaluator(config: SearchConfig, eval: E) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.table),
            eval,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Counters of the most recent search
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn tt(&self) -> &TranspositionTable<G::Move> {
        &self.tt
    }

    /// Search `pos` for `side` at the configured depth.
    pub fn think(&mut self, pos: &G, side: Side) -> SearchResult<G::Move> {
        let depth = self.config.depth_for::<G>();
        self.think_to(pos, side, depth)
    }

    /// Search `pos` for `side`, `depth` plies deep, with a full window.
    ///
    /// If the tree yields no move, the move cached for the root is used when
    /// it is still legal, then the first legal move.
    pub fn think_to(&mut self, pos: &G, side: Side, depth: u32) -> SearchResult<G::Move> {
        self.stats = SearchStats::default();
        self.tt.new_search();

        let mut root = pos.clone();
        let (score, searched) = self.search(&mut root, depth, -INFINITE, INFINITE, side, side);

        let legal = pos.legal_moves(side);
        let best_move = searched
            .or_else(|| {
                let key = node_key(pos.fingerprint(), side, side);
                self.tt
                    .probe(key)
                    .and_then(|entry| entry.best_move())
                    .filter(|mv| legal.contains(mv))
            })
            .or_else(|| legal.first().copied());

        match best_move {
            Some(mv) => log::debug!(
                "{} {} depth {}: {} score {} nodes {} tt_hits {} cutoffs {} tt_len {}",
                G::NAME,
                side,
                depth,
                mv,
                score,
                self.stats.nodes,
                self.stats.tt_hits,
                self.stats.cutoffs,
                self.tt.len()
            ),
            None => log::debug!("{} {} depth {}: no move", G::NAME, side, depth),
        }

        SearchResult {
            best_move,
            score,
            stats: self.stats,
        }
    }

    /// Move for `side` searched `depth` plies deep, `None` if there is none.
    pub fn best_move(&mut self, pos: &G, side: Side, depth: u32) -> Option<G::Move> {
        self.think_to(pos, side, depth).best_move
    }
}

/// Best move for `side` from a fresh searcher with the game's default evaluator.
pub fn best_move<G: Game>(pos: &G, side: Side, depth: u32) -> Option<G::Move> {
    Searcher::<G>::default().best_move(pos, side, depth)
}
