//! Recursive minimax with alpha-beta pruning

use super::Searcher;
use crate::game::{Evaluator, Game};
use crate::movepick::MovePicker;
use crate::tt::NodeType;
use crate::types::{INFINITE, Score, Side};
use crate::zobrist::node_key;

impl<G: Game, E: Evaluator<G>> Searcher<G, E> {
    /// Minimax value of `pos` for `maximizing`, `depth` plies deep, with
    /// `to_move` on move.
    ///
    /// Fail-soft: a result at or below `alpha` is an upper bound, at or above
    /// `beta` a lower bound. Every move tried on `pos` is taken back before
    /// returning. The move is `None` at terminal, horizon, cached and pass nodes.
    pub fn search(
        &mut self,
        pos: &mut G,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: Side,
        to_move: Side,
    ) -> (Score, Option<G::Move>) {
        self.stats.nodes += 1;

        // Terminal scores are cheap and depth-independent, never cached
        if let Some(value) = pos.terminal_value(maximizing) {
            return (value, None);
        }

        if depth == 0 {
            return (self.eval.evaluate(pos, maximizing), None);
        }

        let key = node_key(pos.fingerprint(), to_move, maximizing);
        if let Some(score) = self
            .tt
            .probe(key)
            .and_then(|entry| entry.cutoff(depth, alpha, beta))
        {
            self.stats.tt_hits += 1;
            return (score, None);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);

        let moves = pos.legal_moves(to_move);
        if moves.is_empty() {
            // Forced pass: same position, opponent on move, one ply used
            self.stats.passes += 1;
            let (score, _) = self.search(pos, depth - 1, alpha, beta, maximizing, !to_move);
            let node_type = NodeType::classify(score, alpha_orig, beta_orig);
            self.tt.store(key, depth, score, node_type, None);
            return (score, None);
        }

        let picker = MovePicker::new(pos, to_move, &moves, &self.eval);
        let maximizing_node = to_move == maximizing;
        let mut best_score = if maximizing_node { -INFINITE } else { INFINITE };
        let mut best_move = None;

        for mv in picker {
            let (score, _) = {
                let mut child = pos.scoped(mv, to_move);
                self.search(&mut child, depth - 1, alpha, beta, maximizing, !to_move)
            };

            if maximizing_node {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let node_type = NodeType::classify(best_score, alpha_orig, beta_orig);
        self.tt.store(key, depth, best_score, node_type, best_move);

        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::Connect4;
    use crate::search::SearchConfig;
    use crate::tt::TablePolicy;

    /// Unpruned minimax over the same tree, no cache, no ordering.
    fn minimax<G: Game>(pos: &mut G, depth: u32, maximizing: Side, to_move: Side) -> Score {
        if let Some(value) = pos.terminal_value(maximizing) {
            return value;
        }
        if depth == 0 {
            return G::Eval::default().evaluate(pos, maximizing);
        }
        let moves = pos.legal_moves(to_move);
        if moves.is_empty() {
            return minimax(pos, depth - 1, maximizing, !to_move);
        }
        let scores = moves.iter().map(|&mv| {
            let mut child = pos.scoped(mv, to_move);
            minimax(&mut *child, depth - 1, maximizing, !to_move)
        });
        if to_move == maximizing {
            scores.max().unwrap_or(-INFINITE)
        } else {
            scores.min().unwrap_or(INFINITE)
        }
    }

    #[test]
    fn test_matches_minimax_from_empty_grid() {
        let mut pos = Connect4::new();
        for depth in 1..=3 {
            let mut searcher = Searcher::<Connect4>::default();
            let (score, mv) =
                searcher.search(&mut pos, depth, -INFINITE, INFINITE, Side::Black, Side::Black);
            assert_eq!(score, minimax(&mut pos, depth, Side::Black, Side::Black));
            assert!(mv.is_some());
        }
    }

    #[test]
    fn test_narrow_window_bounds() {
        let mut pos = Connect4::new();
        let exact = minimax(&mut pos, 2, Side::Black, Side::Black);
        let mut searcher = Searcher::<Connect4>::new(SearchConfig {
            depth: None,
            table: TablePolicy::ClearPerSearch,
        });

        // window entirely below the value: fail high
        let (high, _) = searcher.search(&mut pos, 2, exact - 100, exact - 50, Side::Black, Side::Black);
        assert!(high >= exact - 50);
        assert!(high <= exact);

        // window entirely above the value: fail low
        searcher.tt.clear();
        let (low, _) = searcher.search(&mut pos, 2, exact + 50, exact + 100, Side::Black, Side::Black);
        assert!(low <= exact + 50);
        assert!(low >= exact);
    }
}
