//! Move ordering for alpha-beta
//!
//! Moves are tried in order of:
//! 1. Tactical tier (immediate win, then block/corner)
//! 2. One-ply static evaluation from the mover's side, best first
//! 3. Fixed per-game rank (center-out columns, square index)
//!
//! The sort is stable, so equal keys keep generation order.

use smallvec::SmallVec;

use crate::game::{Evaluator, Game};
use crate::types::{MoveList, Score, Side};

/// Scored move for ordering
#[derive(Clone, Copy, Debug)]
struct ScoredMove<M> {
    mv: M,
    tier: u8,
    eval: Score,
    rank: u8,
}

/// Ordered moves of one node, handed out best first
pub struct MovePicker<M> {
    moves: SmallVec<[ScoredMove<M>; 32]>,
    current: usize,
}

impl<M: Copy> MovePicker<M> {
    /// Score every move in `moves` for `side` and sort them.
    ///
    /// Each candidate is tried on `pos` and taken back before the next one,
    /// so `pos` is unchanged on return.
    pub fn new<G, E>(pos: &mut G, side: Side, moves: &[M], eval: &E) -> Self
    where
        G: Game<Move = M>,
        E: Evaluator<G>,
    {
        let mut scored: SmallVec<[ScoredMove<M>; 32]> = moves
            .iter()
            .map(|&mv| {
                let tier = pos.tactical_tier(mv, side);
                let one_ply = {
                    let after = pos.scoped(mv, side);
                    eval.evaluate(&after, side)
                };
                ScoredMove {
                    mv,
                    tier,
                    eval: one_ply,
                    rank: G::static_rank(mv),
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.tier
                .cmp(&a.tier)
                .then(b.eval.cmp(&a.eval))
                .then(a.rank.cmp(&b.rank))
        });

        MovePicker {
            moves: scored,
            current: 0,
        }
    }

    /// Next move in order, `None` once exhausted
    #[inline]
    pub fn next_move(&mut self) -> Option<M> {
        let mv = self.moves.get(self.current)?.mv;
        self.current += 1;
        Some(mv)
    }

    /// Moves not yet handed out
    #[inline]
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.current
    }
}

impl<M: Copy> Iterator for MovePicker<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        self.next_move()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// `moves` for `side` in search order.
pub fn order_moves<G, E>(pos: &mut G, side: Side, moves: &[G::Move], eval: &E) -> MoveList<G::Move>
where
    G: Game,
    E: Evaluator<G>,
{
    MovePicker::new(pos, side, moves, eval).collect()
}
