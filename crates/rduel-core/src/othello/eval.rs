//! Othello evaluation: mobility, corners, X/C squares, frontier, edges and
//! late-game parity.

use serde::Deserialize;

use super::Othello;
use super::bitboard::{self, Bitboard, C_PAIRS, CORNERS, EDGES, X_PAIRS};
use crate::game::Evaluator;
use crate::types::{Score, Side};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OthelloWeights {
    /// Scale of the mobility ratio
    pub mobility: Score,
    /// Per corner held
    pub corner: Score,
    /// Per disc on an X-square next to an empty corner
    pub x_square: Score,
    /// Per disc on a C-square next to an empty corner
    pub c_square: Score,
    /// Scale of the frontier ratio
    pub frontier: Score,
    /// Per edge disc
    pub edge: Score,
    /// Per disc of majority once few empties remain
    pub parity: Score,
    /// Empties at or below which parity counts
    pub parity_empties: u32,
}

impl Default for OthelloWeights {
    fn default() -> Self {
        OthelloWeights {
            mobility: 100,
            corner: 25,
            x_square: 12,
            c_square: 2,
            frontier: 50,
            edge: 2,
            parity: 5,
            parity_empties: 10,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OthelloEvaluator {
    pub weights: OthelloWeights,
}

/// `scale * num / den`, zero when `den` is zero. Truncates toward zero so the
/// result flips sign exactly when `num` does.
#[inline]
fn ratio(scale: Score, num: Score, den: Score) -> Score {
    if den == 0 { 0 } else { scale * num / den }
}

#[inline]
fn popcount(b: Bitboard) -> Score {
    b.count_ones() as Score
}

/// Penalty for discs on squares next to a still-empty corner.
fn corner_danger(pairs: &[(u8, u8)], own: Bitboard, opp: Bitboard, weight: Score) -> Score {
    let occupied = own | opp;
    pairs
        .iter()
        .filter(|&&(_, corner)| occupied & (1 << corner) == 0)
        .map(|&(square, _)| {
            let bit = 1 << square;
            let mut score = 0;
            if own & bit != 0 {
                score -= weight;
            }
            if opp & bit != 0 {
                score += weight;
            }
            score
        })
        .sum()
}

impl OthelloEvaluator {
    pub fn new(weights: OthelloWeights) -> Self {
        OthelloEvaluator { weights }
    }
}

impl Evaluator<Othello> for OthelloEvaluator {
    fn evaluate(&self, pos: &Othello, perspective: Side) -> Score {
        let w = &self.weights;
        let own = pos.discs(perspective);
        let opp = pos.discs(!perspective);
        let empty = pos.empties();

        let my_moves = popcount(bitboard::legal_mask(own, opp));
        let op_moves = popcount(bitboard::legal_mask(opp, own));
        let mobility = ratio(w.mobility, my_moves - op_moves, my_moves + op_moves);

        let corners = w.corner * (popcount(own & CORNERS) - popcount(opp & CORNERS));
        let x_squares = corner_danger(&X_PAIRS, own, opp, w.x_square);
        let c_squares = corner_danger(&C_PAIRS, own, opp, w.c_square);

        let my_front = bitboard::frontier(own, empty) as Score;
        let op_front = bitboard::frontier(opp, empty) as Score;
        let frontier = ratio(w.frontier, op_front - my_front, my_front + op_front);

        let edges = w.edge * (popcount(own & EDGES) - popcount(opp & EDGES));

        let parity = if empty.count_ones() <= w.parity_empties {
            w.parity * (popcount(own) - popcount(opp))
        } else {
            0
        };

        mobility + corners + x_squares + c_squares + frontier + edges + parity
    }
}
