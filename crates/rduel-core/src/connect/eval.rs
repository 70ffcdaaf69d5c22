//! Window-pattern evaluation for Connect-Four

use serde::Deserialize;

use super::{CENTER_COL, Connect4, ROWS, WINDOWS};
use crate::game::{Evaluator, Game};
use crate::types::{Score, Side};

/// Feature weights
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectWeights {
    /// Per own disc in the center column
    pub center: Score,
    /// Own four in a window
    pub four: Score,
    /// Own three with the fourth cell empty
    pub three: Score,
    /// Own two with two empty
    pub two: Score,
    /// Opponent three with one empty
    pub opponent_three: Score,
    /// Opponent four
    pub opponent_four: Score,
}

impl Default for ConnectWeights {
    fn default() -> Self {
        ConnectWeights {
            center: 6,
            four: 100_000,
            three: 100,
            two: 10,
            opponent_three: -120,
            opponent_four: -100_000,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConnectEvaluator {
    pub weights: ConnectWeights,
}

impl ConnectEvaluator {
    pub fn new(weights: ConnectWeights) -> Self {
        ConnectEvaluator { weights }
    }

    /// Pattern score of one window given the own/opponent/empty counts.
    #[inline]
    fn window_score(&self, own: u8, opp: u8, empty: u8) -> Score {
        let w = &self.weights;
        let mut score = 0;
        if own == 4 {
            score += w.four;
        } else if own == 3 && empty == 1 {
            score += w.three;
        } else if own == 2 && empty == 2 {
            score += w.two;
        }
        if opp == 3 && empty == 1 {
            score += w.opponent_three;
        }
        if opp == 4 {
            score += w.opponent_four;
        }
        score
    }
}

impl Evaluator<Connect4> for ConnectEvaluator {
    fn evaluate(&self, pos: &Connect4, perspective: Side) -> Score {
        let center = (0..ROWS)
            .filter(|&r| pos.cell(r, CENTER_COL) == Some(perspective))
            .count() as Score;
        let mut score = center * self.weights.center;

        for window in WINDOWS.iter() {
            let (mut own, mut opp) = (0u8, 0u8);
            for &sq in window {
                match pos.occupant(sq as usize) {
                    Some(side) if side == perspective => own += 1,
                    Some(_) => opp += 1,
                    None => {}
                }
            }
            score += self.window_score(own, opp, 4 - own - opp);
        }
        score
    }
}
