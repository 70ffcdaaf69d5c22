//! Rules adapter contract shared by both games
//!
//! The searcher only talks to a position through [`Game`]: move generation,
//! apply/undo, terminal detection, and the occupant layout used for hashing.
//! Scoring is split out into [`Evaluator`] so weights can be tuned without
//! touching the rules.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{MoveError, MoveResult};
use crate::types::{MoveList, Score, Side};

/// Static evaluation of a non-terminal position.
///
/// Must be a pure function of the position: no hidden state, same input gives
/// the same score. Higher is better for `perspective`.
pub trait Evaluator<G> {
    fn evaluate(&self, pos: &G, perspective: Side) -> Score;
}

/// A finite two-player perfect-information game.
pub trait Game: Clone + fmt::Debug {
    /// Enough to replay one ply
    type Move: Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = MoveError>;
    /// Whatever `undo_move` needs to restore the position exactly
    type Undo;
    /// Default scoring oracle
    type Eval: Evaluator<Self> + Default;

    /// Short name used in logs and the CLI
    const NAME: &'static str;
    /// Number of squares fed to the Zobrist hasher
    const SQUARES: usize;
    /// Search depth used when the caller does not pick one
    const DEFAULT_DEPTH: u32;

    /// Starting layout
    fn initial() -> Self;

    /// Legal moves for `side`. May be empty mid-game when the rules force a pass.
    fn legal_moves(&self, side: Side) -> MoveList<Self::Move>;

    /// Play `mv` for `side`. `mv` must come from `legal_moves`.
    fn apply_move(&mut self, mv: Self::Move, side: Side) -> Self::Undo;

    /// Exact inverse of the matching `apply_move`.
    fn undo_move(&mut self, mv: Self::Move, side: Side, undo: Self::Undo);

    /// Decided outcome from `maximizing`'s point of view, `None` while the game is open.
    fn terminal_value(&self, maximizing: Side) -> Option<Score>;

    /// Game over (win, loss, draw or no moves for anyone)
    fn is_terminal(&self) -> bool;

    /// Winning side, if the game has one
    fn winner(&self) -> Option<Side>;

    /// Occupant of `square` (`0..SQUARES`)
    fn occupant(&self, square: usize) -> Option<Side>;

    /// Incrementally maintained Zobrist fingerprint of the occupant layout
    fn fingerprint(&self) -> u64;

    /// Ordering tier for `mv`: 2 wins at once, 1 is a game-specific priority
    /// (block or corner), 0 otherwise. May try the move but must leave the
    /// position as it found it.
    fn tactical_tier(&mut self, _mv: Self::Move, _side: Side) -> u8 {
        0
    }

    /// Final fixed tie-break, lower is tried first
    fn static_rank(mv: Self::Move) -> u8;

    /// Play `mv` and take it back when the returned guard drops.
    fn scoped(&mut self, mv: Self::Move, side: Side) -> Scoped<'_, Self> {
        Scoped::new(self, mv, side)
    }

    /// Copy-on-write variant of `apply_move`
    fn after(&self, mv: Self::Move, side: Side) -> Self {
        let mut next = self.clone();
        next.apply_move(mv, side);
        next
    }
}

/// A move applied for the lifetime of the guard.
///
/// Undo runs on every exit path, including early breaks out of a move loop
/// and unwinding, so sibling branches never see a previous branch's mutation.
pub struct Scoped<'a, G: Game> {
    pos: &'a mut G,
    mv: G::Move,
    side: Side,
    undo: Option<G::Undo>,
}

impl<'a, G: Game> Scoped<'a, G> {
    pub fn new(pos: &'a mut G, mv: G::Move, side: Side) -> Self {
        let undo = pos.apply_move(mv, side);
        Scoped {
            pos,
            mv,
            side,
            undo: Some(undo),
        }
    }
}

impl<G: Game> Deref for Scoped<'_, G> {
    type Target = G;

    #[inline]
    fn deref(&self) -> &G {
        &*self.pos
    }
}

impl<G: Game> DerefMut for Scoped<'_, G> {
    #[inline]
    fn deref_mut(&mut self) -> &mut G {
        &mut *self.pos
    }
}

impl<G: Game> Drop for Scoped<'_, G> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.undo_move(self.mv, self.side, undo);
        }
    }
}

/// Accept `mv` only if it is legal for `side` right now.
pub fn validate_move<G: Game>(pos: &G, mv: G::Move, side: Side) -> MoveResult<G::Move> {
    if pos.legal_moves(side).contains(&mv) {
        Ok(mv)
    } else {
        Err(MoveError::Illegal {
            mv: mv.to_string(),
            side,
        })
    }
}

/// Parse user text and check it against the legal moves.
pub fn parse_move<G: Game>(pos: &G, text: &str, side: Side) -> MoveResult<G::Move> {
    let mv: G::Move = text.parse()?;
    validate_move(pos, mv, side)
}
