//! Basic types shared by both games and the search.
//!
//! - `Side`: the two players
//! - `Score`: signed evaluation scale
//! - `MoveList`: inline move buffer

mod score;
mod side;

pub use score::{INFINITE, Score};
pub use side::Side;

use smallvec::SmallVec;

/// Legal moves of one node. Both boards fit inline (at most 7 columns, at most 33 Othello moves in practice).
pub type MoveList<M> = SmallVec<[M; 32]>;
