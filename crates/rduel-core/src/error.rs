//! Error types for external move input
//!
//! The search never produces these: it only ever plays moves drawn from
//! `legal_moves`. They exist for callers turning user text into moves.

/// Rejected move input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Text that is not move notation at all
    #[error("cannot parse move: {0:?}")]
    Unparsable(String),

    /// Well-formed notation naming a column or square off the board
    #[error("move {0:?} is off the board")]
    OutOfRange(String),

    /// On-board move that is not legal for the side to move
    #[error("move {mv} is not legal for {side}")]
    Illegal { mv: String, side: crate::Side },
}

/// Unknown side name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown side: {0:?}")]
pub struct ParseSideError(pub String);

/// Result type for move input
pub type MoveResult<T> = Result<T, MoveError>;
