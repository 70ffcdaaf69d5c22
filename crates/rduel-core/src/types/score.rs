//! Score scale
//!
//! Scores are plain `i32`. Each game picks a terminal magnitude that dominates
//! any sum of its evaluator features; `INFINITE` sits above both of them.

/// Search and evaluation score, higher is better for the perspective side.
pub type Score = i32;

/// Root window bound. Symmetric so `-INFINITE` never overflows.
pub const INFINITE: Score = i32::MAX;
