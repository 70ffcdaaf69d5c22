//! Alpha-beta game-tree search for two-player perfect-information games
//!
//! One search shell drives any [`Game`]; two rules adapters ship with it:
//! Connect-Four on a 6×7 grid ([`connect::Connect4`]) and Othello on a pair of
//! bitboards ([`othello::Othello`]).
//!
//! ```
//! use rduel_core::{Game, Side, best_move, othello::Othello};
//!
//! let pos = Othello::initial();
//! let mv = best_move(&pos, Side::Black, 3).unwrap();
//! assert!(pos.legal_moves(Side::Black).contains(&mv));
//! ```

pub mod connect;
pub mod error;
pub mod game;
pub mod movepick;
pub mod othello;
pub mod search;
pub mod tt;
pub mod types;
pub mod zobrist;

pub use error::{MoveError, MoveResult, ParseSideError};
pub use game::{Evaluator, Game, Scoped, parse_move, validate_move};
pub use search::{SearchConfig, SearchResult, SearchStats, Searcher, best_move};
pub use tt::TablePolicy;
pub use types::{INFINITE, MoveList, Score, Side};
