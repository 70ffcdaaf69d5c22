//! Zobrist hashing for position identification
//!
//! One table serves both boards: 64 squares × 3 occupant states (empty,
//! black, white). The Connect-Four grid only uses the first 42 squares.
//! Empty has its own keys so two layouts never collide by leaving a square out.

use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::game::Game;
use crate::types::Side;

/// Largest board the table covers
pub const MAX_SQUARES: usize = 64;

/// Empty, black, white
pub const OCCUPANT_STATES: usize = 3;

const SEED: u64 = 0x1337_5EED_C0FF_EE00;

/// Zobrist key tables
pub struct ZobristTable {
    /// \[square\]\[occupant state\]
    pub square: [[u64; OCCUPANT_STATES]; MAX_SQUARES],
    /// Folded into search keys for the side to move
    pub to_move: [u64; Side::NUM],
    /// Folded into search keys for the side scores are relative to
    pub maximizing: [u64; Side::NUM],
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristTable {
    /// Draw every key from a fixed seed, so fingerprints are stable across runs.
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(SEED);

        let mut table = ZobristTable {
            square: [[0; OCCUPANT_STATES]; MAX_SQUARES],
            to_move: [0; Side::NUM],
            maximizing: [0; Side::NUM],
        };

        for keys in table.square.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.random();
            }
        }
        for key in table.to_move.iter_mut().chain(table.maximizing.iter_mut()) {
            *key = rng.random();
        }

        table
    }

    /// Key for `occupant` standing on `square`
    #[inline]
    pub fn occupant_key(&self, square: usize, occupant: Option<Side>) -> u64 {
        self.square[square][state_index(occupant)]
    }

    /// XOR delta for a square changing from `from` to `to`
    #[inline]
    pub fn toggle(&self, square: usize, from: Option<Side>, to: Option<Side>) -> u64 {
        self.occupant_key(square, from) ^ self.occupant_key(square, to)
    }
}

#[inline]
const fn state_index(occupant: Option<Side>) -> usize {
    match occupant {
        None => 0,
        Some(Side::Black) => 1,
        Some(Side::White) => 2,
    }
}

lazy_static! {
    /// Process-wide key table, built on first use and never mutated.
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

/// From-scratch fingerprint: XOR of the occupant key of every square.
pub fn fingerprint<G: Game>(pos: &G) -> u64 {
    (0..G::SQUARES).fold(0, |hash, sq| hash ^ ZOBRIST.occupant_key(sq, pos.occupant(sq)))
}

/// Transposition key of a search node.
///
/// The occupant layout alone does not say whose turn it is after an Othello
/// pass, and cached scores are relative to the maximizing side, so both are
/// folded in.
#[inline]
pub fn node_key(fingerprint: u64, to_move: Side, maximizing: Side) -> u64 {
    fingerprint ^ ZOBRIST.to_move[to_move.index()] ^ ZOBRIST.maximizing[maximizing.index()]
}
