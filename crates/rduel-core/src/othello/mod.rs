//! Othello on a pair of 64-bit masks
//!
//! One mask per side; the masks are always disjoint. A side with no legal
//! move passes, and the game ends only when neither side can move.

pub mod bitboard;
mod eval;

pub use eval::{OthelloEvaluator, OthelloWeights};

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;
use crate::game::Game;
use crate::types::{MoveList, Score, Side};
use crate::zobrist::{self, ZOBRIST};
use bitboard::{Bitboard, Bits, CORNERS};

/// Board edge length
pub const SIZE: usize = 8;
/// Squares on the board
pub const SQUARES: usize = SIZE * SIZE;

/// Magnitude of a decided game
pub const WIN_SCORE: Score = 10_000_000;

/// Target square as a single-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move(Bitboard);

impl Move {
    #[inline]
    pub const fn from_index(index: usize) -> Option<Move> {
        if index < SQUARES {
            Some(Move(1 << index))
        } else {
            None
        }
    }

    /// Square at zero-based `row` (rank) and `col` (file)
    #[inline]
    pub const fn from_coords(row: usize, col: usize) -> Option<Move> {
        if row < SIZE && col < SIZE {
            Move::from_index(row * SIZE + col)
        } else {
            None
        }
    }

    #[inline]
    pub const fn bit(self) -> Bitboard {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0.trailing_zeros() as usize
    }

    #[inline]
    pub const fn is_corner(self) -> bool {
        self.0 & CORNERS != 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.index();
        let file = (b'a' + (index % SIZE) as u8) as char;
        write!(f, "{}{}", file, index / SIZE + 1)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    /// Algebraic (`d3`) or zero-based `row col` (`2 3`, `2,3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let out_of_range = || MoveError::OutOfRange(text.clone());

        let bytes = text.as_bytes();
        if bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_digit() {
            let col = (bytes[0] - b'a') as usize;
            let rank = (bytes[1] - b'0') as usize;
            if rank == 0 {
                return Err(out_of_range());
            }
            return Move::from_coords(rank - 1, col).ok_or_else(out_of_range);
        }

        let parts: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if let [row, col] = parts[..] {
            if let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) {
                return Move::from_coords(row, col).ok_or_else(out_of_range);
            }
        }
        Err(MoveError::Unparsable(text.clone()))
    }
}

/// Othello position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Othello {
    black: Bitboard,
    white: Bitboard,
    hash: u64,
}

impl Default for Othello {
    fn default() -> Self {
        Self::new()
    }
}

impl Othello {
    /// Four-disc starting cross: black e4 d5, white d4 e5.
    pub fn new() -> Self {
        Othello::with_masks(1 << 28 | 1 << 35, 1 << 27 | 1 << 36)
    }

    /// Position from raw masks; `None` if they overlap.
    pub fn from_masks(black: Bitboard, white: Bitboard) -> Option<Self> {
        if black & white != 0 {
            return None;
        }
        Some(Othello::with_masks(black, white))
    }

    fn with_masks(black: Bitboard, white: Bitboard) -> Self {
        let mut pos = Othello {
            black,
            white,
            hash: 0,
        };
        pos.hash = zobrist::fingerprint(&pos);
        pos
    }

    #[inline]
    pub fn discs(&self, side: Side) -> Bitboard {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    #[inline]
    pub fn empties(&self) -> Bitboard {
        !(self.black | self.white)
    }

    #[inline]
    pub fn disc_count(&self, side: Side) -> u32 {
        self.discs(side).count_ones()
    }

    /// Legal target squares for `side` as a mask
    #[inline]
    pub fn legal_mask(&self, side: Side) -> Bitboard {
        bitboard::legal_mask(self.discs(side), self.discs(!side))
    }

    #[inline]
    pub fn has_moves(&self, side: Side) -> bool {
        self.legal_mask(side) != 0
    }

    /// (mover, opponent) masks
    #[inline]
    fn masks_mut(&mut self, side: Side) -> (&mut Bitboard, &mut Bitboard) {
        match side {
            Side::Black => (&mut self.black, &mut self.white),
            Side::White => (&mut self.white, &mut self.black),
        }
    }

    /// Rehash the placed square and every flipped disc.
    fn toggle_hash(&mut self, mv: Move, side: Side, flips: Bitboard) {
        let mut delta = ZOBRIST.toggle(mv.index(), None, Some(side));
        for bit in Bits(flips) {
            delta ^= ZOBRIST.toggle(bit.trailing_zeros() as usize, Some(!side), Some(side));
        }
        self.hash ^= delta;
    }
}

impl Game for Othello {
    type Move = Move;
    /// Discs flipped by the move
    type Undo = Bitboard;
    type Eval = OthelloEvaluator;

    const NAME: &'static str = "othello";
    const SQUARES: usize = SQUARES;
    const DEFAULT_DEPTH: u32 = 5;

    fn initial() -> Self {
        Othello::new()
    }

    fn legal_moves(&self, side: Side) -> MoveList<Move> {
        Bits(self.legal_mask(side)).map(Move).collect()
    }

    fn apply_move(&mut self, mv: Move, side: Side) -> Bitboard {
        let (own, opp) = self.masks_mut(side);
        debug_assert_eq!((*own | *opp) & mv.bit(), 0, "square {mv} is occupied");
        let flips = bitboard::flips(mv.bit(), *own, *opp);
        *own |= mv.bit() | flips;
        *opp &= !flips;
        self.toggle_hash(mv, side, flips);
        flips
    }

    fn undo_move(&mut self, mv: Move, side: Side, flips: Bitboard) {
        let (own, opp) = self.masks_mut(side);
        *own &= !(mv.bit() | flips);
        *opp |= flips;
        self.toggle_hash(mv, side, flips);
    }

    fn terminal_value(&self, maximizing: Side) -> Option<Score> {
        if !self.is_terminal() {
            return None;
        }
        let mine = self.disc_count(maximizing);
        let theirs = self.disc_count(!maximizing);
        Some(match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => WIN_SCORE,
            std::cmp::Ordering::Less => -WIN_SCORE,
            std::cmp::Ordering::Equal => 0,
        })
    }

    fn is_terminal(&self) -> bool {
        !self.has_moves(Side::Black) && !self.has_moves(Side::White)
    }

    /// Strict disc majority once the game is over
    fn winner(&self) -> Option<Side> {
        if !self.is_terminal() {
            return None;
        }
        let (black, white) = (self.disc_count(Side::Black), self.disc_count(Side::White));
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Side::Black),
            std::cmp::Ordering::Less => Some(Side::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    fn occupant(&self, square: usize) -> Option<Side> {
        let bit = 1u64 << square;
        if self.black & bit != 0 {
            Some(Side::Black)
        } else if self.white & bit != 0 {
            Some(Side::White)
        } else {
            None
        }
    }

    #[inline]
    fn fingerprint(&self) -> u64 {
        self.hash
    }

    /// 2 if the move ends the game in the mover's favour, 1 for a corner.
    fn tactical_tier(&mut self, mv: Move, side: Side) -> u8 {
        let after = self.scoped(mv, side);
        if after.winner() == Some(side) {
            2
        } else if mv.is_corner() {
            1
        } else {
            0
        }
    }

    #[inline]
    fn static_rank(mv: Move) -> u8 {
        mv.index() as u8
    }
}
