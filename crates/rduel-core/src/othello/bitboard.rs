//! 8×8 bitboard primitives
//!
//! Bit 0 = a1, bit 7 = h1, bit 56 = a8, bit 63 = h8. Every directional shift
//! masks off the file it would wrap around from.

pub type Bitboard = u64;

/// Everything except the a-file
pub const NOT_A: Bitboard = 0xFEFE_FEFE_FEFE_FEFE;
/// Everything except the h-file
pub const NOT_H: Bitboard = 0x7F7F_7F7F_7F7F_7F7F;

pub const CORNERS: Bitboard = 1 | 1 << 7 | 1 << 56 | 1 << 63;
pub const EDGE_RANKS: Bitboard = 0xFF | 0xFF << 56;
pub const EDGE_FILES: Bitboard = 0x0101_0101_0101_0101 | 0x8080_8080_8080_8080;
pub const EDGES: Bitboard = EDGE_RANKS | EDGE_FILES;

/// (X-square, its corner): the diagonal neighbours b2, g2, b7, g7
pub const X_PAIRS: [(u8, u8); 4] = [(9, 0), (14, 7), (49, 56), (54, 63)];

/// (C-square, its corner): edge neighbours of each corner
pub const C_PAIRS: [(u8, u8); 8] = [
    (1, 0),
    (8, 0),
    (6, 7),
    (15, 7),
    (48, 56),
    (57, 56),
    (55, 63),
    (62, 63),
];

#[inline]
pub const fn north(b: Bitboard) -> Bitboard {
    b << 8
}

#[inline]
pub const fn south(b: Bitboard) -> Bitboard {
    b >> 8
}

#[inline]
pub const fn east(b: Bitboard) -> Bitboard {
    (b & NOT_H) << 1
}

#[inline]
pub const fn west(b: Bitboard) -> Bitboard {
    (b & NOT_A) >> 1
}

#[inline]
pub const fn north_east(b: Bitboard) -> Bitboard {
    (b & NOT_H) << 9
}

#[inline]
pub const fn north_west(b: Bitboard) -> Bitboard {
    (b & NOT_A) << 7
}

#[inline]
pub const fn south_east(b: Bitboard) -> Bitboard {
    (b & NOT_H) >> 7
}

#[inline]
pub const fn south_west(b: Bitboard) -> Bitboard {
    (b & NOT_A) >> 9
}

/// One-square step in a fixed direction
pub type Shift = fn(Bitboard) -> Bitboard;

pub const DIRECTIONS: [Shift; 8] = [
    north, south, east, west, north_east, north_west, south_east, south_west,
];

/// Squares where `own` may play against `opp`.
pub fn legal_mask(own: Bitboard, opp: Bitboard) -> Bitboard {
    let empty = !(own | opp);
    let mut moves = 0;
    for shift in DIRECTIONS {
        let mut run = shift(own) & opp;
        // a run of opponent discs is at most six long
        for _ in 0..5 {
            run |= shift(run) & opp;
        }
        moves |= shift(run) & empty;
    }
    moves
}

/// Opponent discs flipped by `own` playing the single-bit `mv`.
pub fn flips(mv: Bitboard, own: Bitboard, opp: Bitboard) -> Bitboard {
    let mut all = 0;
    for shift in DIRECTIONS {
        let mut captured = 0;
        let mut x = shift(mv) & opp;
        while x != 0 {
            captured |= x;
            let next = shift(x);
            if next & own != 0 {
                all |= captured;
                break;
            }
            x = next & opp;
        }
    }
    all
}

/// Every square touching one of `b` in any of the eight directions.
#[inline]
pub fn neighbours(b: Bitboard) -> Bitboard {
    DIRECTIONS.iter().fold(0, |acc, shift| acc | shift(b))
}

/// Discs of `discs` next to at least one empty square.
#[inline]
pub fn frontier(discs: Bitboard, empty: Bitboard) -> u32 {
    (discs & neighbours(empty)).count_ones()
}

/// Iterate the set bits of a mask, lowest first.
pub struct Bits(pub Bitboard);

impl Iterator for Bits {
    type Item = Bitboard;

    #[inline]
    fn next(&mut self) -> Option<Bitboard> {
        if self.0 == 0 {
            return None;
        }
        let lsb = self.0 & self.0.wrapping_neg();
        self.0 ^= lsb;
        Some(lsb)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bits {}
