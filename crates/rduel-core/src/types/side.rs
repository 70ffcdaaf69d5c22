//! Side to move

use std::fmt;

/// One of the two players. Black moves first in both games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    /// Number of sides
    pub const NUM: usize = 2;

    /// The other side
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = crate::error::ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" | "x" | "1" => Ok(Side::Black),
            "white" | "w" | "o" | "2" => Ok(Side::White),
            other => Err(crate::error::ParseSideError(other.to_string())),
        }
    }
}
