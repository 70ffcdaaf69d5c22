//! Connect-Four on a 6×7 grid
//!
//! Row 0 is the bottom row; a move names a column and the disc falls to the
//! lowest open row. Squares are numbered `row * COLS + col` for hashing.

mod eval;

pub use eval::{ConnectEvaluator, ConnectWeights};

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;
use crate::game::Game;
use crate::types::{MoveList, Score, Side};
use crate::zobrist::{self, ZOBRIST};

/// Grid height
pub const ROWS: usize = 6;
/// Grid width
pub const COLS: usize = 7;
/// Cells on the grid
pub const SQUARES: usize = ROWS * COLS;
/// Column counted by the center-occupancy feature
pub const CENTER_COL: usize = COLS / 2;

/// Magnitude of a decided game; dominates any evaluator sum.
pub const WIN_SCORE: Score = 1_000_000_000;

/// Number of four-cell lines on the grid
pub const WINDOW_COUNT: usize = 69;

/// Every horizontal, vertical and diagonal run of four squares.
pub static WINDOWS: [[u8; 4]; WINDOW_COUNT] = build_windows();

/// Tie-break rank per column: center first, then outward.
const CENTER_RANK: [u8; COLS] = [5, 3, 1, 0, 2, 4, 6];

const fn build_windows() -> [[u8; 4]; WINDOW_COUNT] {
    let mut out = [[0u8; 4]; WINDOW_COUNT];
    let mut n = 0;

    // horizontal
    let mut r = 0;
    while r < ROWS {
        let mut c = 0;
        while c + 3 < COLS {
            let mut i = 0;
            while i < 4 {
                out[n][i] = (r * COLS + c + i) as u8;
                i += 1;
            }
            n += 1;
            c += 1;
        }
        r += 1;
    }

    // vertical
    let mut c = 0;
    while c < COLS {
        let mut r = 0;
        while r + 3 < ROWS {
            let mut i = 0;
            while i < 4 {
                out[n][i] = ((r + i) * COLS + c) as u8;
                i += 1;
            }
            n += 1;
            r += 1;
        }
        c += 1;
    }

    // diagonal, up and to the right
    let mut r = 0;
    while r + 3 < ROWS {
        let mut c = 0;
        while c + 3 < COLS {
            let mut i = 0;
            while i < 4 {
                out[n][i] = ((r + i) * COLS + c + i) as u8;
                i += 1;
            }
            n += 1;
            c += 1;
        }
        r += 1;
    }

    // diagonal, up and to the left
    let mut r = 0;
    while r + 3 < ROWS {
        let mut c = 3;
        while c < COLS {
            let mut i = 0;
            while i < 4 {
                out[n][i] = ((r + i) * COLS + c - i) as u8;
                i += 1;
            }
            n += 1;
            c += 1;
        }
        r += 1;
    }

    assert!(n == WINDOW_COUNT);
    out
}

/// Column to drop a disc into (0-6)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column(u8);

impl Column {
    /// Column `index`, if it is on the grid
    #[inline]
    pub const fn new(index: usize) -> Option<Column> {
        if index < COLS {
            Some(Column(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Column {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let index: usize = text
            .parse()
            .map_err(|_| MoveError::Unparsable(text.to_string()))?;
        Column::new(index).ok_or_else(|| MoveError::OutOfRange(text.to_string()))
    }
}

/// Connect-Four position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connect4 {
    /// \[row\]\[col\], row 0 at the bottom
    cells: [[Option<Side>; COLS]; ROWS],
    /// Filled cells per column
    heights: [u8; COLS],
    /// Zobrist fingerprint of `cells`
    hash: u64,
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect4 {
    /// Empty grid
    pub fn new() -> Self {
        let mut pos = Connect4 {
            cells: [[None; COLS]; ROWS],
            heights: [0; COLS],
            hash: 0,
        };
        pos.hash = zobrist::fingerprint(&pos);
        pos
    }

    /// Build a grid from a picture, top row first, using `.`, `X` (black) and `O` (white).
    ///
    /// Returns `None` for a wrong shape, unknown glyph, or a disc floating over an empty cell.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() != ROWS {
            return None;
        }
        let mut pos = Connect4::new();
        for (top_index, line) in rows.iter().enumerate() {
            let row = ROWS - 1 - top_index;
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != COLS {
                return None;
            }
            for (col, glyph) in glyphs.into_iter().enumerate() {
                pos.cells[row][col] = match glyph {
                    '.' => None,
                    'X' | 'x' => Some(Side::Black),
                    'O' | 'o' => Some(Side::White),
                    _ => return None,
                };
            }
        }
        for col in 0..COLS {
            let height = (0..ROWS).take_while(|&r| pos.cells[r][col].is_some()).count();
            if (height..ROWS).any(|r| pos.cells[r][col].is_some()) {
                return None;
            }
            pos.heights[col] = height as u8;
        }
        pos.hash = zobrist::fingerprint(&pos);
        Some(pos)
    }

    /// Cell at (`row`, `col`), row 0 at the bottom
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[row][col]
    }

    /// Filled cells in `col`
    #[inline]
    pub fn height(&self, col: usize) -> usize {
        self.heights[col] as usize
    }

    /// Every column is full
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize == ROWS)
    }

    /// Discs on the grid
    pub fn disc_count(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Black moves first, so the side to move follows from the disc count.
    pub fn side_to_move(&self) -> Side {
        if self.disc_count() % 2 == 0 {
            Side::Black
        } else {
            Side::White
        }
    }

    /// Whether `side` dropping into `col` completes a line right now.
    fn wins_with(&mut self, col: Column, side: Side) -> bool {
        let probe = self.scoped(col, side);
        probe.winner() == Some(side)
    }
}

impl Game for Connect4 {
    type Move = Column;
    /// Row the disc landed on
    type Undo = u8;
    type Eval = ConnectEvaluator;

    const NAME: &'static str = "connect4";
    const SQUARES: usize = SQUARES;
    const DEFAULT_DEPTH: u32 = 6;

    fn initial() -> Self {
        Connect4::new()
    }

    fn legal_moves(&self, _side: Side) -> MoveList<Column> {
        (0..COLS)
            .filter(|&c| (self.heights[c] as usize) < ROWS)
            .map(|c| Column(c as u8))
            .collect()
    }

    fn apply_move(&mut self, mv: Column, side: Side) -> u8 {
        let col = mv.index();
        let row = self.heights[col] as usize;
        debug_assert!(row < ROWS, "column {col} is full");
        self.cells[row][col] = Some(side);
        self.heights[col] += 1;
        self.hash ^= ZOBRIST.toggle(row * COLS + col, None, Some(side));
        row as u8
    }

    fn undo_move(&mut self, mv: Column, side: Side, undo: u8) {
        let col = mv.index();
        let row = undo as usize;
        debug_assert_eq!(self.cells[row][col], Some(side));
        debug_assert_eq!(self.heights[col] as usize, row + 1);
        self.cells[row][col] = None;
        self.heights[col] -= 1;
        self.hash ^= ZOBRIST.toggle(row * COLS + col, Some(side), None);
    }

    fn terminal_value(&self, maximizing: Side) -> Option<Score> {
        match self.winner() {
            Some(side) if side == maximizing => Some(WIN_SCORE),
            Some(_) => Some(-WIN_SCORE),
            None if self.is_full() => Some(0),
            None => None,
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn winner(&self) -> Option<Side> {
        WINDOWS.iter().find_map(|window| {
            let first = self.occupant(window[0] as usize)?;
            window[1..]
                .iter()
                .all(|&sq| self.occupant(sq as usize) == Some(first))
                .then_some(first)
        })
    }

    #[inline]
    fn occupant(&self, square: usize) -> Option<Side> {
        self.cells[square / COLS][square % COLS]
    }

    #[inline]
    fn fingerprint(&self) -> u64 {
        self.hash
    }

    /// 2 for an immediate win, 1 for taking the cell the opponent would win on.
    fn tactical_tier(&mut self, mv: Column, side: Side) -> u8 {
        if self.wins_with(mv, side) {
            2
        } else if self.wins_with(mv, side.opponent()) {
            1
        } else {
            0
        }
    }

    #[inline]
    fn static_rank(mv: Column) -> u8 {
        CENTER_RANK[mv.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(c: usize) -> Column {
        Column::new(c).unwrap()
    }

    /// Alternate sides from Black over the given columns.
    fn play(cols: &[usize]) -> Connect4 {
        let mut pos = Connect4::new();
        let mut side = Side::Black;
        for &c in cols {
            pos.apply_move(col(c), side);
            side = !side;
        }
        pos
    }

    #[test]
    fn test_windows_cover_grid() {
        let mut seen = [false; SQUARES];
        for window in WINDOWS.iter() {
            for &sq in window {
                seen[sq as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(WINDOWS[0], [0, 1, 2, 3]);
        // first up-left diagonal starts at column 3 of the bottom row
        assert_eq!(WINDOWS[57], [3, 9, 15, 21]);
    }

    #[test]
    fn test_initial_moves() {
        let pos = Connect4::initial();
        let moves = pos.legal_moves(Side::Black);
        assert_eq!(moves.len(), COLS);
        assert!(!pos.is_terminal());
        assert_eq!(pos.terminal_value(Side::Black), None);
        assert_eq!(pos.side_to_move(), Side::Black);
    }

    #[test]
    fn test_drop_stacks() {
        let pos = play(&[3, 3, 3]);
        assert_eq!(pos.cell(0, 3), Some(Side::Black));
        assert_eq!(pos.cell(1, 3), Some(Side::White));
        assert_eq!(pos.cell(2, 3), Some(Side::Black));
        assert_eq!(pos.height(3), 3);
        assert_eq!(pos.side_to_move(), Side::White);
    }

    #[test]
    fn test_full_column_not_legal() {
        let pos = play(&[0, 0, 0, 0, 0, 0]);
        let moves = pos.legal_moves(Side::Black);
        assert_eq!(moves.len(), COLS - 1);
        assert!(!moves.contains(&col(0)));
    }

    #[test]
    fn test_apply_undo_round_trip() {
        let mut pos = play(&[3, 2, 4, 4, 1]);
        let before = pos.clone();
        for mv in pos.legal_moves(Side::White) {
            let undo = pos.apply_move(mv, Side::White);
            assert_ne!(pos, before);
            pos.undo_move(mv, Side::White, undo);
            assert_eq!(pos, before);
        }
    }

    #[test]
    fn test_horizontal_win() {
        let pos = play(&[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(pos.winner(), Some(Side::Black));
        assert_eq!(pos.terminal_value(Side::Black), Some(WIN_SCORE));
        assert_eq!(pos.terminal_value(Side::White), Some(-WIN_SCORE));
    }

    #[test]
    fn test_vertical_win() {
        let pos = play(&[6, 0, 6, 0, 6, 0, 5, 0]);
        assert_eq!(pos.winner(), Some(Side::White));
        assert!(pos.is_terminal());
    }

    #[test]
    fn test_diagonal_wins() {
        let rising = Connect4::from_rows(&[
            ".......",
            ".......",
            "...X...",
            "..XO...",
            ".XOO...",
            "XOOX...",
        ])
        .unwrap();
        assert_eq!(rising.winner(), Some(Side::Black));

        let falling = Connect4::from_rows(&[
            ".......",
            ".......",
            "O......",
            "XO.....",
            "XXO....",
            "XXXO...",
        ])
        .unwrap();
        assert_eq!(falling.winner(), Some(Side::White));
    }

    #[test]
    fn test_full_board_draw() {
        let pos = Connect4::from_rows(&[
            "XXOXXOX",
            "OOXOOXO",
            "XXOXXOX",
            "OOXOOXO",
            "XXOXXOX",
            "OOXOOXO",
        ])
        .unwrap();
        assert!(pos.is_full());
        assert_eq!(pos.winner(), None);
        assert!(pos.is_terminal());
        assert_eq!(pos.terminal_value(Side::Black), Some(0));
    }

    #[test]
    fn test_from_rows_rejects_floating_disc() {
        let floating = Connect4::from_rows(&[
            ".......",
            ".......",
            ".......",
            "...X...",
            ".......",
            ".......",
        ]);
        assert!(floating.is_none());
    }

    #[test]
    fn test_incremental_hash_matches_scratch() {
        let pos = play(&[3, 3, 2, 4, 5, 1, 0, 6]);
        assert_eq!(pos.fingerprint(), zobrist::fingerprint(&pos));

        let rows = Connect4::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "...O...",
            "..XXO..",
        ])
        .unwrap();
        let replay = play(&[3, 4, 2, 3]);
        assert_eq!(rows, replay);
        assert_eq!(rows.fingerprint(), replay.fingerprint());
    }

    #[test]
    fn test_tactical_tiers() {
        // Black threatens column 3 on the bottom row; White to move.
        let mut pos = play(&[0, 0, 1, 1, 2]);
        assert_eq!(pos.tactical_tier(col(3), Side::White), 1);
        assert_eq!(pos.tactical_tier(col(5), Side::White), 0);
        assert_eq!(pos.tactical_tier(col(3), Side::Black), 2);
        assert_eq!(pos.fingerprint(), zobrist::fingerprint(&pos));
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("4".parse::<Column>().unwrap(), col(4));
        assert_eq!(" 0 ".parse::<Column>().unwrap(), col(0));
        assert!(matches!("7".parse::<Column>(), Err(MoveError::OutOfRange(_))));
        assert!(matches!("x".parse::<Column>(), Err(MoveError::Unparsable(_))));
    }
}
