//! Text boards

use std::fmt::Write;

use rduel_core::connect::{self, Connect4};
use rduel_core::othello::{self, Othello};
use rduel_core::{Game, Side};

/// Plain-text picture of a position
pub trait Render: Game {
    /// Glyph of a side's pieces
    fn glyph(side: Side) -> char;

    fn render(&self) -> String;
}

fn cell_glyph<G: Render>(occupant: Option<Side>) -> char {
    occupant.map_or('.', G::glyph)
}

impl Render for Connect4 {
    fn glyph(side: Side) -> char {
        match side {
            Side::Black => 'X',
            Side::White => 'O',
        }
    }

    /// Top row first, column numbers underneath
    fn render(&self) -> String {
        let mut out = String::new();
        for row in (0..connect::ROWS).rev() {
            let cells: Vec<String> = (0..connect::COLS)
                .map(|col| cell_glyph::<Self>(self.cell(row, col)).to_string())
                .collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        let footer: Vec<String> = (0..connect::COLS).map(|c| c.to_string()).collect();
        out.push_str(&footer.join(" "));
        out.push('\n');
        out
    }
}

impl Render for Othello {
    fn glyph(side: Side) -> char {
        match side {
            Side::Black => '●',
            Side::White => '○',
        }
    }

    /// File letters on top, rank 1 first
    fn render(&self) -> String {
        let mut out = String::from("     a b c d e f g h\n   -----------------\n");
        for rank in 0..othello::SIZE {
            let cells: Vec<String> = (0..othello::SIZE)
                .map(|file| cell_glyph::<Self>(self.occupant(rank * othello::SIZE + file)).to_string())
                .collect();
            // writing into a String cannot fail
            let _ = writeln!(out, "{:2} | {}", rank + 1, cells.join(" "));
        }
        let _ = writeln!(
            out,
            "{} {}  {} {}",
            Self::glyph(Side::Black),
            self.disc_count(Side::Black),
            Self::glyph(Side::White),
            self.disc_count(Side::White)
        );
        out
    }
}
