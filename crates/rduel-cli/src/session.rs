//! Read-validate-move loop
//!
//! Runs one game between two players, each either a human typing moves or
//! an engine searcher. Input and output are injected so tests can drive it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use rduel_core::{Evaluator, Game, SearchConfig, Searcher, Side, parse_move};

use crate::render::Render;

/// Who makes the moves for one side
pub enum Player<G: Game, E> {
    Human,
    Engine(Box<Searcher<G, E>>),
}

impl<G: Game, E: Evaluator<G>> Player<G, E> {
    pub fn engine(config: SearchConfig, eval: E) -> Self {
        Player::Engine(Box::new(Searcher::with_evaluator(config, eval)))
    }
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won(Side),
    Draw,
    /// Input closed before the game finished
    Abandoned,
}

pub struct Session<G: Game, E, R, W> {
    pos: G,
    to_move: Side,
    players: [Player<G, E>; Side::NUM],
    input: R,
    out: W,
}

impl<G, E, R, W> Session<G, E, R, W>
where
    G: Render,
    E: Evaluator<G>,
    R: BufRead,
    W: Write,
{
    /// New game from the initial position, black to move
    pub fn new(black: Player<G, E>, white: Player<G, E>, input: R, out: W) -> Self {
        Self::from_position(G::initial(), Side::Black, black, white, input, out)
    }

    /// Continue a game from `pos` with `to_move` on move
    pub fn from_position(
        pos: G,
        to_move: Side,
        black: Player<G, E>,
        white: Player<G, E>,
        input: R,
        out: W,
    ) -> Self {
        Session {
            pos,
            to_move,
            players: [black, white],
            input,
            out,
        }
    }

    pub fn position(&self) -> &G {
        &self.pos
    }

    /// Play until the game ends or the input runs dry.
    pub fn run(&mut self) -> Result<Outcome> {
        write!(self.out, "{}", self.pos.render())?;

        loop {
            if self.pos.is_terminal() {
                return self.finish();
            }

            let side = self.to_move;
            let label = label::<G>(side);
            let legal = self.pos.legal_moves(side);
            if legal.is_empty() {
                writeln!(self.out, "{label} has no legal moves and passes.")?;
                self.to_move = !side;
                continue;
            }

            let mv = match &mut self.players[side.index()] {
                Player::Human => {
                    let listed: Vec<String> = legal.iter().map(|m| m.to_string()).collect();
                    writeln!(self.out, "Legal moves: {}", listed.join(" "))?;
                    match read_move(&self.pos, side, &mut self.input, &mut self.out)? {
                        Some(mv) => mv,
                        None => {
                            writeln!(self.out, "Input closed, leaving the game.")?;
                            return Ok(Outcome::Abandoned);
                        }
                    }
                }
                Player::Engine(searcher) => {
                    let result = searcher.think(&self.pos, side);
                    log::info!(
                        "{} {}: {:?} score {} nodes {}",
                        G::NAME,
                        side,
                        result.best_move.map(|m| m.to_string()),
                        result.score,
                        result.stats.nodes
                    );
                    result
                        .best_move
                        .ok_or_else(|| anyhow!("engine found no move for {side}"))?
                }
            };

            self.pos.apply_move(mv, side);
            writeln!(self.out, "{label} plays {mv}")?;
            write!(self.out, "{}", self.pos.render())?;
            self.to_move = !side;
        }
    }

    fn finish(&mut self) -> Result<Outcome> {
        let outcome = match self.pos.winner() {
            Some(side) => {
                writeln!(self.out, "Game over: {} wins.", label::<G>(side))?;
                Outcome::Won(side)
            }
            None => {
                writeln!(self.out, "Game over: draw.")?;
                Outcome::Draw
            }
        };
        self.out.flush()?;
        Ok(outcome)
    }
}

fn label<G: Render>(side: Side) -> String {
    format!("{} ({})", side, G::glyph(side))
}

/// Prompt until a legal move is entered; `None` at end of input.
fn read_move<G: Game>(
    pos: &G,
    side: Side,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<G::Move>> {
    let mut line = String::new();
    loop {
        write!(out, "Your move ({side}): ")?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("failed to read move")?;
        if read == 0 {
            writeln!(out)?;
            return Ok(None);
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_move(pos, &line, side) {
            Ok(mv) => return Ok(Some(mv)),
            Err(e) => writeln!(out, "{e}. Try again.")?,
        }
    }
}
