// Terminal front end: human vs engine and engine self-play

mod config;
mod render;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use rduel_core::connect::{Connect4, ConnectEvaluator};
use rduel_core::othello::{Othello, OthelloEvaluator};
use rduel_core::{Evaluator, SearchConfig, Side};
use render::Render;
use session::{Outcome, Player, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the engine
    Play {
        #[arg(value_enum)]
        game: GameKind,

        /// Side you play; the engine takes the other
        #[arg(long, default_value = "black")]
        human: Side,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(value_enum)]
        game: GameKind,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(clap::Args, Debug)]
struct EngineArgs {
    /// Search depth in plies (defaults: connect4 6, othello 5)
    #[arg(long)]
    depth: Option<u32>,

    /// TOML file with search settings and evaluator weights
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum GameKind {
    #[value(name = "connect4")]
    Connect4,
    Othello,
}

/// Which sides the engine plays
#[derive(Clone, Copy, Debug)]
enum Mode {
    Human(Side),
    Selfplay,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args.command) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    let (game, mode, engine) = match command {
        Command::Play { game, human, engine } => (game, Mode::Human(human), engine),
        Command::Selfplay { game, engine } => (game, Mode::Selfplay, engine),
    };

    let config = Config::load(engine.config.as_deref())?;
    let search = config.search_with(engine.depth);

    let stdin = io::stdin();
    let input = stdin.lock();
    let out = io::stdout().lock();

    let outcome = match game {
        GameKind::Connect4 => play::<Connect4, _>(
            mode,
            search,
            ConnectEvaluator::new(config.connect4.clone()),
            input,
            out,
        )?,
        GameKind::Othello => play::<Othello, _>(
            mode,
            search,
            OthelloEvaluator::new(config.othello.clone()),
            input,
            out,
        )?,
    };
    log::debug!("session ended: {outcome:?}");
    Ok(())
}

fn play<G, E>(
    mode: Mode,
    search: SearchConfig,
    eval: E,
    input: impl BufRead,
    out: impl Write,
) -> Result<Outcome>
where
    G: Render,
    E: Evaluator<G> + Clone,
{
    log::info!(
        "{} {:?}, depth {}, table {:?}",
        G::NAME,
        mode,
        search.depth_for::<G>(),
        search.table
    );

    let seat = |side: Side| match mode {
        Mode::Human(human) if human == side => Player::Human,
        _ => Player::engine(search, eval.clone()),
    };
    let mut session = Session::new(seat(Side::Black), seat(Side::White), input, out);
    session.run()
}
