use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use console_chess::engine::SearchConfig;
use console_chess::game::{Game, GameConfig};
use console_chess::piece::Color;
use console_chess::render::render;
use console_chess::ChessError;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(s: Side) -> Color {
        match s {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Play against the engine. Moves are typed as E2-E4.
#[derive(Parser, Debug)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"))]
struct Args {
    /// Plies the engine searches.
    #[arg(long, default_value_t = console_chess::engine::DEFAULT_DEPTH)]
    depth: u32,

    /// The side you play.
    #[arg(long, value_enum, default_value_t = Side::White)]
    human: Side,

    /// Refuse moves that are not legal for your side.
    #[arg(long)]
    strict: bool,

    /// Print board snapshots as JSON instead of drawing them.
    #[arg(long)]
    json: bool,
}

fn show(game: &Game, json: bool) -> Result<(), Box<dyn Error>> {
    let snapshot = game.snapshot();
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        print!("{}", render(&snapshot, game.config().human.into()));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = Game::new(GameConfig {
        human: args.human.into(),
        search: SearchConfig { depth: args.depth },
        strict: args.strict,
    });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        show(&game, args.json)?;

        if game.is_human_turn() {
            loop {
                print!("Please enter a valid move: ");
                io::stdout().flush()?;
                let Some(line) = lines.next().transpose()? else {
                    return Ok(());
                };
                match game.play_human(&line) {
                    Ok(_) => break,
                    Err(e) => eprintln!("{e}"),
                }
            }
            println!("Valid move! Score: {}", game.board().evaluate());
        } else {
            match game.play_engine() {
                Ok(pick) => println!("\nComputer made move {}\n", pick.mv),
                Err(ChessError::NoLegalMoves(color)) => {
                    println!("\n{color:?} has no legal move. Game over.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
