use std::error::Error;

use clap::Parser;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

use console_chess::board::Board;
use console_chess::engine::{pick_move, SearchConfig};
use console_chess::legality::legal_moves;
use console_chess::movegen::iter_moves;
use console_chess::moves::Move;
use console_chess::piece::Color;
use console_chess::render::render;
use console_chess::snapshot::Perspective;

/// Engine plays itself and prints the moves.
#[derive(Parser, Debug)]
struct Args {
    /// Plies the engine searches per move.
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Stop after this many plies.
    #[arg(long, default_value_t = 60)]
    plies: u32,

    /// Play this many random legal plies first, for variety.
    #[arg(long, default_value_t = 0)]
    random_openings: u32,

    /// Print the final position as JSON instead of drawing it.
    #[arg(long)]
    json: bool,
}

fn random_move(board: &Board, color: Color) -> Option<Move> {
    let moves: Vec<Move> = iter_moves(&legal_moves(board, color)).collect();
    moves.choose(&mut rand::thread_rng()).copied()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SearchConfig { depth: args.depth };

    let mut board = Board::new();
    let mut color = Color::White;
    let mut ply = 0;

    while ply < args.plies {
        let mv = if ply < args.random_openings {
            random_move(&board, color)
        } else {
            pick_move(&board, color, &config).map(|p| p.mv)
        };
        let Some(mv) = mv else {
            println!("{color:?} has no legal move");
            break;
        };
        board.apply(&mv);
        println!("{:>3}. {:?} {mv}  (material {})", ply + 1, color, board.evaluate());
        color = color.opposite();
        ply += 1;
    }

    let snapshot = board.snapshot(color);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(&snapshot, Perspective::White));
    }
    eprintln!("Stopped after {ply} plies");
    Ok(())
}
