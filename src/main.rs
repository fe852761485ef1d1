use std::env;
use std::io;
use std::time::Instant;

use quince_chess::movegen::perft::perft;
use quince_chess::position::board::Position;
use quince_chess::search::zobrist::ZobristTable;
use quince_chess::uci::protocol;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("perft") {
        let depth = args.get(1).and_then(|t| t.parse::<u8>().ok()).unwrap_or(6);
        run_perft_report(depth);
        return Ok(());
    }

    protocol::run_stdio_loop()
}

/// Prints movepath counts from the starting position, one depth per line.
fn run_perft_report(depth: u8) {
    let zobrist = ZobristTable::default();
    let position = Position::new_game(&zobrist);

    for level in 1..=depth {
        let started = Instant::now();
        let counts = perft(&position, level, &zobrist);
        let elapsed = started.elapsed().as_secs_f64();
        println!(
            "depth {level}: nodes {} captures {} ep {} castles {} promotions {} ({elapsed:.3}s)",
            counts.nodes, counts.captures, counts.en_passant, counts.castles, counts.promotions,
        );
    }
}
