//! Engine binary: UCI loop by default, self-benchmark via `sable bench`.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use sable::board::{search, Board, SearchLimits};
use sable::tt::TranspositionTable;
use sable::uci::{parse_go_params, parse_position_command, parse_threads_option, parse_uci_command, UciCommand};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const DEFAULT_DEPTH: u32 = 4;

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("bench") {
        let depth = args
            .get(2)
            .and_then(|v| v.parse::<u32>().ok())
            .map_or(5, |d| d.max(1));
        let threads = args
            .get(3)
            .and_then(|v| v.parse::<usize>().ok())
            .map_or_else(default_threads, |t| t.max(1));
        run_bench(depth, threads);
        return;
    }
    run_uci_loop();
}

fn run_uci_loop() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut board = Board::new();
    let tt = TranspositionTable::new();
    let mut threads = default_threads();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(command) = parse_uci_command(&line) else {
            continue;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();

        match command {
            UciCommand::Uci => {
                println!("id name Sable");
                println!("id author the Sable developers");
                println!(
                    "option name Threads type spin default {threads} min 1 max 128"
                );
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => {
                tt.clear();
                board = Board::new();
            }
            UciCommand::SetOption(_) => {
                if let Some(count) = parse_threads_option(&parts) {
                    threads = count;
                }
            }
            UciCommand::Position(_) => parse_position_command(&mut board, &parts),
            UciCommand::Go(_) => {
                let params = parse_go_params(&parts);
                let limits = SearchLimits {
                    max_depth: params.depth.unwrap_or(if params.movetime.is_some() {
                        0
                    } else {
                        DEFAULT_DEPTH
                    }),
                    time_ms: params.movetime.unwrap_or(0),
                    infinite: params.infinite,
                    stop: None,
                };
                let result = search(&mut board, &limits, &tt, threads);
                println!(
                    "info depth {} score cp {} nodes {}",
                    result.depth, result.score, result.nodes
                );
                println!("bestmove {}", result.best_move);
            }
            UciCommand::LegalMoves => {
                let moves = board.generate_moves();
                print!("legalmoves");
                for mv in &moves {
                    print!(" {mv}");
                }
                println!();
            }
            UciCommand::Fen => println!("fen {}", board.to_fen()),
            UciCommand::InCheck => {
                let in_check = board.is_in_check(board.side_to_move());
                println!("incheck {}", i32::from(in_check));
            }
            UciCommand::Quit => break,
            UciCommand::Unknown(_) => {}
        }

        stdout.flush().ok();
    }
}

fn run_bench(depth: u32, threads: usize) {
    let positions = [
        ("startpos", START_FEN),
        (
            "kiwipete",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        ),
        ("endgame", "8/8/8/3k4/8/4K3/8/8 w - - 0 1"),
    ];

    let tt = TranspositionTable::new();
    let mut total_nodes = 0u64;
    let bench_start = Instant::now();

    for (name, fen) in positions {
        let Ok(mut board) = Board::try_from_fen(fen) else {
            println!("bench {name} skipped invalid fen");
            continue;
        };
        let limits = SearchLimits {
            max_depth: depth,
            ..SearchLimits::default()
        };
        let start = Instant::now();
        let result = search(&mut board, &limits, &tt, threads);
        let elapsed_ms = start.elapsed().as_millis();
        total_nodes += result.nodes;
        println!(
            "bench {name} depth {depth} score {} nodes {} time_ms {elapsed_ms}",
            result.score, result.nodes
        );
    }

    let total_ms = bench_start.elapsed().as_millis() as u64;
    let nps = if total_ms == 0 {
        0
    } else {
        total_nodes * 1000 / total_ms
    };
    println!("bench total nodes {total_nodes} time_ms {total_ms} nps {nps}");
}
