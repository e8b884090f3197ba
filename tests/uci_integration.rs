//! End-to-end tests against the spawned engine binary.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use sable::board::Board;
use sable::uci::parse_position_command;

fn spawn_engine() -> Child {
    Command::new(env!("CARGO_BIN_EXE_sable"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary")
}

fn run_session(input: &str) -> String {
    let mut child = spawn_engine();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().expect("failed to read output");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn uci_handshake() {
    let output = run_session("uci\nisready\nquit\n");
    assert!(output.contains("id name Sable"));
    assert!(output.contains("option name Threads type spin"));
    assert!(output.contains("uciok"));
    assert!(output.contains("readyok"));
}

#[test]
fn go_returns_legal_bestmove() {
    let mut child = spawn_engine();
    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let mut reader = BufReader::new(stdout);

    stdin
        .write_all(b"position startpos moves e2e4\ngo depth 3\n")
        .unwrap();

    let mut saw_info = false;
    let mut bestmove_line = None;
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).expect("read failed");
        if bytes == 0 {
            break;
        }
        if line.starts_with("info depth") {
            saw_info = true;
        }
        if line.starts_with("bestmove") {
            bestmove_line = Some(line);
            break;
        }
    }

    stdin.write_all(b"quit\n").unwrap();
    let _ = child.wait();

    assert!(saw_info, "no info line before bestmove");
    let bestmove = bestmove_line.expect("no bestmove found");
    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {bestmove}");
    let mv = parts[1];
    assert_ne!(mv, "0000", "engine returned null move");

    // The reported move must be legal in the commanded position
    let mut board = Board::new();
    parse_position_command(&mut board, &["position", "startpos", "moves", "e2e4"]);
    assert!(
        board.parse_move(mv).is_ok(),
        "bestmove not legal in position: {mv}"
    );
}

#[test]
fn debug_extensions_report_position_state() {
    let output = run_session("position startpos moves e2e4\nfen\nincheck\nlegalmoves\nquit\n");

    assert!(
        output.contains("fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"),
        "fen line missing or wrong: {output}"
    );
    assert!(output.contains("incheck 0"));

    let legal_line = output
        .lines()
        .find(|l| l.starts_with("legalmoves"))
        .expect("no legalmoves line");
    // Black has 20 replies to 1.e4
    assert_eq!(legal_line.split_whitespace().count(), 21);
    assert!(legal_line.contains("e7e5"));
}

#[test]
fn incheck_reports_one_when_checked() {
    let output = run_session("position fen 4k3/8/8/8/8/8/4q3/4K3 w - - 0 1\nincheck\nquit\n");
    assert!(output.contains("incheck 1"), "expected check: {output}");
}

#[test]
fn ucinewgame_resets_position() {
    let output = run_session("position startpos moves e2e4\nucinewgame\nfen\nquit\n");
    assert!(output.contains("fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
}

#[test]
fn setoption_threads_is_accepted() {
    // No output expected; the engine must keep serving commands after
    let output = run_session("setoption name Threads value 2\nisready\nquit\n");
    assert!(output.contains("readyok"));
}

#[test]
fn illegal_position_moves_stop_silently() {
    let output = run_session("position startpos moves e2e4 e7e9 d2d4\nfen\nquit\n");
    // e2e4 applied, the illegal token and everything after dropped
    assert!(output.contains("fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"));
}

#[test]
fn bench_subcommand_reports_nodes_and_nps() {
    let output = Command::new(env!("CARGO_BIN_EXE_sable"))
        .args(["bench", "2", "1"])
        .output()
        .expect("failed to run bench");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("bench startpos depth 2"));
    assert!(stdout.contains("bench kiwipete depth 2"));
    assert!(stdout.contains("bench endgame depth 2"));
    assert!(stdout.contains("bench total nodes"));
    assert!(stdout.contains("nps"));
}
