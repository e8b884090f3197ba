//! Universal Chess Interface (UCI) protocol support.
//!
//! Command tokenisation lives in [`command`]; this module handles the
//! `position` and `setoption` payloads against a [`Board`].

use std::fmt;

use crate::board::{Board, FenError};

pub mod command;

pub use command::{parse_go_params, parse_uci_command, GoParams, UciCommand};

/// Error type for UCI position command parsing
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Apply a `position` command.
///
/// Supports `position startpos [moves ...]` and
/// `position fen <fields> [moves ...]`. A bad FEN leaves the board
/// untouched. An illegal move in the list stops further application
/// silently; the board keeps every move made up to that point.
pub fn apply_position_command(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    if parts.len() < 2 {
        return Err(UciError::MissingParts);
    }

    let mut index = 2;
    let parsed = if parts[1] == "startpos" {
        Board::new()
    } else if parts[1] == "fen" {
        let fen_fields: Vec<&str> = parts[2..]
            .iter()
            .take_while(|tok| **tok != "moves")
            .copied()
            .collect();
        index += fen_fields.len();
        Board::try_from_fen(&fen_fields.join(" "))?
    } else {
        return Err(UciError::MissingParts);
    };
    *board = parsed;

    if parts.get(index) == Some(&"moves") {
        for token in &parts[index + 1..] {
            if board.make_move_uci(token).is_err() {
                break;
            }
        }
    }

    Ok(())
}

/// Apply a `position` command, logging failures to stderr.
pub fn parse_position_command(board: &mut Board, parts: &[&str]) {
    if let Err(e) = apply_position_command(board, parts) {
        eprintln!("Error: {e}");
    }
}

/// Extract the value of `setoption name Threads value N`, if present and
/// well-formed. The returned count is clamped to at least 1.
#[must_use]
pub fn parse_threads_option(parts: &[&str]) -> Option<usize> {
    let mut name_index = None;
    let mut value_index = None;
    for (i, tok) in parts.iter().enumerate() {
        if *tok == "name" && i + 1 < parts.len() {
            name_index = Some(i + 1);
        } else if *tok == "value" && i + 1 < parts.len() {
            value_index = Some(i + 1);
        }
    }
    let (name_index, value_index) = (name_index?, value_index?);
    if value_index <= name_index {
        return None;
    }
    let name = parts[name_index..value_index - 1].join(" ");
    if name != "Threads" {
        return None;
    }
    parts[value_index]
        .parse::<usize>()
        .ok()
        .map(|n| n.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Square};

    #[test]
    fn test_position_startpos() {
        let mut board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 1");
        apply_position_command(&mut board, &["position", "startpos"]).unwrap();
        assert_eq!(board.to_fen(), Board::new().to_fen());
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let mut board = Board::new();
        apply_position_command(
            &mut board,
            &["position", "startpos", "moves", "e2e4", "e7e5", "g1f3"],
        )
        .unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.fullmove_number(), 2);
        assert!(board.piece_at(Square::new(2, 5)).is_some()); // knight on f3
    }

    #[test]
    fn test_position_fen_with_moves() {
        let mut board = Board::new();
        apply_position_command(
            &mut board,
            &[
                "position", "fen", "4k3/8/8/8/8/8/4P3/4K3", "w", "-", "-", "0", "1", "moves",
                "e2e4",
            ],
        )
        .unwrap();
        assert!(board.piece_at(Square::new(3, 4)).is_some());
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn test_position_illegal_move_stops_silently() {
        let mut board = Board::new();
        apply_position_command(
            &mut board,
            &["position", "startpos", "moves", "e2e4", "e7e9", "d2d4"],
        )
        .unwrap();
        // e2e4 applied, the rest dropped
        assert_eq!(board.side_to_move(), Color::Black);
        assert!(board.piece_at(Square::new(3, 3)).is_none());
    }

    #[test]
    fn test_position_bad_fen_keeps_board() {
        let mut board = Board::new();
        let before = board.to_fen();
        let result = apply_position_command(&mut board, &["position", "fen", "garbage"]);
        assert!(result.is_err());
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn test_position_missing_parts() {
        let mut board = Board::new();
        assert!(apply_position_command(&mut board, &["position"]).is_err());
        assert!(apply_position_command(&mut board, &["position", "nonsense"]).is_err());
    }

    #[test]
    fn test_parse_threads_option() {
        assert_eq!(
            parse_threads_option(&["setoption", "name", "Threads", "value", "8"]),
            Some(8)
        );
        // Clamped to at least one worker
        assert_eq!(
            parse_threads_option(&["setoption", "name", "Threads", "value", "0"]),
            Some(1)
        );
        assert_eq!(
            parse_threads_option(&["setoption", "name", "Hash", "value", "64"]),
            None
        );
        assert_eq!(parse_threads_option(&["setoption", "name", "Threads"]), None);
        assert_eq!(
            parse_threads_option(&["setoption", "name", "Threads", "value", "abc"]),
            None
        );
    }
}
