//! Sable is a UCI chess engine.
//!
//! The crate provides:
//! - Bitboard-based board representation with incremental make/undo
//! - Fully legal move generation (castling, en passant, promotions)
//! - Negamax alpha-beta search with quiescence, null-move pruning,
//!   killer/history move ordering, and a parallel root search
//! - A lock-free transposition table keyed by Zobrist hashes
//! - A FEN codec and a UCI text front-end
//!
//! # Quick Start
//!
//! ```
//! use sable::board::{Board, search_to_depth};
//! use sable::tt::TranspositionTable;
//!
//! let mut board = Board::new();
//!
//! // Generate all legal moves
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//!
//! // Find the best move at depth 4 on one thread
//! let tt = TranspositionTable::new();
//! let result = search_to_depth(&mut board, 4, &tt, 1);
//! assert!(!result.best_move.is_none());
//! ```
//!
//! # Building Positions
//!
//! ```
//! use sable::board::Board;
//!
//! // From FEN notation
//! let board = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
//!     .unwrap();
//! assert!(board.en_passant_square().is_some());
//! ```
//!
//! # Making Moves
//!
//! ```
//! use sable::board::Board;
//!
//! let mut board = Board::new();
//! board.make_move_uci("e2e4").unwrap();
//! board.make_move_uci("e7e5").unwrap();
//! assert_eq!(board.fullmove_number(), 2);
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for `Piece`, `Color`, `Square`, `Move`,
//!   and `CastlingRights`

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod sync;
pub mod tt;
pub mod uci;
pub mod zobrist;
