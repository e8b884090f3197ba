//! Search: iterative deepening over a negamax alpha-beta core.
//!
//! Features:
//! - Iterative deepening with a wall-clock deadline and external stop flag
//! - Alpha-beta with transposition-table cutoffs and null-move pruning
//! - Quiescence search with stand-pat
//! - Move ordering (TT move, MVV-LVA, promotions, killers, history)
//! - Parallel root search: workers pull root moves from a shared counter

mod constants;
mod context;
mod move_order;
mod negamax;
mod root;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::state::Board;
use super::types::Move;
use crate::tt::TranspositionTable;

pub(crate) use constants::MAX_PLY;

/// Limits for one search request.
#[derive(Clone, Default)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth; 0 means unbounded (capped at 64)
    pub max_depth: u32,
    /// Wall-clock budget in milliseconds; 0 means no deadline
    pub time_ms: u64,
    /// Bypass the depth cap entirely (runs until stopped)
    pub infinite: bool,
    /// External cancellation flag, shared with the caller
    pub stop: Option<Arc<AtomicBool>>,
}

/// Outcome of a search: the move believed best, its score in centipawns
/// from the searched side's perspective, the depth reached, and nodes
/// visited.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

/// Run an iteratively deepened search under `limits`.
///
/// Each depth re-searches the root; the last fully completed depth wins.
/// An iteration cut short by the stop flag or the deadline is discarded,
/// unless no iteration completed at all.
pub fn search(
    board: &mut Board,
    limits: &SearchLimits,
    tt: &TranspositionTable,
    threads: usize,
) -> SearchResult {
    let local_stop = AtomicBool::new(false);
    let stop: &AtomicBool = limits.stop.as_deref().unwrap_or(&local_stop);

    let deadline = if limits.time_ms > 0 {
        Some(Instant::now() + Duration::from_millis(limits.time_ms))
    } else {
        None
    };

    let max_depth = if limits.infinite {
        u32::MAX
    } else if limits.max_depth == 0 {
        MAX_PLY as u32
    } else {
        limits.max_depth
    };

    let mut result = SearchResult {
        best_move: Move::NONE,
        score: 0,
        depth: 0,
        nodes: 0,
    };
    let mut best = result;
    let mut have_best = false;
    let mut total_nodes = 0u64;

    for depth in 1..=max_depth {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                break;
            }
        }
        result = root::search_root(board, depth, threads, tt, stop, deadline);
        total_nodes += result.nodes;
        result.nodes = total_nodes;
        if stop.load(Ordering::Relaxed) {
            if !have_best {
                best = result;
            }
            break;
        }
        best = result;
        have_best = true;
    }

    if have_best {
        best
    } else {
        result
    }
}

/// Convenience wrapper: fixed-depth search with no time limit.
pub fn search_to_depth(
    board: &mut Board,
    max_depth: u32,
    tt: &TranspositionTable,
    threads: usize,
) -> SearchResult {
    let limits = SearchLimits {
        max_depth,
        ..SearchLimits::default()
    };
    search(board, &limits, tt, threads)
}
