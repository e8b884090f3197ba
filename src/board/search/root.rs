//! Root search: single-threaded alpha-beta loop or parallel root splitting.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use parking_lot::Mutex;

use super::constants::{INFINITY_SCORE, MATE_SCORE};
use super::context::SearchContext;
use super::move_order::order_moves;
use super::negamax::score_to_tt;
use super::SearchResult;
use crate::board::state::Board;
use crate::board::types::Move;
use crate::tt::{Bound, TranspositionTable};

/// Search every root move to `depth`, returning the best move and score.
///
/// With more than one thread, workers draw root-move indices from a shared
/// counter and search on their own board clones with full windows; they
/// cooperate only through the transposition table. The best (score, move)
/// pair is folded under a mutex.
pub(crate) fn search_root(
    board: &mut Board,
    depth: u32,
    threads: usize,
    tt: &TranspositionTable,
    stop: &AtomicBool,
    deadline: Option<Instant>,
) -> SearchResult {
    let moves = board.generate_moves();
    if moves.is_empty() {
        let in_check = board.is_in_check(board.side_to_move());
        return SearchResult {
            best_move: Move::NONE,
            score: if in_check { -MATE_SCORE } else { 0 },
            depth,
            nodes: 0,
        };
    }

    // Promote the table's best move to the front of the root list
    let tt_move = tt.probe(board.hash()).map_or(Move::NONE, |e| e.best_move);
    let ordered = order_moves(&moves, tt_move, None, 0);

    let mut best_score = -INFINITY_SCORE;
    let mut best_move = Move::NONE;
    let total_nodes;

    if threads <= 1 || ordered.len() < 2 {
        let mut context = SearchContext::new(tt, stop, deadline);
        let mut alpha = -INFINITY_SCORE;
        let beta = INFINITY_SCORE;
        for scored in ordered.iter() {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let mv = scored.mv;
            let info = board.make_move(mv);
            let score = -context.alpha_beta(board, depth - 1, -beta, -alpha, 1);
            board.unmake_move(mv, info);
            if stop.load(Ordering::Relaxed) {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        total_nodes = context.nodes;
    } else {
        let next_index = AtomicUsize::new(0);
        let best = Mutex::new((best_score, best_move));
        let next_index_ref = &next_index;
        let best_ref = &best;
        let ordered_ref = &ordered;

        let worker_nodes: Vec<u64> = std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(threads);
            for _ in 0..threads {
                let mut local = board.clone();
                handles.push(scope.spawn(move || {
                    let mut context = SearchContext::new(tt, stop, deadline);
                    loop {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let index = next_index_ref.fetch_add(1, Ordering::Relaxed);
                        if index >= ordered_ref.len() {
                            break;
                        }
                        let mv = ordered_ref.as_slice()[index].mv;
                        let info = local.make_move(mv);
                        let score = -context.alpha_beta(
                            &mut local,
                            depth - 1,
                            -INFINITY_SCORE,
                            INFINITY_SCORE,
                            1,
                        );
                        local.unmake_move(mv, info);
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }

                        let mut guard = best_ref.lock();
                        if score > guard.0 {
                            *guard = (score, mv);
                        }
                    }
                    context.nodes
                }));
            }
            handles
                .into_iter()
                .map(|handle| handle.join().expect("search worker panicked"))
                .collect()
        });

        total_nodes = worker_nodes.iter().sum();
        let guard = best.lock();
        best_score = guard.0;
        best_move = guard.1;
    }

    tt.store(
        board.hash(),
        depth,
        score_to_tt(best_score, 0),
        Bound::Exact,
        best_move,
    );

    SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes: total_nodes,
    }
}
