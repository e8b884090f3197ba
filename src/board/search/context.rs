//! Per-worker search state: node counter, killers, history, stop plumbing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::constants::{HISTORY_MAX, MAX_PLY, STOP_CHECK_INTERVAL};
use crate::board::types::Move;
use crate::tt::TranspositionTable;

/// Two killer slots per ply, most recent on top.
pub(crate) struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    pub(crate) fn new() -> Self {
        KillerTable {
            slots: [[Move::NONE; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub(crate) fn primary(&self, ply: usize) -> Move {
        self.slots[ply.min(MAX_PLY - 1)][0]
    }

    #[must_use]
    pub(crate) fn secondary(&self, ply: usize) -> Move {
        self.slots[ply.min(MAX_PLY - 1)][1]
    }

    pub(crate) fn update(&mut self, ply: usize, mv: Move) {
        let row = &mut self.slots[ply.min(MAX_PLY - 1)];
        if row[0] != mv {
            row[1] = row[0];
            row[0] = mv;
        }
    }
}

/// From-to indexed bonuses for quiet-move ordering.
pub(crate) struct HistoryTable {
    entries: [[i32; 64]; 64],
}

impl HistoryTable {
    pub(crate) fn new() -> Self {
        HistoryTable {
            entries: [[0; 64]; 64],
        }
    }

    #[must_use]
    pub(crate) fn score(&self, mv: Move) -> i32 {
        self.entries[mv.from().index()][mv.to().index()]
    }

    pub(crate) fn update(&mut self, mv: Move, depth: u32) {
        let bonus = (depth * depth) as i32;
        let entry = &mut self.entries[mv.from().index()][mv.to().index()];
        *entry = (*entry + bonus).min(HISTORY_MAX);
    }
}

/// State owned by a single search worker.
///
/// Killers and history are per-worker; workers cooperate only through the
/// shared transposition table and the stop flag.
pub(crate) struct SearchContext<'a> {
    pub(crate) tt: &'a TranspositionTable,
    pub(crate) nodes: u64,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) stop: &'a AtomicBool,
    pub(crate) deadline: Option<Instant>,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        tt: &'a TranspositionTable,
        stop: &'a AtomicBool,
        deadline: Option<Instant>,
    ) -> Self {
        SearchContext {
            tt,
            nodes: 0,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            stop,
            deadline,
        }
    }

    /// Termination check: the external stop wins immediately; the deadline
    /// is only consulted every `STOP_CHECK_INTERVAL` nodes, and reaching it
    /// sets the stop flag for every other worker.
    pub(crate) fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if self.nodes & (STOP_CHECK_INTERVAL - 1) != 0 {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        if Instant::now() < deadline {
            return false;
        }
        self.stop.store(true, Ordering::Relaxed);
        true
    }

    /// Record a quiet move that caused a beta cutoff.
    pub(crate) fn record_cutoff(&mut self, mv: Move, depth: u32, ply: usize) {
        if mv.is_tactical() {
            return;
        }
        self.killers.update(ply, mv);
        self.history.update(mv, depth);
    }
}
