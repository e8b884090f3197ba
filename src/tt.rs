//! Lock-free transposition table.
//!
//! A fixed-capacity, direct-mapped store. Each slot holds the full Zobrist
//! key and a packed data word in two atomic u64s. Writers publish the data
//! word first and release the key after it; readers acquire the key, load
//! the data, then re-check the key to reject torn entries. A mismatched key
//! is a miss. Concurrent probes and stores from search workers need no
//! locks; stale but self-consistent reads are acceptable.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::Move;

/// Bound classification of a stored score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Searched with a full window; the score is exact
    Exact,
    /// Fail-high: the true score is at least the stored score
    Lower,
    /// Fail-low: the true score is at most the stored score
    Upper,
}

impl Bound {
    #[inline]
    const fn bits(self) -> u64 {
        match self {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        }
    }

    #[inline]
    const fn from_bits(bits: u64) -> Bound {
        match bits {
            1 => Bound::Lower,
            2 => Bound::Upper,
            _ => Bound::Exact,
        }
    }
}

/// A decoded transposition-table entry.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    pub bound: Bound,
}

/// Data word layout: move (32 bits) | score (16, as i16) | depth (8) |
/// bound (2).
fn pack(entry: &TtEntry) -> u64 {
    let move_bits = u64::from(entry.best_move.as_u32());
    let score_bits = u64::from(entry.score as i16 as u16) << 32;
    let depth_bits = u64::from(entry.depth as u8) << 48;
    let bound_bits = entry.bound.bits() << 56;
    move_bits | score_bits | depth_bits | bound_bits
}

fn unpack(data: u64) -> TtEntry {
    TtEntry {
        best_move: Move::from_u32(data as u32),
        score: i32::from((data >> 32) as u16 as i16),
        depth: u32::from((data >> 48) as u8),
        bound: Bound::from_bits((data >> 56) & 0x3),
    }
}

struct Slot {
    key: AtomicU64,
    data: AtomicU64,
}

/// Number of slots; must be a power of two for mask indexing.
const SLOT_COUNT: usize = 1 << 18;

/// Fixed-size direct-mapped transposition table with depth-preferred
/// replacement.
pub struct TranspositionTable {
    slots: Vec<Slot>,
    mask: usize,
}

impl TranspositionTable {
    /// Allocate the table as one contiguous block; it is never resized.
    #[must_use]
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(SLOT_COUNT);
        for _ in 0..SLOT_COUNT {
            slots.push(Slot {
                key: AtomicU64::new(0),
                data: AtomicU64::new(0),
            });
        }
        TranspositionTable {
            slots,
            mask: SLOT_COUNT - 1,
        }
    }

    #[inline]
    fn slot(&self, key: u64) -> &Slot {
        &self.slots[(key as usize) & self.mask]
    }

    /// Look up a key. Returns the stored entry if the slot holds it.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        let slot = self.slot(key);
        if slot.key.load(Ordering::Acquire) != key {
            return None;
        }
        let data = slot.data.load(Ordering::Relaxed);
        // Re-check: a concurrent writer may have replaced the slot between
        // the two loads.
        if slot.key.load(Ordering::Acquire) != key {
            return None;
        }
        Some(unpack(data))
    }

    /// Store an entry, replacing when the slot is empty, holds a different
    /// key, or the new depth is at least the stored depth.
    pub fn store(&self, key: u64, depth: u32, score: i32, bound: Bound, best_move: Move) {
        let slot = self.slot(key);
        let stored_key = slot.key.load(Ordering::Acquire);
        if stored_key == key {
            let stored = unpack(slot.data.load(Ordering::Relaxed));
            if depth < stored.depth {
                return;
            }
        }
        let data = pack(&TtEntry {
            best_move,
            score,
            depth,
            bound,
        });
        slot.data.store(data, Ordering::Relaxed);
        slot.key.store(key, Ordering::Release);
    }

    /// Wipe the table (UCI `ucinewgame`).
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.key.store(0, Ordering::Relaxed);
            slot.data.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new()
    }
}
