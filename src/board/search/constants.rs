//! Search constants.

/// Window bound wider than any reachable score
pub(crate) const INFINITY_SCORE: i32 = 32000;

/// Score of being checkmated at the root; mate-in-N scores count down from
/// here by ply
pub(crate) const MATE_SCORE: i32 = 30000;

/// Scores with absolute value above this are mate distances and get ply
/// adjustment on TT store/load
pub(crate) const MATE_THRESHOLD: i32 = 29000;

/// Maximum search depth and killer-table height
pub(crate) const MAX_PLY: usize = 64;

/// History bonuses saturate here
pub(crate) const HISTORY_MAX: i32 = 1_000_000;

/// Move-ordering score for the transposition-table move
pub(crate) const TT_MOVE_SCORE: i32 = 1_000_000;

/// Workers poll the stop flag and deadline every this many nodes
pub(crate) const STOP_CHECK_INTERVAL: u64 = 4096;
