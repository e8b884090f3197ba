//! Zobrist hashing keys.
//!
//! Keys are produced by a deterministic 64-bit mixer from a fixed seed, so
//! position hashes are stable across runs and processes. The table is a
//! process-wide singleton initialized on first use.

use once_cell::sync::Lazy;

const SEED: u64 = 0x853c49e6748fea9b;

/// Deterministic mixer (splitmix64) over an advancing state.
fn next_key(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Zobrist key tables for position hashing.
pub struct Zobrist {
    /// Per (color, piece type, square) keys
    pub piece_square: [[[u64; 64]; 6]; 2],
    /// Per castling-rights-mask keys, indexed by the 4-bit mask itself
    pub castling: [u64; 16],
    /// Per en-passant-file keys
    pub en_passant: [u64; 8],
    /// XORed in when Black is to move
    pub side_to_move: u64,
}

impl Zobrist {
    fn build() -> Self {
        let mut state = SEED;
        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color_keys in &mut piece_square {
            for piece_keys in color_keys.iter_mut() {
                for key in piece_keys.iter_mut() {
                    *key = next_key(&mut state);
                }
            }
        }
        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = next_key(&mut state);
        }
        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = next_key(&mut state);
        }
        let side_to_move = next_key(&mut state);

        Zobrist {
            piece_square,
            castling,
            en_passant,
            side_to_move,
        }
    }
}

/// The process-wide Zobrist table.
pub static ZOBRIST: Lazy<Zobrist> = Lazy::new(Zobrist::build);
