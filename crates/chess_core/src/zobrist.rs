//! Zobrist keys for repetition detection.
//!
//! A position hash XORs together one key per (piece, square), one for black
//! to move, one per castling right and one per en passant file. Keys come
//! from a fixed-seed xorshift64 stream so hashes are stable across runs.

use crate::types::{Piece, Square};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut state = 0x5EED_C4E5_50A1_F00Du64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            state = xorshift64(state);
            pieces[i / 384][(i / 64) % 6][i % 64] = state;
            i += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];
        let mut j = 0;
        while j < 12 {
            state = xorshift64(state);
            if j < 4 {
                castling[j] = state;
            } else {
                en_passant[j - 4] = state;
            }
            j += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }

    /// 0 = wk, 1 = wq, 2 = bk, 3 = bq.
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
