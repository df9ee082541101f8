//! Zobrist keys for repetition detection.
//!
//! A position's key XORs together one random value per occupied
//! (piece, square) pair, one for Black to move, one per castling-rights
//! combination and one per en-passant file. Keys are generated at compile
//! time from a fixed seed so hashes are identical across runs.

use crate::board::Position;
use crate::types::{Color, Piece};

pub struct ZobristKeys {
    /// Indexed by `color * 6 + kind`, then square.
    pieces: [[u64; 64]; 12],
    black_to_move: u64,
    /// One key per castling bit pattern.
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut state = seed;

        let mut pieces = [[0u64; 64]; 12];
        let mut p = 0;
        while p < 12 {
            let mut s = 0;
            while s < 64 {
                let (next, value) = splitmix64(state);
                state = next;
                pieces[p][s] = value;
                s += 1;
            }
            p += 1;
        }

        let (next, black_to_move) = splitmix64(state);
        state = next;

        let mut castling = [0u64; 16];
        let mut i = 1; // no rights hashes to zero
        while i < 16 {
            let (next, value) = splitmix64(state);
            state = next;
            castling[i] = value;
            i += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut f = 0;
        while f < 8 {
            let (next, value) = splitmix64(state);
            state = next;
            en_passant_file[f] = value;
            f += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline]
    pub fn piece(&self, pc: Piece, sq: u8) -> u64 {
        self.pieces[pc.color.idx() * 6 + pc.kind.idx()][sq as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x6D69_6E69_6D61_7821);

impl Position {
    /// Full recomputation of the position key.
    pub fn zobrist_hash(&self) -> u64 {
        let mut h = 0u64;
        for (s, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= ZOBRIST.piece(*pc, s as u8);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.black_to_move;
        }
        h ^= ZOBRIST.castling[self.castling.bits() as usize];
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.en_passant_file[(ep % 8) as usize];
        }
        h
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
