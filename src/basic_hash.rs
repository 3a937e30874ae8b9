//! Basic hash: a fast seeded 64-bit hash for keys that are not chosen by
//! an adversary.
//!
//! The input is consumed as little-endian 8-byte words; each word is
//! folded into the state with a 64x64->128 multiply whose high and low
//! halves are xored together. The 16-byte key only ever acts as round
//! material: it seeds the state and the multiplier and re-enters the
//! finalizer. A trailing partial word carries its byte count in the top
//! byte, and the total length is mixed into the initial state, so inputs
//! that differ only by trailing zeros hash differently.
//!
//! Output is stable across runs and platforms. It is not a substitute for
//! [`keyed_hash`](crate::siphash::keyed_hash) when keys come from a peer.

use crate::seed::{key_words, SEED_LEN};

const P0: u64 = 0xa076_1d64_78bd_642f;
const P1: u64 = 0xe703_7ed1_a0b4_28db;
const P2: u64 = 0x8ebc_6af0_9c88_c6e3;

#[inline(always)]
fn folded_multiply(a: u64, b: u64) -> u64 {
    let full = (a as u128).wrapping_mul(b as u128);
    (full as u64) ^ ((full >> 64) as u64)
}

#[inline(always)]
fn mix_word(h: u64, word: u64, multiplier: u64) -> u64 {
    folded_multiply(h ^ word, multiplier).rotate_left(23)
}

/// Hash `bytes` under `key`.
pub fn basic_hash(bytes: &[u8], key: &[u8; SEED_LEN]) -> u64 {
    let (k0, k1) = key_words(key);
    let multiplier = k1 ^ P1;
    let mut h = k0 ^ P2 ^ (bytes.len() as u64).wrapping_mul(P0);

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        h = mix_word(h, u64::from_le_bytes(word), multiplier);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut word = [0u8; 8];
        word[..tail.len()].copy_from_slice(tail);
        let last = u64::from_le_bytes(word) | ((tail.len() as u64) << 56);
        h = mix_word(h, last, multiplier);
    }

    folded_multiply(h ^ k0, k1 ^ P2)
}
