//! SipHash-2-4, bit-compatible with the reference construction.
//!
//! Two compression rounds per 8-byte little-endian block, four
//! finalization rounds, and the message length (mod 256) in the top byte
//! of the final block. Both the 64-bit and the 128-bit outputs are
//! provided, as well as a streaming [`Hasher`] so the keyed hash can back
//! ordinary `HashMap`s.

use crate::error::HashError;
use crate::seed::{key_words, Seed, SEED_LEN};
use core::hash::{BuildHasher, Hasher};

const C0: u64 = 0x736f_6d65_7073_6575;
const C1: u64 = 0x646f_7261_6e64_6f6d;
const C2: u64 = 0x6c79_6765_6e65_7261;
const C3: u64 = 0x7465_6462_7974_6573;

#[derive(Clone, Copy, Debug)]
struct State {
    v0: u64,
    v1: u64,
    v2: u64,
    v3: u64,
}

impl State {
    fn new(k0: u64, k1: u64, wide: bool) -> Self {
        let mut s = State {
            v0: k0 ^ C0,
            v1: k1 ^ C1,
            v2: k0 ^ C2,
            v3: k1 ^ C3,
        };
        if wide {
            s.v1 ^= 0xee;
        }
        s
    }

    #[inline(always)]
    fn round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v1 = self.v1.rotate_left(13);
        self.v1 ^= self.v0;
        self.v0 = self.v0.rotate_left(32);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v3 = self.v3.rotate_left(16);
        self.v3 ^= self.v2;
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v3 = self.v3.rotate_left(21);
        self.v3 ^= self.v0;
        self.v2 = self.v2.wrapping_add(self.v1);
        self.v1 = self.v1.rotate_left(17);
        self.v1 ^= self.v2;
        self.v2 = self.v2.rotate_left(32);
    }

    #[inline(always)]
    fn compress(&mut self, m: u64) {
        self.v3 ^= m;
        self.round();
        self.round();
        self.v0 ^= m;
    }

    #[inline(always)]
    fn fold(&self) -> u64 {
        self.v0 ^ self.v1 ^ self.v2 ^ self.v3
    }

    fn finish64(mut self, last: u64) -> u64 {
        self.compress(last);
        self.v2 ^= 0xff;
        for _ in 0..4 {
            self.round();
        }
        self.fold()
    }

    fn finish128(mut self, last: u64) -> u128 {
        self.compress(last);
        self.v2 ^= 0xee;
        for _ in 0..4 {
            self.round();
        }
        let lo = self.fold();
        self.v1 ^= 0xdd;
        for _ in 0..4 {
            self.round();
        }
        let hi = self.fold();
        (lo as u128) | ((hi as u128) << 64)
    }
}

#[inline(always)]
fn load_le(chunk: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word[..chunk.len()].copy_from_slice(chunk);
    u64::from_le_bytes(word)
}

// Absorb every full block; return the state and the padded last block.
fn absorb(bytes: &[u8], key: &[u8; SEED_LEN], wide: bool) -> (State, u64) {
    let (k0, k1) = key_words(key);
    let mut state = State::new(k0, k1, wide);
    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        state.compress(load_le(chunk));
    }
    let last = load_le(chunks.remainder()) | ((bytes.len() as u64) << 56);
    (state, last)
}

/// SipHash-2-4 of `bytes` under `key`, as the little-endian value of the
/// 8-byte digest.
pub fn keyed_hash(bytes: &[u8], key: &[u8; SEED_LEN]) -> u64 {
    let (state, last) = absorb(bytes, key, false);
    state.finish64(last)
}

/// SipHash-2-4 with 16 bytes of output. The low 64 bits are the first
/// eight digest bytes.
pub fn keyed_hash_128(bytes: &[u8], key: &[u8; SEED_LEN]) -> u128 {
    let (state, last) = absorb(bytes, key, true);
    state.finish128(last)
}

/// Write the digest into `out`, whose length selects the variant.
pub fn keyed_hash_into(bytes: &[u8], key: &[u8; SEED_LEN], out: &mut [u8]) -> Result<(), HashError> {
    match out.len() {
        8 => out.copy_from_slice(&keyed_hash(bytes, key).to_le_bytes()),
        16 => out.copy_from_slice(&keyed_hash_128(bytes, key).to_le_bytes()),
        n => return Err(HashError::UnsupportedOutputLength(n)),
    }
    Ok(())
}

/// Streaming SipHash-2-4.
///
/// Feeding the same bytes through any number of `write` calls gives the
/// same result as [`keyed_hash`] over their concatenation.
#[derive(Clone, Debug)]
pub struct SipHasher24 {
    state: State,
    tail: u64,
    ntail: usize,
    length: usize,
}

impl SipHasher24 {
    pub fn new(seed: &Seed) -> Self {
        let (k0, k1) = seed.words();
        SipHasher24 {
            state: State::new(k0, k1, false),
            tail: 0,
            ntail: 0,
            length: 0,
        }
    }
}

impl Hasher for SipHasher24 {
    fn write(&mut self, msg: &[u8]) {
        self.length = self.length.wrapping_add(msg.len());
        let mut rest = msg;

        if self.ntail != 0 {
            let take = (8 - self.ntail).min(rest.len());
            self.tail |= load_le(&rest[..take]) << (8 * self.ntail);
            self.ntail += take;
            rest = &rest[take..];
            if self.ntail < 8 {
                return;
            }
            self.state.compress(self.tail);
            self.tail = 0;
            self.ntail = 0;
        }

        let mut chunks = rest.chunks_exact(8);
        for chunk in &mut chunks {
            self.state.compress(load_le(chunk));
        }
        let rem = chunks.remainder();
        self.tail = load_le(rem);
        self.ntail = rem.len();
    }

    fn finish(&self) -> u64 {
        let last = self.tail | ((self.length as u64) << 56);
        self.state.finish64(last)
    }
}

/// `BuildHasher` producing [`SipHasher24`] instances keyed by one seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipBuildHasher {
    seed: Seed,
}

impl SipBuildHasher {
    pub fn new(seed: Seed) -> Self {
        SipBuildHasher { seed }
    }
}

impl BuildHasher for SipBuildHasher {
    type Hasher = SipHasher24;

    fn build_hasher(&self) -> SipHasher24 {
        SipHasher24::new(&self.seed)
    }
}
