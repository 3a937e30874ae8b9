//! Seed: the 16-byte secret handed to hash functions.

use crate::error::SeedError;
use core::fmt;
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Length in bytes of every hash secret in this crate.
pub const SEED_LEN: usize = 16;

/// A fixed-size hash secret.
///
/// Seeds are plain values owned by whoever configures a table or calls a
/// hash primitive; nothing in the crate keeps one in global state, so two
/// tables can run with independent secrets.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub const fn new(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    /// Draw a fresh secret from the operating system.
    ///
    /// Tables keyed with a generated seed place peer-chosen keys in buckets
    /// the peer cannot predict.
    pub fn generate() -> Result<Self, SeedError> {
        let mut bytes = [0u8; SEED_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SeedError::Entropy(e.to_string()))?;
        Ok(Seed(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// The two little-endian 64-bit words the hash rounds consume.
    #[inline]
    pub(crate) fn words(&self) -> (u64, u64) {
        key_words(&self.0)
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }
}

// Never print the secret itself.
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

#[inline]
pub(crate) fn key_words(key: &[u8; SEED_LEN]) -> (u64, u64) {
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&key[..8]);
    hi.copy_from_slice(&key[8..]);
    (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
}
