//! Hashing and comparison strategies plugged into a table at construction.

use crate::basic_hash::basic_hash;
use crate::seed::{Seed, SEED_LEN};
use crate::siphash::{keyed_hash, SipHasher24};
use core::hash::{Hash, Hasher};

/// Maps a key to a 64-bit hash. The table passes its seed, if it has one,
/// on every call.
pub trait KeyHasher<K: ?Sized> {
    fn hash(&self, key: &K, seed: Option<&Seed>) -> u64;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K, Option<&Seed>) -> u64,
{
    #[inline]
    fn hash(&self, key: &K, seed: Option<&Seed>) -> u64 {
        self(key, seed)
    }
}

/// Decides whether a stored key answers a probe.
pub trait KeyComparer<K: ?Sized> {
    fn matches(&self, stored: &K, probe: &K) -> bool;
}

impl<K: ?Sized, F> KeyComparer<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn matches(&self, stored: &K, probe: &K) -> bool {
        self(stored, probe)
    }
}

/// Hashes the byte form of a key: SipHash-2-4 under the table seed, or the
/// basic hash under an all-zero key when the table has no seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesHasher;

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for BytesHasher {
    #[inline]
    fn hash(&self, key: &K, seed: Option<&Seed>) -> u64 {
        match seed {
            Some(seed) => keyed_hash(key.as_ref(), seed.as_bytes()),
            None => basic_hash(key.as_ref(), &[0; SEED_LEN]),
        }
    }
}

/// Feeds a `Hash` key through the streaming SipHash-2-4 hasher. Unseeded
/// tables use the all-zero seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipKeyHasher;

impl<K: Hash + ?Sized> KeyHasher<K> for SipKeyHasher {
    #[inline]
    fn hash(&self, key: &K, seed: Option<&Seed>) -> u64 {
        let zero = Seed::default();
        let mut h = SipHasher24::new(seed.unwrap_or(&zero));
        key.hash(&mut h);
        h.finish()
    }
}

/// `PartialEq` comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqComparer;

impl<K: PartialEq + ?Sized> KeyComparer<K> for EqComparer {
    #[inline]
    fn matches(&self, stored: &K, probe: &K) -> bool {
        stored == probe
    }
}
