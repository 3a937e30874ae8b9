//! chain-table: a fixed-bucket chained hash table for keys that may come
//! from an untrusted peer, plus the two hash functions it is built around.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: map externally-influenced keys (connection identifiers and the
//!   like) to records with O(1) expected lookups, while letting the owner
//!   pick a hash that a peer cannot steer.
//! - Layers:
//!   - `basic_hash`: fast seeded 64-bit hash for trusted keys.
//!   - `siphash`: SipHash-2-4, bit-exact with the reference, one-shot
//!     (64 and 128-bit) and streaming.
//!   - `item`: chain links, item handles and the placement strategies
//!     (`Owned` wraps keys, `Embedded` uses a link inside the key).
//!   - `HashTable<K, H, C, P>`: buckets of chains over a slot arena,
//!     configured with a `KeyHasher`, a `KeyComparer` and a `Placement`.
//!
//! Constraints
//! - Single-threaded: links use `Cell`, so tables and embedded keys are
//!   `!Sync`. Callers serialize access.
//! - Bucket count is fixed at construction; there is no rehashing. A
//!   flooded bucket degrades to a linear scan, which is what the keyed
//!   hash is for.
//! - Multi-map: equal keys coexist and the newest is found first.
//! - Handles are generational and stamped with their table, so stale or
//!   foreign handles are caught instead of corrupting a chain.
//!
//! Ownership on removal
//! - `delete_item` drops the key, `detach_item` hands it back.
//! - Dropping the table drops every key, `into_keys` hands them all back.
//!
//! Seeds
//! - A seed is a plain 16-byte value held by the table and passed to the
//!   hasher on every call; nothing keeps one in global state.

pub mod basic_hash;
mod config;
mod error;
pub mod hash_table;
#[cfg(test)]
mod hash_table_proptest;
pub mod item;
mod seed;
pub mod siphash;
pub mod strategy;

// Public surface
pub use basic_hash::basic_hash;
pub use config::TableConfig;
pub use error::{HashError, InsertError, SeedError, TableError};
pub use hash_table::HashTable;
pub use item::{Embedded, Item, ItemLink, NodeLocator, Owned, Placement};
pub use seed::{Seed, SEED_LEN};
pub use siphash::{keyed_hash, keyed_hash_128, keyed_hash_into, SipBuildHasher, SipHasher24};
pub use strategy::{BytesHasher, EqComparer, KeyComparer, KeyHasher, SipKeyHasher};
