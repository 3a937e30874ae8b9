//! Error types for table construction, insertion and the hash primitives.

use thiserror::Error;

/// Construction failures. No table exists after any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("a hash table needs at least one bucket")]
    ZeroBuckets,
    #[error("could not allocate {buckets} buckets")]
    AllocationFailed { buckets: usize },
}

/// Insert failures. The key was not linked and the count is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("the node locator found no item link inside the key")]
    MissingLink,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("keyed hash output must be 8 or 16 bytes, got {0}")]
    UnsupportedOutputLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("operating system entropy unavailable: {0}")]
    Entropy(String),
}
