//! Table construction parameters.

use crate::seed::Seed;

/// Construction parameters for a [`HashTable`](crate::HashTable).
///
/// The bucket count is fixed for the life of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub buckets: usize,
    /// Passed to the hasher on every hash computation.
    pub seed: Option<Seed>,
    /// Log a warning when a chain grows past this many items.
    pub long_chain_warning: Option<usize>,
}

impl TableConfig {
    pub fn new(buckets: usize) -> Self {
        TableConfig {
            buckets,
            seed: None,
            long_chain_warning: None,
        }
    }

    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn long_chain_warning(mut self, limit: usize) -> Self {
        self.long_chain_warning = Some(limit);
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::new(64)
    }
}
