//! HashTable: fixed-bucket chained storage with owned or embedded links.

use crate::config::TableConfig;
use crate::error::{InsertError, TableError};
use crate::item::{Embedded, Item, ItemKey, NodeLocator, Owned, Placement, TableId};
use crate::seed::Seed;
use crate::strategy::{KeyComparer, KeyHasher};
use core::marker::PhantomData;
use slotmap::SlotMap;

/// Chained hash table with a bucket count fixed at construction.
///
/// Nodes live in an arena; each bucket holds the arena key of its newest
/// item and every item's [`ItemLink`](crate::ItemLink) names the next one.
/// Equal keys may coexist: the newest is found first.
pub struct HashTable<K, H, C, P = Owned>
where
    P: Placement<K>,
{
    heads: Box<[Option<ItemKey>]>,
    nodes: SlotMap<ItemKey, P::Node>,
    hasher: H,
    comparer: C,
    placement: P,
    seed: Option<Seed>,
    long_chain_warning: Option<usize>,
    id: TableId,
}

impl<K, H, C> HashTable<K, H, C, Owned>
where
    H: KeyHasher<K>,
    C: KeyComparer<K>,
{
    /// Table that wraps every key in its own node. The hasher sees no seed.
    pub fn new(buckets: usize, hasher: H, comparer: C) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(buckets), hasher, comparer, Owned)
    }
}

impl<K, H, C, L> HashTable<K, H, C, Embedded<L>>
where
    H: KeyHasher<K>,
    C: KeyComparer<K>,
    L: NodeLocator<K>,
{
    /// Table threading chains through links embedded in the keys, hashing
    /// under `seed`.
    pub fn embedded(
        buckets: usize,
        hasher: H,
        comparer: C,
        locator: L,
        seed: Seed,
    ) -> Result<Self, TableError> {
        Self::with_config(
            TableConfig::new(buckets).seed(seed),
            hasher,
            comparer,
            Embedded::new(locator),
        )
    }
}

impl<K, H, C, P> HashTable<K, H, C, P>
where
    H: KeyHasher<K>,
    C: KeyComparer<K>,
    P: Placement<K>,
{
    pub fn with_config(
        config: TableConfig,
        hasher: H,
        comparer: C,
        placement: P,
    ) -> Result<Self, TableError> {
        let buckets = config.buckets;
        if buckets == 0 {
            return Err(TableError::ZeroBuckets);
        }
        let mut heads = Vec::new();
        heads
            .try_reserve_exact(buckets)
            .map_err(|_| TableError::AllocationFailed { buckets })?;
        heads.resize(buckets, None);

        let id = TableId::next();
        log::debug!(
            "{:?}: created with {} buckets (seeded: {})",
            id,
            buckets,
            config.seed.is_some()
        );
        Ok(Self {
            heads: heads.into_boxed_slice(),
            nodes: SlotMap::with_key(),
            hasher,
            comparer,
            placement,
            seed: config.seed,
            long_chain_warning: config.long_chain_warning,
            id,
        })
    }

    #[inline]
    fn bucket_for(&self, key: &K) -> usize {
        let hash = self.hasher.hash(key, self.seed.as_ref());
        (hash % self.heads.len() as u64) as usize
    }

    fn chain(&self, bucket: usize) -> Chain<'_, K, P> {
        Chain {
            nodes: &self.nodes,
            placement: &self.placement,
            cur: self.heads[bucket],
            _key: PhantomData,
        }
    }

    #[inline]
    fn handle(&self, key: ItemKey) -> Item {
        Item {
            key,
            table: self.id,
        }
    }

    /// Link `key` at the head of its bucket.
    ///
    /// Fails only when the placement refuses the key (an embedded key whose
    /// locator finds no link); the key is dropped and the table is left
    /// untouched.
    pub fn insert(&mut self, key: K) -> Result<Item, InsertError> {
        let node = self
            .placement
            .attach(key)
            .ok_or(InsertError::MissingLink)?;
        let bucket = self.bucket_for(self.placement.key(&node));

        let link = self.placement.link(&node);
        link.set_next(self.heads[bucket]);
        link.set_bucket(bucket);
        let slot = self.nodes.insert(node);
        self.heads[bucket] = Some(slot);
        log::trace!("{:?}: linked {:?} into bucket {}", self.id, slot, bucket);

        if let Some(limit) = self.long_chain_warning {
            let len = self.chain_len(bucket);
            if len.checked_sub(1) == Some(limit) {
                log::warn!(
                    "{:?}: bucket {} holds {} items; keys may be colliding on purpose",
                    self.id,
                    bucket,
                    len
                );
            }
        }
        Ok(self.handle(slot))
    }

    /// First item in `probe`'s bucket that the comparer accepts.
    pub fn retrieve(&self, probe: &K) -> Option<Item> {
        let bucket = self.bucket_for(probe);
        self.chain(bucket)
            .find(|(_, node)| self.comparer.matches(self.placement.key(node), probe))
            .map(|(slot, _)| self.handle(slot))
    }

    pub fn contains(&self, probe: &K) -> bool {
        self.retrieve(probe).is_some()
    }

    /// The key behind `item`, or `None` if it was deleted or belongs to a
    /// different table.
    pub fn get(&self, item: Item) -> Option<&K> {
        if item.table != self.id {
            return None;
        }
        self.nodes
            .get(item.key)
            .map(|node| self.placement.key(node))
    }

    /// Unlink `item` and hand its key back to the caller.
    ///
    /// # Panics
    /// If `item` belongs to another table or was already deleted.
    pub fn detach_item(&mut self, item: Item) -> K {
        assert!(
            item.table == self.id,
            "item belongs to a different hash table"
        );
        let node = match self.nodes.remove(item.key) {
            Some(node) => node,
            None => panic!("item is no longer linked in this hash table"),
        };

        let link = self.placement.link(&node);
        let bucket = link.bucket();
        let next = link.next();
        if self.heads[bucket] == Some(item.key) {
            self.heads[bucket] = next;
        } else {
            let prev = self
                .chain(bucket)
                .find(|(_, n)| self.placement.link(n).next() == Some(item.key));
            match prev {
                Some((_, prev)) => self.placement.link(prev).set_next(next),
                None => panic!("item missing from bucket {} chain", bucket),
            }
        }
        log::trace!("{:?}: unlinked {:?} from bucket {}", self.id, item.key, bucket);
        self.placement.release(node)
    }

    /// Unlink `item` and drop its key.
    ///
    /// # Panics
    /// Same as [`detach_item`](Self::detach_item).
    pub fn delete_item(&mut self, item: Item) {
        drop(self.detach_item(item));
    }

    /// Drop every item; the table stays usable.
    pub fn clear(&mut self) {
        log::debug!("{:?}: clearing {} items", self.id, self.nodes.len());
        self.heads.iter_mut().for_each(|head| *head = None);
        self.nodes.clear();
    }

    /// Tear the table down, handing every key back in bucket-chain order.
    pub fn into_keys(mut self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        for bucket in 0..self.heads.len() {
            let mut cur = self.heads[bucket].take();
            while let Some(slot) = cur {
                let node = self
                    .nodes
                    .remove(slot)
                    .expect("bucket chains only reference live nodes");
                cur = self.placement.link(&node).next();
                keys.push(self.placement.release(node));
            }
        }
        keys
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    /// Number of items chained in `bucket`.
    ///
    /// # Panics
    /// If `bucket >= self.bucket_count()`.
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }

    pub fn longest_chain(&self) -> usize {
        (0..self.heads.len())
            .map(|b| self.chain_len(b))
            .max()
            .unwrap_or(0)
    }

    /// Per-bucket chain lengths.
    #[cfg(feature = "stats")]
    pub fn chain_lengths(&self) -> Vec<usize> {
        (0..self.heads.len()).map(|b| self.chain_len(b)).collect()
    }

    /// Items in bucket order, newest first within a bucket.
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            heads: &self.heads,
            bucket: 0,
            chain: Chain {
                nodes: &self.nodes,
                placement: &self.placement,
                cur: None,
                _key: PhantomData,
            },
            table: self.id,
        }
    }
}

impl<K, H, C, P> Drop for HashTable<K, H, C, P>
where
    P: Placement<K>,
{
    fn drop(&mut self) {
        if !self.nodes.is_empty() {
            log::debug!("{:?}: releasing {} items", self.id, self.nodes.len());
        }
    }
}

struct Chain<'a, K, P: Placement<K>> {
    nodes: &'a SlotMap<ItemKey, P::Node>,
    placement: &'a P,
    cur: Option<ItemKey>,
    _key: PhantomData<fn() -> K>,
}

impl<'a, K, P: Placement<K>> Iterator for Chain<'a, K, P> {
    type Item = (ItemKey, &'a P::Node);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cur?;
        let node = &self.nodes[slot];
        self.cur = self.placement.link(node).next();
        Some((slot, node))
    }
}

/// Iterator over `(Item, &K)` in bucket-chain order.
pub struct Iter<'a, K, P: Placement<K>> {
    heads: &'a [Option<ItemKey>],
    bucket: usize,
    chain: Chain<'a, K, P>,
    table: TableId,
}

impl<'a, K: 'a, P: Placement<K>> Iterator for Iter<'a, K, P> {
    type Item = (Item, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((slot, node)) = self.chain.next() {
                let item = Item {
                    key: slot,
                    table: self.table,
                };
                return Some((item, self.chain.placement.key(node)));
            }
            let head = *self.heads.get(self.bucket)?;
            self.bucket += 1;
            self.chain.cur = head;
        }
    }
}
