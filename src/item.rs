//! Item links, item handles and the two node placement strategies.
//!
//! Every linked key is threaded into its bucket chain by an [`ItemLink`].
//! Where that link lives is the placement's business:
//! - [`Owned`]: the table wraps each key in an [`OwnedNode`] that carries
//!   the link next to the key.
//! - [`Embedded`]: the link is a field of the caller's own key structure
//!   and a [`NodeLocator`] finds it; the table stores the key as is.

use core::cell::Cell;
use core::sync::atomic::{AtomicU64, Ordering};

slotmap::new_key_type! {
    /// Arena slot of a linked node.
    pub(crate) struct ItemKey;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TableId(u64);

impl TableId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TableId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an item linked into a particular table.
///
/// Handles are cheap to copy and never dangle: once the item is deleted
/// the handle stops resolving, even if its arena slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Item {
    pub(crate) key: ItemKey,
    pub(crate) table: TableId,
}

/// Chain link threading an item through its bucket.
///
/// Embed one in a key structure to use [`Embedded`] placement. The table
/// updates it through shared references, so it uses `Cell`s; this makes
/// any structure that embeds it `!Sync`, matching the table's
/// single-threaded contract.
#[derive(Debug, Default)]
pub struct ItemLink {
    next: Cell<Option<ItemKey>>,
    bucket: Cell<usize>,
}

impl ItemLink {
    pub const fn new() -> Self {
        ItemLink {
            next: Cell::new(None),
            bucket: Cell::new(0),
        }
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<ItemKey> {
        self.next.get()
    }

    #[inline]
    pub(crate) fn set_next(&self, next: Option<ItemKey>) {
        self.next.set(next);
    }

    #[inline]
    pub(crate) fn bucket(&self) -> usize {
        self.bucket.get()
    }

    #[inline]
    pub(crate) fn set_bucket(&self, bucket: usize) {
        self.bucket.set(bucket);
    }
}

/// Finds the [`ItemLink`] embedded in a key.
///
/// Returning `None` refuses the key; `insert` then fails with
/// [`InsertError::MissingLink`](crate::InsertError::MissingLink). Once a
/// key is linked the locator must keep returning the same link for it.
pub trait NodeLocator<K: ?Sized> {
    fn locate<'k>(&self, key: &'k K) -> Option<&'k ItemLink>;
}

impl<K: ?Sized, F> NodeLocator<K> for F
where
    F: Fn(&K) -> Option<&ItemLink>,
{
    #[inline]
    fn locate<'k>(&self, key: &'k K) -> Option<&'k ItemLink> {
        self(key)
    }
}

/// Where a table keeps the chain link for each key it stores.
pub trait Placement<K> {
    /// What the table stores per item.
    type Node;

    /// Turn a key into a storable node, or refuse it.
    fn attach(&self, key: K) -> Option<Self::Node>;

    fn key<'n>(&self, node: &'n Self::Node) -> &'n K;

    fn link<'n>(&self, node: &'n Self::Node) -> &'n ItemLink;

    /// Hand the key back once its node has been unlinked.
    fn release(&self, node: Self::Node) -> K;
}

/// Table-managed nodes: each key is wrapped with its own link.
#[derive(Clone, Copy, Debug, Default)]
pub struct Owned;

/// Node allocated by an [`Owned`] table.
#[derive(Debug)]
pub struct OwnedNode<K> {
    key: K,
    link: ItemLink,
}

impl<K> Placement<K> for Owned {
    type Node = OwnedNode<K>;

    #[inline]
    fn attach(&self, key: K) -> Option<OwnedNode<K>> {
        Some(OwnedNode {
            key,
            link: ItemLink::new(),
        })
    }

    #[inline]
    fn key<'n>(&self, node: &'n OwnedNode<K>) -> &'n K {
        &node.key
    }

    #[inline]
    fn link<'n>(&self, node: &'n OwnedNode<K>) -> &'n ItemLink {
        &node.link
    }

    #[inline]
    fn release(&self, node: OwnedNode<K>) -> K {
        node.key
    }
}

/// Caller-embedded links, found through a [`NodeLocator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Embedded<L> {
    locator: L,
}

impl<L> Embedded<L> {
    pub fn new(locator: L) -> Self {
        Embedded { locator }
    }
}

impl<K, L> Placement<K> for Embedded<L>
where
    L: NodeLocator<K>,
{
    type Node = K;

    #[inline]
    fn attach(&self, key: K) -> Option<K> {
        self.locator.locate(&key)?;
        Some(key)
    }

    #[inline]
    fn key<'n>(&self, node: &'n K) -> &'n K {
        node
    }

    #[inline]
    fn link<'n>(&self, node: &'n K) -> &'n ItemLink {
        self.locator
            .locate(node)
            .expect("node locator must keep finding the link of a linked key")
    }

    #[inline]
    fn release(&self, node: K) -> K {
        let link = self.link(&node);
        link.set_next(None);
        node
    }
}
