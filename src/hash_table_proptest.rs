#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach
// chain statistics of both placements without feature gates.

use crate::hash_table::HashTable;
use crate::item::{Item, ItemLink};
use crate::seed::Seed;
use crate::strategy::{KeyComparer, KeyHasher};
use crate::Placement;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64),
    Delete(u64),
    Detach(u64),
    Retrieve(u64),
    Clear,
}

// Few distinct keys over few buckets so chains collide and duplicates pile up.
fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u64..12;
    let op = prop_oneof![
        4 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Delete),
        1 => key.clone().prop_map(Op::Detach),
        2 => key.prop_map(Op::Retrieve),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..80)
}

#[derive(Debug)]
struct Record {
    cid: u64,
    serial: u32,
    link: ItemLink,
}

fn record_link(r: &Record) -> Option<&ItemLink> {
    Some(&r.link)
}

fn record_hash(r: &Record, seed: Option<&Seed>) -> u64 {
    crate::keyed_hash(&r.cid.to_le_bytes(), seed.expect("seeded").as_bytes())
}

fn record_eq(a: &Record, b: &Record) -> bool {
    a.cid == b.cid
}

fn probe(cid: u64) -> Record {
    Record {
        cid,
        serial: u32::MAX,
        link: ItemLink::new(),
    }
}

fn reachable<K, H, C, P>(t: &HashTable<K, H, C, P>) -> usize
where
    H: KeyHasher<K>,
    C: KeyComparer<K>,
    P: Placement<K>,
{
    (0..t.bucket_count()).map(|b| t.chain_len(b)).sum()
}

// Property: state-machine equivalence against a per-key stack of handles.
// Invariants exercised across random operation sequences:
// - `len()` equals the number of items reachable from the buckets.
// - `retrieve` returns the newest live item for a key, or `None`.
// - Deleting the newest exposes the previous duplicate.
// - `detach_item` returns the exact record that was inserted.
// - Deleted handles never resolve again.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_embedded_state_machine(ops in arb_ops(), buckets in 1usize..6) {
        let seed = Seed::new([9; 16]);
        let mut sut = HashTable::<Record, _, _, _>::embedded(buckets, record_hash, record_eq, record_link, seed).unwrap();
        let mut model: HashMap<u64, Vec<(Item, u32)>> = HashMap::new();
        let mut stale: Vec<Item> = Vec::new();
        let mut serial = 0u32;

        for op in ops {
            match op {
                Op::Insert(cid) => {
                    serial += 1;
                    let item = sut
                        .insert(Record { cid, serial, link: ItemLink::new() })
                        .unwrap();
                    model.entry(cid).or_default().push((item, serial));
                }
                Op::Delete(cid) => {
                    let found = sut.retrieve(&probe(cid));
                    let newest = model.get_mut(&cid).and_then(|v| v.pop());
                    prop_assert_eq!(found, newest.map(|(item, _)| item));
                    if let Some(item) = found {
                        sut.delete_item(item);
                        stale.push(item);
                    }
                }
                Op::Detach(cid) => {
                    if let Some((item, s)) = model.get_mut(&cid).and_then(|v| v.pop()) {
                        let rec = sut.detach_item(item);
                        prop_assert_eq!(rec.cid, cid);
                        prop_assert_eq!(rec.serial, s);
                        stale.push(item);
                    }
                }
                Op::Retrieve(cid) => {
                    let found = sut.retrieve(&probe(cid));
                    let newest = model.get(&cid).and_then(|v| v.last()).map(|(item, _)| *item);
                    prop_assert_eq!(found, newest);
                    if let Some(item) = found {
                        prop_assert_eq!(sut.get(item).map(|r| r.cid), Some(cid));
                    }
                }
                Op::Clear => {
                    sut.clear();
                    for (_, items) in model.drain() {
                        stale.extend(items.into_iter().map(|(item, _)| item));
                    }
                }
            }

            let live: usize = model.values().map(Vec::len).sum();
            prop_assert_eq!(sut.len(), live);
            prop_assert_eq!(reachable(&sut), live);
            for item in &stale {
                prop_assert!(sut.get(*item).is_none());
            }
        }
    }
}

// Property: owned placement with a hasher that sends everything to one
// bucket; every inserted key stays retrievable until removed.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_single_chain_membership(keys in proptest::collection::vec(0u32..1000, 1..40), remove_every in 1usize..5) {
        let mut sut = HashTable::new(8, |_: &u32, _: Option<&Seed>| 0u64, |a: &u32, b: &u32| a == b).unwrap();
        let items: Vec<(u32, Item)> = keys.iter().map(|&k| (k, sut.insert(k).unwrap())).collect();
        prop_assert_eq!(sut.chain_len(0), keys.len());

        let mut remaining: Vec<u32> = Vec::new();
        for (i, (k, item)) in items.iter().enumerate() {
            if i % remove_every == 0 {
                prop_assert_eq!(sut.detach_item(*item), *k);
            } else {
                remaining.push(*k);
            }
        }
        prop_assert_eq!(sut.len(), remaining.len());
        prop_assert_eq!(sut.chain_len(0), remaining.len());
        for k in &remaining {
            prop_assert!(sut.contains(k));
        }
        for k in keys.iter().filter(|k| !remaining.contains(k)) {
            prop_assert!(!sut.contains(k));
        }
    }
}
