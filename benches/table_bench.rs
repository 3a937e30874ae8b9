use chain_table::{BytesHasher, EqComparer, HashTable, Item, Owned, Seed, TableConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

type CidTable = HashTable<[u8; 8], BytesHasher, EqComparer, Owned>;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn cid(n: u64) -> [u8; 8] {
    n.to_le_bytes()
}

fn table(seed: Option<Seed>) -> CidTable {
    let mut config = TableConfig::new(4096);
    if let Some(seed) = seed {
        config = config.seed(seed);
    }
    HashTable::with_config(config, BytesHasher, EqComparer, Owned).unwrap()
}

fn bench_insert_10k(c: &mut Criterion) {
    for (name, seed) in [("basic", None), ("siphash24", Some(Seed::new([7; 16])))] {
        c.bench_function(&format!("table::insert_10k/{}", name), |b| {
            b.iter_batched(
                || table(seed),
                |mut t| {
                    for x in lcg(1).take(10_000) {
                        let _ = t.insert(cid(x)).unwrap();
                    }
                    black_box(t)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_retrieve_hit(c: &mut Criterion) {
    for (name, seed) in [("basic", None), ("siphash24", Some(Seed::new([7; 16])))] {
        let mut t = table(seed);
        let keys: Vec<[u8; 8]> = lcg(7).take(10_000).map(cid).collect();
        for k in &keys {
            t.insert(*k).unwrap();
        }
        let mut it = keys.iter().cycle();
        c.bench_function(&format!("table::retrieve_hit/{}", name), |b| {
            b.iter(|| {
                let k = it.next().unwrap();
                black_box(t.retrieve(k))
            })
        });
    }
}

fn bench_retrieve_miss(c: &mut Criterion) {
    let mut t = table(Some(Seed::new([7; 16])));
    for x in lcg(9).take(10_000) {
        t.insert(cid(x)).unwrap();
    }
    let misses: Vec<[u8; 8]> = lcg(11).take(1024).map(cid).collect();
    let mut it = misses.iter().cycle();
    c.bench_function("table::retrieve_miss/siphash24", |b| {
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.retrieve(k))
        })
    });
}

fn bench_delete_reinsert(c: &mut Criterion) {
    c.bench_function("table::delete_reinsert_1k_of_10k", |b| {
        b.iter_batched(
            || {
                let mut t = table(Some(Seed::new([7; 16])));
                let items: Vec<Item> = lcg(5)
                    .take(10_000)
                    .map(|x| t.insert(cid(x)).unwrap())
                    .collect();
                let victims: Vec<Item> = items.into_iter().step_by(10).collect();
                (t, victims)
            },
            |(mut t, victims)| {
                for item in victims {
                    let k = t.detach_item(item);
                    t.insert(k).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_10k,
    bench_retrieve_hit,
    bench_retrieve_miss,
    bench_delete_reinsert
);
criterion_main!(benches);
