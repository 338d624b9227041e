use criterion::{black_box, criterion_group, criterion_main, Criterion};
use latchkey::{Lifetime, Registry, Symbol};
use std::sync::Arc;

const ANSWER: Symbol = Symbol::new("answer");

fn bench_singleton_hit(c: &mut Criterion) {
    let registry = Registry::new();
    registry.register_instance(42u64).unwrap();
    // Prime the cache.
    let _ = registry.resolve::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = registry.resolve::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_transient_construction(c: &mut Criterion) {
    struct Payload {
        data: Vec<u64>,
    }

    let registry = Registry::new();
    registry
        .register_transient::<Payload, _>(|_| {
            Ok(Payload {
                data: (0..64).collect(),
            })
        })
        .unwrap();

    c.bench_function("transient_construct_payload", |b| {
        b.iter(|| {
            let v = registry.resolve::<Payload>().unwrap();
            black_box(v.data.len());
        })
    });
}

fn bench_key_hit(c: &mut Criterion) {
    let registry = Registry::new();
    registry.register_instance(42u64).unwrap();
    registry.bind_key::<u64>(ANSWER).unwrap();
    let _ = registry.resolve_key(ANSWER).unwrap();

    c.bench_function("key_hit_u64", |b| {
        b.iter(|| {
            let v = registry.resolve_key_as::<u64>(ANSWER).unwrap();
            black_box(v);
        })
    });
}

fn bench_dependency_chain(c: &mut Criterion) {
    struct Leaf;
    struct Mid {
        _leaf: Arc<Leaf>,
    }
    struct Root {
        _mid: Arc<Mid>,
    }

    let registry = Registry::new();
    registry.register_instance(Leaf).unwrap();
    registry
        .register_supplier::<Mid, _>(Lifetime::Transient, |r| {
            Ok(Mid {
                _leaf: r.resolve::<Leaf>()?,
            })
        })
        .unwrap();
    registry
        .register_supplier::<Root, _>(Lifetime::Transient, |r| {
            Ok(Root {
                _mid: r.resolve::<Mid>()?,
            })
        })
        .unwrap();

    c.bench_function("transient_chain_depth_3", |b| {
        b.iter(|| {
            let v = registry.resolve::<Root>().unwrap();
            black_box(v);
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_transient_construction,
    bench_key_hit,
    bench_dependency_chain
);
criterion_main!(benches);
