//! Benchmarks for stamp digest and mining

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hashcash_core::{Engine, Stamp, digest};

fn bench_digest(c: &mut Criterion) {
    let stamp = Stamp::from_parts(1, 3, 1_700_000_000, "client-42", "abcdefghij", 0);
    let input = stamp.serialize();

    c.bench_function("stamp_digest", |b| b.iter(|| digest(black_box(input.as_bytes()))));
}

fn bench_mine(c: &mut Criterion) {
    let engine = Engine::new();

    c.bench_function("mine_difficulty_2", |b| {
        let mut nonce_seed: u32 = 0;
        b.iter(|| {
            nonce_seed = nonce_seed.wrapping_add(1);
            let mut stamp = Stamp::from_parts(
                1,
                2,
                1_700_000_000,
                "client-42",
                format!("bench{nonce_seed}"),
                0,
            );
            engine.mine(black_box(&mut stamp), None)
        })
    });
}

#[cfg(feature = "parallel")]
fn bench_mine_parallel(c: &mut Criterion) {
    let engine = Engine::new();
    let workers = rayon::current_num_threads();

    c.bench_function("mine_parallel_difficulty_3", |b| {
        let mut nonce_seed: u32 = 0;
        b.iter(|| {
            nonce_seed = nonce_seed.wrapping_add(1);
            let mut stamp = Stamp::from_parts(
                1,
                3,
                1_700_000_000,
                "client-42",
                format!("bench{nonce_seed}"),
                0,
            );
            engine.mine_parallel(black_box(&mut stamp), None, workers)
        })
    });
}

#[cfg(feature = "parallel")]
criterion_group!(benches, bench_digest, bench_mine, bench_mine_parallel);
#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_digest, bench_mine);
criterion_main!(benches);
