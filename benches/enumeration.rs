/// Split enumeration and name generation benchmarks
///
/// Both run once per measurement run before any directory is created, so
/// they must stay negligible next to the filesystem work.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use id_splits::alphabet::{encode, NameCache};
use id_splits::partition::all_splits;

fn bench_all_splits(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_splits");
    for n in [4usize, 6, 8, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| all_splits(black_box(n)).unwrap());
        });
    }
    group.finish();
}

fn bench_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("names");
    for digits in [1usize, 2, 3, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(digits), &digits, |b, &digits| {
            // Fresh cache each time, otherwise only the memoized lookup is measured
            b.iter(|| {
                let mut cache = NameCache::new(7);
                cache.names(black_box(digits), 2000).unwrap().len()
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_6_digits", |b| {
        b.iter(|| encode(black_box(56_800_235_583), 6));
    });
}

criterion_group!(benches, bench_all_splits, bench_names, bench_encode);
criterion_main!(benches);
