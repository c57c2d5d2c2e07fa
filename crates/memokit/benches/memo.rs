use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memokit::workload::{fibonacci, RangeSum};
use memokit::{RecencyCache, SelfAdjustingTree};

fn bench_cache_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("recency_cache_hit", |b| {
        let mut cache = RecencyCache::new(1000).unwrap();
        for k in 0..1000u64 {
            cache.store(k, k);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.lookup(&(counter % 1000)));
            counter += 1;
        });
    });

    group.bench_function("splay_tree_hit", |b| {
        let mut tree = SelfAdjustingTree::new();
        for k in 0..1000u64 {
            tree.insert(k, k);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(tree.search(&(counter % 1000)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_cache_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("recency_cache_evicting", |b| {
        // Small cache
        let mut cache = RecencyCache::new(100).unwrap();

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.store(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci");
    group.sample_size(50);

    group.bench_function("fib_150_recency_cache", |b| {
        b.iter(|| {
            let mut cache = RecencyCache::new(256).unwrap();
            black_box(fibonacci(150, &mut cache).unwrap());
        });
    });

    group.bench_function("fib_150_splay_tree", |b| {
        b.iter(|| {
            let mut tree = SelfAdjustingTree::new();
            black_box(fibonacci(150, &mut tree).unwrap());
        });
    });

    group.finish();
}

fn bench_range_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("repeated_query_cached", |b| {
        let data = vec![1u64; 10_000];
        let mut sums = RangeSum::new(data, RecencyCache::new(1000).unwrap());

        let mut counter = 0usize;
        b.iter(|| {
            let left = counter % 100;
            black_box(sums.query(left, left + 9_000).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cache_lookup,
    bench_cache_store,
    bench_fibonacci,
    bench_range_sum
);
criterion_main!(benches);
