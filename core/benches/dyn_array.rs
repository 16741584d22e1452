//! Benchmarks for DynArray vs SmallVec vs Vec
//!
//! Run with: `cargo bench --bench dyn_array`

use bumpalo::Bump;
use contig_core::DynArray;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smallvec::SmallVec;

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");

    for size in [8, 64, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &size| {
            b.iter(|| {
                let mut arr = DynArray::new();
                for i in 0..size {
                    arr.push_back(black_box(i as u64));
                }
                black_box(arr);
            });
        });

        group.bench_with_input(BenchmarkId::new("DynArray<&Bump>", size), &size, |b, &size| {
            let mut arena = Bump::new();
            b.iter(|| {
                {
                    let mut arr = DynArray::new_in(&arena);
                    for i in 0..size {
                        arr.push_back(black_box(i as u64));
                    }
                    black_box(&arr);
                }
                arena.reset();
            });
        });

        group.bench_with_input(BenchmarkId::new("SmallVec<16>", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = SmallVec::<[u64; 16]>::new();
                for i in 0..size {
                    vec.push(black_box(i as u64));
                }
                black_box(vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size {
                    vec.push(black_box(i as u64));
                }
                black_box(vec);
            });
        });
    }

    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");

    for size in [16, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &size| {
            b.iter(|| {
                let mut arr = DynArray::new();
                for i in 0..size {
                    arr.insert(0, black_box(i as u32));
                }
                black_box(arr);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size {
                    vec.insert(0, black_box(i as u32));
                }
                black_box(vec);
            });
        });
    }

    group.finish();
}

fn bench_insert_n_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_n_middle");

    for count in [1, 32, 512] {
        group.bench_with_input(BenchmarkId::new("DynArray", count), &count, |b, &count| {
            let base: DynArray<u32> = (0..1024).collect();
            b.iter(|| {
                let mut arr = base.clone();
                arr.insert_n(512, count, black_box(7));
                black_box(arr);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", count), &count, |b, &count| {
            let base: Vec<u32> = (0..1024).collect();
            b.iter(|| {
                let mut vec = base.clone();
                vec.splice(512..512, std::iter::repeat_n(black_box(7), count));
                black_box(vec);
            });
        });
    }

    group.finish();
}

fn bench_erase_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_range");

    group.bench_function("DynArray", |b| {
        let base: DynArray<String> = (0..1024).map(|i| i.to_string()).collect();
        b.iter(|| {
            let mut arr = base.clone();
            arr.erase_range(100, 900);
            black_box(arr);
        });
    });

    group.bench_function("Vec", |b| {
        let base: Vec<String> = (0..1024).map(|i| i.to_string()).collect();
        b.iter(|| {
            let mut vec = base.clone();
            vec.drain(100..900);
            black_box(vec);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push,
    bench_insert_front,
    bench_insert_n_middle,
    bench_erase_range
);
criterion_main!(benches);
