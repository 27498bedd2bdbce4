// HierarchyWalker benchmarks over the in-memory provider

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use criterion::async_executor::AsyncExecutor;
use std::hint::black_box;
use adoscan::model::SizeThreshold;
use adoscan::scanner::HierarchyWalker;
use tokio::runtime::Runtime;

mod common;

struct TokioExecutor(Runtime);

impl AsyncExecutor for TokioExecutor {
    fn block_on<T>(&self, future: impl std::future::Future<Output = T>) -> T {
        self.0.block_on(future)
    }
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walker_walk");
    group.sample_size(20);

    // (projects, repositories per project, files per repository)
    for (projects, repos, files) in [(5, 10, 100), (10, 20, 500)] {
        let walker = HierarchyWalker::new(common::generate_provider(projects, repos, files));
        let total = projects * repos * files;

        group.bench_with_input(BenchmarkId::new("files", total), &walker, |b, walker| {
            b.to_async(TokioExecutor(Runtime::new().unwrap())).iter(|| async {
                let result = walker
                    .walk(SizeThreshold::from_megabytes(1024))
                    .await
                    .unwrap();
                black_box(result.totals().large_file_count)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
