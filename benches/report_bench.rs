// ReportBuilder and sheet layout benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use adoscan::report::{build_report, ReportBuilder, ReportContext};
use time::OffsetDateTime;

mod common;

fn bench_files_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_files_by_size");
    for size in [1_000, 10_000, 100_000] {
        let result = common::generate_result(size);

        group.bench_with_input(BenchmarkId::new("files", size), &result, |b, result| {
            b.iter(|| black_box(ReportBuilder::new(black_box(result)).files_by_size().len()));
        });
    }
    group.finish();
}

fn bench_extension_breakdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_extension_breakdown");
    for size in [1_000, 10_000, 100_000] {
        let result = common::generate_result(size);

        group.bench_with_input(BenchmarkId::new("files", size), &result, |b, result| {
            b.iter(|| black_box(ReportBuilder::new(result).extension_breakdown()));
        });
    }
    group.finish();
}

fn bench_build_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_build");
    let ctx = ReportContext::new("bench", OffsetDateTime::UNIX_EPOCH);
    for size in [1_000, 10_000] {
        let result = common::generate_result(size);

        group.bench_with_input(BenchmarkId::new("files", size), &result, |b, result| {
            b.iter(|| black_box(build_report(result, &ctx)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_files_by_size,
    bench_extension_breakdown,
    bench_build_report
);
criterion_main!(benches);
