//! Benchmarks for the lexing and parsing pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use foolang_core::{AnalysisContext, ContextConfig};

fn synthetic_source(items: usize) -> Vec<u8> {
    let mut source = String::with_capacity(items * 10);
    for i in 0..items {
        if i % 3 == 0 {
            source.push_str("null\n");
        } else {
            source.push_str("example\n");
        }
        if i % 10 == 0 {
            source.push_str("# periodic comment\n");
        }
    }
    source.into_bytes()
}

fn bench_get_from_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_from_buffer");
    for items in [100usize, 1_000, 10_000] {
        let source = synthetic_source(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &source, |b, source| {
            let mut ctx = AnalysisContext::default();
            b.iter(|| {
                let unit = ctx.get_from_buffer("bench.txt", black_box(source));
                black_box(unit.root().map(|root| root.children_count()));
            });
        });
    }
    group.finish();
}

fn bench_without_trivia(c: &mut Criterion) {
    let source = synthetic_source(1_000);
    let config = ContextConfig::builder().with_trivia(false).build().unwrap();
    c.bench_function("get_from_buffer_no_trivia_1000", |b| {
        let mut ctx = AnalysisContext::new(config);
        b.iter(|| {
            let unit = ctx.get_from_buffer("bench.txt", black_box(&source));
            black_box(unit.token_count());
        });
    });
}

fn bench_item_queries(c: &mut Criterion) {
    let source = synthetic_source(1_000);
    let mut ctx = AnalysisContext::default();
    ctx.get_from_buffer("bench.txt", &source);
    c.bench_function("example_items_1000", |b| {
        let unit = ctx.unit("bench.txt").unwrap();
        let root = unit.root().unwrap();
        b.iter(|| black_box(root.example_items().unwrap().len()));
    });
}

criterion_group!(
    benches,
    bench_get_from_buffer,
    bench_without_trivia,
    bench_item_queries
);
criterion_main!(benches);
