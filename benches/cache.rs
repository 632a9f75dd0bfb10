use criterion::{Criterion, criterion_group, criterion_main};
use markdown_ir::cache::highlight::{HighlightCache, PlainTextEngine};

fn bench_highlight_cache_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");
    group.sample_size(20);

    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let cache = HighlightCache::new(Box::new(PlainTextEngine), "plain", 64);
    let code = "fn example() -> i32 {\n    42\n}\n".repeat(20);

    group.bench_function("repeated_highlight_of_same_code", |b| {
        b.iter(|| {
            rt.block_on(async {
                let lines = cache.highlight(std::hint::black_box(&code), Some("rust")).await;
                std::hint::black_box(lines);
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_highlight_cache_hit_rate);
criterion_main!(benches);
