use criterion::{Criterion, criterion_group, criterion_main};
use markdown_ir::{ParseOptions, parse};
mod common;

fn bench_one_shot_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    for sections in [10, 100] {
        let content = common::generate_markdown_document(sections);
        group.bench_function(format!("parse_{sections}_sections"), |b| {
            b.iter(|| {
                let doc = parse(std::hint::black_box(content.as_str()), ParseOptions::default()).unwrap();
                std::hint::black_box(doc);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_one_shot_parse);
criterion_main!(benches);
