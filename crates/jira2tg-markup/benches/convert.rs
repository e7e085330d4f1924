use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jira2tg_markup::{Converter, Options, convert};
mod common;

fn bench_issue_descriptions(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.sample_size(20);

    for repeats in [1, 10, 100] {
        let content = common::generate_issue_description(repeats);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("issue_description", repeats),
            &content,
            |b, content| {
                b.iter(|| {
                    let output = convert(std::hint::black_box(content));
                    std::hint::black_box(output);
                });
            },
        );
    }

    group.finish();
}

fn bench_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_text");
    group.sample_size(20);

    let content = common::generate_plain_text(1000);
    let converter = Converter::new(Options::default());
    group.bench_function("escape_only", |b| {
        b.iter(|| {
            let output = converter.convert(std::hint::black_box(&content));
            std::hint::black_box(output);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_issue_descriptions, bench_plain_text);
criterion_main!(benches);
