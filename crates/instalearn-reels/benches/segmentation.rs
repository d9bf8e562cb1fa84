//! Benchmark instalearn_reels::generate() across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use instalearn_reels::{generate_with, split_sentences, RandomChooser};

const PARAGRAPH: &str = "Rust guarantees memory safety without a garbage collector. \
Ownership rules are checked at compile time! Borrowing lets code read data without \
taking it. Lifetimes describe how long references stay valid? Traits define shared behavior.";

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for repeat in [1usize, 10, 100] {
        let text = PARAGRAPH.repeat(repeat);
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            let mut chooser = RandomChooser::seeded(0);
            b.iter(|| generate_with(black_box(text), &mut chooser));
        });
    }
    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(100);
    c.bench_function("split_sentences/500", |b| {
        b.iter(|| split_sentences(black_box(&text)).count());
    });
}

criterion_group!(benches, bench_generate, bench_split);
criterion_main!(benches);
