//! Benchmarks for entropy_keyphrase

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use entropy_keyphrase::*;

/// Sample text for benchmarking
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence that provides systems
the ability to automatically learn and improve from experience without being explicitly
programmed. Machine learning focuses on the development of computer programs that can
access data and use it to learn for themselves.

Deep learning is a subset of machine learning that uses artificial neural networks
with representation learning. Deep learning has been applied to various fields including
computer vision, speech recognition, natural language processing, and drug design.

Natural language processing is a subfield of linguistics, computer science,
and artificial intelligence concerned with the interactions between computers and
human language. Natural language processing techniques are used to analyze and generate
human language. Artificial neural networks power most natural language processing today.
"#;

fn benchmark_document_build(c: &mut Criterion) {
    let config = ExtractorConfig::default();

    let mut group = c.benchmark_group("document_build_by_size");
    for size in [1, 5, 20].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| phrase::extraction::build_document(black_box(text), &config))
        });
    }
    group.finish();
}

fn benchmark_extraction(c: &mut Criterion) {
    let config = ExtractorConfig::default();

    let mut group = c.benchmark_group("extract_by_size");
    for size in [1, 5, 20].iter() {
        let document = phrase::extraction::build_document(&SAMPLE_TEXT.repeat(*size), &config);
        group.throughput(Throughput::Elements(document.size() as u64));

        // reused extractor and pool: steady state without allocation
        let mut extractor = PhraseExtractor::with_config(config.clone());
        let mut pool = PhrasePool::new();
        let mut ids = Vec::new();
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, document| {
            b.iter(|| extractor.extract(black_box(document), &mut pool, &mut ids))
        });
    }
    group.finish();
}

fn benchmark_adjacency(c: &mut Criterion) {
    let config = ExtractorConfig::default();
    let document = phrase::extraction::build_document(&SAMPLE_TEXT.repeat(10), &config);
    let word = document.lookup("learning").unwrap_or(0);
    let positions = document.word_index(word).to_vec();

    c.bench_function("left_adjacent", |b| {
        b.iter(|| left_adjacent(&document, black_box(&positions), 0))
    });
    c.bench_function("right_adjacent", |b| {
        b.iter(|| right_adjacent(&document, black_box(&positions)))
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let config = ExtractorConfig::default();
    let texts: Vec<String> = (0..32).map(|i| SAMPLE_TEXT.repeat(1 + i % 4)).collect();

    let mut group = c.benchmark_group("batch");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            texts
                .iter()
                .map(|t| extract_keyphrases(black_box(t), &config))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| extract_batch(black_box(texts.as_slice()), &config))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_document_build,
    benchmark_extraction,
    benchmark_adjacency,
    benchmark_batch
);
criterion_main!(benches);
