//! Benchmarks for question extraction at varying document sizes.
//!
//! Run with: `cargo bench --bench extract_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use redmark::document::{Block, Line, Page, Span, SpanDocument};
use redmark::{Extractor, LineClassifier};

const RED: u32 = 0xFF0000;
const BLACK: u32 = 0x000000;
const GREEK: [char; 4] = ['α', 'β', 'γ', 'δ'];

/// Generate an exam with `questions` questions of four options each,
/// twenty questions per page, with every third option wrapping onto a
/// continuation line and one red option per question.
fn generate_exam(questions: usize) -> SpanDocument {
    let mut pages = Vec::new();
    let mut lines = Vec::new();

    for q in 0..questions {
        lines.push(Line::new(vec![
            Span::new(format!("{}.", q + 1), BLACK),
            Span::new(" Which of the following statements about the topic is", BLACK),
        ]));
        lines.push(Line::new(vec![Span::new("accurate and complete?", BLACK)]));

        for (i, label) in GREEK.iter().enumerate() {
            let color = if i == q % GREEK.len() { RED } else { BLACK };
            lines.push(Line::new(vec![
                Span::new(format!("{label}."), color),
                Span::new(" A plausible answer with some detail", color),
            ]));
            if i % 3 == 0 {
                lines.push(Line::new(vec![Span::new("that wraps to a second line", color)]));
            }
        }

        if (q + 1) % 20 == 0 {
            pages.push(Page {
                blocks: vec![Block {
                    lines: std::mem::take(&mut lines),
                }],
            });
        }
    }

    if !lines.is_empty() {
        pages.push(Page {
            blocks: vec![Block { lines }],
        });
    }

    SpanDocument::new("bench", pages)
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = Extractor::default();

    for &questions in &[10usize, 100, 1_000] {
        let doc = generate_exam(questions);

        group.throughput(Throughput::Elements(doc.lines().count() as u64));
        group.bench_with_input(BenchmarkId::new("questions", questions), &doc, |b, doc| {
            b.iter(|| black_box(extractor.extract(black_box(doc))));
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let classifier = LineClassifier::default();

    group.bench_function("question", |b| {
        b.iter(|| black_box(classifier.classify(black_box("12. Which of the following"))));
    });
    group.bench_function("option", |b| {
        b.iter(|| black_box(classifier.classify(black_box("β. A plausible answer"))));
    });
    group.bench_function("continuation", |b| {
        b.iter(|| black_box(classifier.classify(black_box("that wraps to a second line"))));
    });

    group.finish();
}

fn bench_read_span_dump(c: &mut Criterion) {
    let mut group = c.benchmark_group("span_dump");
    let router = redmark::ReaderRouter::new();
    let json = serde_json::to_vec(&generate_exam(100)).unwrap();

    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("read_100_questions", |b| {
        b.iter(|| black_box(router.read(black_box(&json), "bench.json").unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_classify, bench_read_span_dump);

criterion_main!(benches);
