use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;
use yautja_tablet::translate::pattern_dump;
use yautja_tablet::{translate, Document, EditEngine, EditEvent, GlyphCodec, RowLayout};

const SAMPLE: &str = "THE HUNTER WALKS AMONG US\nLEAVE NO TRACE 0123456789\n";

fn bench_translate(c: &mut Criterion) {
    let codec = GlyphCodec::standard();
    let document = Document::from_text(&SAMPLE.repeat(64), &codec);

    let mut group = c.benchmark_group("translate");
    group.bench_function("translate_document", |b| {
        b.iter(|| translate(black_box(&document), &codec));
    });
    group.bench_function("pattern_dump", |b| {
        b.iter(|| pattern_dump(black_box(&document)));
    });
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let codec = Arc::new(GlyphCodec::standard());

    let mut group = c.benchmark_group("edit_engine");
    group.bench_function("type_over_document", |b| {
        b.iter_batched(
            || EditEngine::with_text(codec.clone(), RowLayout::default(), &SAMPLE.repeat(16)),
            |mut engine| {
                for ch in SAMPLE.chars().cycle().take(512) {
                    engine.apply(EditEvent::Type(ch));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_translate, bench_typing);
criterion_main!(benches);
