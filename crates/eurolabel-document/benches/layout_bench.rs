// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the label layout engine. Every edit re-renders the
// preview, so layout plus SVG drawing is the hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use eurolabel_core::{ContentKey, FieldSet, LabelContent, Language, PaperSize, headers_for};
use eurolabel_document::render;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Render the default content in every language on the rectangular label.
fn bench_render_all_languages(c: &mut Criterion) {
    let content = LabelContent::initial();
    let fields = FieldSet::default();

    c.bench_function("render (4 languages, 10x15cm)", |b| {
        b.iter(|| {
            for language in Language::ALL {
                let label = render(
                    black_box(&content),
                    headers_for(language),
                    &fields,
                    PaperSize::Rectangular,
                    language,
                );
                black_box(label.markup);
            }
        });
    });
}

/// Render a label whose ingredient list wraps many times.
fn bench_render_long_ingredients(c: &mut Criterion) {
    let content = LabelContent::initial().with(
        ContentKey::Ingredients,
        "Beef, soy sauce, sugar, salt, spices, yeast extract, garlic powder, ".repeat(12),
    );
    let fields = FieldSet::default();

    c.bench_function("render (long ingredients, 10x10cm)", |b| {
        b.iter(|| {
            let label = render(
                black_box(&content),
                headers_for(Language::De),
                &fields,
                PaperSize::Square,
                Language::De,
            );
            black_box(label.markup);
        });
    });
}

criterion_group!(
    benches,
    bench_render_all_languages,
    bench_render_long_ingredients
);
criterion_main!(benches);
