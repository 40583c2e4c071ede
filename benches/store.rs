// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use quizbank::store::{encode_document, parse_document};

mod fixtures;

use fixtures::{Case, TempDir};

// Benchmark identity (keep stable):
// - Group names in this file: `store.load_bank`, `store.save_bank`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `parse_only_small`, `io_medium`).
fn benches_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.load_bank");

    for (id, case) in [
        ("small", Case::Small),
        ("medium", Case::Medium),
        ("large", Case::Large),
    ] {
        let text = encode_document(&fixtures::bank(case)).expect("encode_document");
        group.bench_function(format!("parse_only_{id}"), |b| {
            b.iter(|| {
                let parsed = parse_document(black_box(&text)).expect("parse_document");
                black_box(parsed.bank.len())
            })
        });

        let tmp = TempDir::new(&format!("store_load_{id}"));
        let store = fixtures::saved_bank(&tmp, case);
        group.bench_function(format!("io_{id}"), |b| {
            b.iter(|| black_box(store.load().len()))
        });
    }

    group.finish();
}

fn benches_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.save_bank");

    for (id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let bank = fixtures::bank(case);
        let encode_bank = bank.clone();
        group.bench_function(format!("encode_only_{id}"), move |b| {
            b.iter(|| black_box(encode_document(black_box(&encode_bank)).expect("encode").len()))
        });
        group.bench_function(format!("io_{id}"), move |b| {
            b.iter_batched_ref(
                || TempDir::new(&format!("store_save_{id}")),
                |tmp| {
                    let store = tmp.bank_file();
                    store.save(black_box(&bank)).expect("save");
                    black_box(std::fs::metadata(store.path()).expect("bank metadata").len())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = benches_load, benches_save
);
criterion_main!(benches);
