// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures. Banks are generated without an RNG; only the
// exam benches seed one for drawing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use quizbank::model::{QuestionBank, QuestionDraft};
use quizbank::store::BankFile;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("quizbank_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bank_file(&self) -> BankFile {
        BankFile::new(self.path.join("questions.json"))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn question_count(self) -> usize {
        match self {
            Self::Small => 20,
            Self::Medium => 250,
            Self::Large => 2_000,
        }
    }
}

/// Builds `count` distinct questions with 2..=6 options and one or two correct answers.
pub fn bank(case: Case) -> QuestionBank {
    (0..case.question_count())
        .map(|n| {
            let option_count = 2 + n % 5;
            let options = (0..option_count).map(|o| format!("answer {o} for question {n}"));
            let mut correct = vec![1 + n % option_count];
            if n % 3 == 0 {
                correct.push(1 + (n + 1) % option_count);
            }
            QuestionDraft::new(format!("Question number {n}: which answer is right?"), options)
                .with_correct(correct)
                .into_record()
                .expect("fixture question is valid")
        })
        .collect()
}

pub fn saved_bank(tmp: &TempDir, case: Case) -> BankFile {
    let store = tmp.bank_file();
    store.save(&bank(case)).expect("save fixture bank");
    store
}
