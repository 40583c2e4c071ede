// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::bank::QuestionBank;
use super::question::{CorrectSet, QuestionRecord};

pub(crate) fn record(question: &str, options: &[&str], correct: &[usize]) -> QuestionRecord {
    QuestionRecord::new(
        question,
        options.iter().map(|option| (*option).to_owned()).collect(),
        CorrectSet::from_positions(correct.iter().copied()),
    )
    .expect("fixture record")
}

pub(crate) fn arithmetic_bank() -> QuestionBank {
    QuestionBank::from(vec![
        record("2+2?", &["3", "4", "5"], &[2]),
        record("2*2?", &["4", "2", "8", "6"], &[1]),
        record("2-2?", &["0", "nothing", "2"], &[1, 2]),
    ])
}
