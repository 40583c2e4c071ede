// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A bank is an ordered list of validated multiple-choice questions.

pub mod bank;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod fingerprint;
pub mod question;

pub use bank::QuestionBank;
pub use fingerprint::Fingerprint;
pub use question::{
    CorrectSet, QuestionDraft, QuestionRecord, ValidationError, MAX_OPTIONS, MIN_OPTIONS,
};
