// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quizbank: a multiple-choice question bank and exam session engine.
//!
//! The bank is a single JSON file ([`store::BankFile`]). [`ops::BankEditor`] and
//! [`transfer::BankTransfer`] mutate it and bump a shared [`ops::ChangeFeed`];
//! [`exam::ExamSession`] draws unseen questions from it and resets when the feed moves.

pub mod exam;
pub mod model;
pub mod ops;
pub mod store;
pub mod transfer;

#[cfg(test)]
mod test_utils;
