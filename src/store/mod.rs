// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the question bank on disk.
//!
//! The bank lives in one JSON file that is rewritten as a whole on every save. The same
//! document format is used for import and export.

pub mod bank_file;
pub mod document;

pub use bank_file::{
    BankFile, BankStatus, RetryPolicy, StoreError, WriteDurability, DEFAULT_BANK_FILENAME,
};
pub use document::{
    document_schema, encode_document, parse_document, DocumentError, ParsedDocument, SkipReason,
    SkippedEntry,
};
