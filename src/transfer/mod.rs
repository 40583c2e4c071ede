// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bulk import/export of the whole bank as a question document.
//!
//! Import replaces the persisted bank with the usable entries of the document; it never
//! merges. Export writes the current bank in the same format the bank file uses.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::ops::ChangeFeed;
use crate::store::{encode_document, parse_document, BankFile, DocumentError, SkippedEntry, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug)]
pub enum TransferError {
    Io { path: PathBuf, source: io::Error },
    Document(DocumentError),
    NoValidQuestions { skipped: usize },
    NothingToExport,
    Encode(serde_json::Error),
    Persistence(StoreError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Document(source) => write!(f, "cannot import: {source}"),
            Self::NoValidQuestions { skipped } => write!(
                f,
                "no valid questions found ({skipped} entr{} skipped)",
                if *skipped == 1 { "y" } else { "ies" }
            ),
            Self::NothingToExport => f.write_str("there are no questions to export"),
            Self::Encode(source) => write!(f, "cannot encode questions: {source}"),
            Self::Persistence(source) => {
                write!(f, "cannot save the imported questions: {source}")
            }
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Document(source) => Some(source),
            Self::Encode(source) => Some(source),
            Self::Persistence(source) => Some(source),
            Self::NoValidQuestions { .. } | Self::NothingToExport => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BankTransfer {
    store: BankFile,
    feed: ChangeFeed,
}

impl BankTransfer {
    pub fn new(store: BankFile, feed: ChangeFeed) -> Self {
        Self { store, feed }
    }

    /// Replaces the bank with the valid entries of `text`.
    ///
    /// Fails without touching the bank when the document is malformed, is not a list or
    /// holds no valid question.
    pub fn import_document(&self, text: &str) -> Result<ImportReport, TransferError> {
        let parsed = parse_document(text).map_err(TransferError::Document)?;
        for skipped in &parsed.skipped {
            warn!("import skips entry {}: {}", skipped.index, skipped.reason);
        }
        if parsed.bank.is_empty() {
            return Err(TransferError::NoValidQuestions {
                skipped: parsed.skipped.len(),
            });
        }

        self.store
            .save(&parsed.bank)
            .map_err(TransferError::Persistence)?;
        self.feed.notify();
        info!("imported {} question(s)", parsed.bank.len());
        Ok(ImportReport {
            imported: parsed.bank.len(),
            skipped: parsed.skipped,
        })
    }

    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportReport, TransferError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_document(&text)
    }

    /// The current bank encoded exactly as the bank file stores it.
    pub fn export_document(&self) -> Result<String, TransferError> {
        let bank = self.store.load();
        if bank.is_empty() {
            return Err(TransferError::NothingToExport);
        }
        encode_document(&bank).map_err(TransferError::Encode)
    }

    /// Writes the export to `path`, creating missing parent directories. Returns the number
    /// of exported questions.
    pub fn export_file(&self, path: impl AsRef<Path>) -> Result<usize, TransferError> {
        let path = path.as_ref();
        let bank = self.store.load();
        if bank.is_empty() {
            return Err(TransferError::NothingToExport);
        }
        let text = encode_document(&bank).map_err(TransferError::Encode)?;

        let io_err = |source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)?;
        info!("exported {} question(s) to {path:?}", bank.len());
        Ok(bank.len())
    }
}
