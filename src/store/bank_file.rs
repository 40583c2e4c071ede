// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use super::document::{encode_document, parse_document, DocumentError, ParsedDocument};
use crate::model::QuestionBank;

pub const DEFAULT_BANK_FILENAME: &str = "questions.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Document {
        path: PathBuf,
        source: DocumentError,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    WriteFailed {
        path: PathBuf,
        attempts: u32,
        source: io::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Document { path, source } => write!(f, "cannot read {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "cannot encode {path:?}: {source}"),
            Self::WriteFailed {
                path,
                attempts,
                source,
            } => write!(
                f,
                "cannot write {path:?} after {attempts} attempt(s): {source}"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Document { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and the rename to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// How often a failed save is attempted before giving up.
///
/// Attempt `n` (1-based) waits `backoff * (n - 1)` before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            backoff: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(50),
        }
    }
}

/// Snapshot of the backing file for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
    pub question_count: usize,
}

/// The question bank persisted as a single JSON file.
///
/// Every save rewrites the whole file. Clones share one writer lock, so read-modify-write
/// cycles through [`BankFile::modify`] never interleave within a process. Readers are not
/// locked: they always see either the previous or the next complete file.
#[derive(Debug, Clone)]
pub struct BankFile {
    path: PathBuf,
    durability: WriteDurability,
    retry: RetryPolicy,
    writer: Arc<Mutex<()>>,
}

impl BankFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
            retry: RetryPolicy::default(),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Loads the bank, degrading to an empty bank when the file is missing, empty or
    /// unreadable. Malformed entries are dropped.
    pub fn load(&self) -> QuestionBank {
        match self.try_load() {
            Ok(parsed) => parsed.bank,
            Err(err) => {
                warn!("{err}; continuing with an empty question bank");
                QuestionBank::new()
            }
        }
    }

    /// Like [`BankFile::load`], but reports read and parse failures and what was skipped.
    pub fn try_load(&self) -> Result<ParsedDocument, StoreError> {
        debug!("loading questions from {:?}", self.path);
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                info!("no question file at {:?}", self.path);
                return Ok(ParsedDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if text.trim().is_empty() {
            info!("question file {:?} is empty", self.path);
            return Ok(ParsedDocument::default());
        }

        let parsed = parse_document(&text).map_err(|source| StoreError::Document {
            path: self.path.clone(),
            source,
        })?;
        for skipped in &parsed.skipped {
            warn!(
                "dropping entry {} of {:?}: {}",
                skipped.index, self.path, skipped.reason
            );
        }
        info!(
            "loaded {} question(s) from {:?}",
            parsed.bank.len(),
            self.path
        );
        Ok(parsed)
    }

    /// Rewrites the file with `bank`, retrying failed writes per the retry policy.
    ///
    /// On failure the previous file content stays in place.
    pub fn save(&self, bank: &QuestionBank) -> Result<(), StoreError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.save_locked(bank)
    }

    /// Loads the current bank, applies `f` and saves the result, holding the writer lock
    /// for the whole cycle. Nothing is written when `f` fails.
    ///
    /// Unlike [`BankFile::load`], an unreadable or unparsable file is an error here: the
    /// rewrite would otherwise replace it with whatever `f` built on an empty bank. A missing
    /// or blank file still starts from an empty bank.
    pub fn modify<T, E>(&self, f: impl FnOnce(&mut QuestionBank) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let ParsedDocument { mut bank, skipped } = self.try_load()?;
        if !skipped.is_empty() {
            warn!(
                "{} invalid entr{} in {:?} will not be written back",
                skipped.len(),
                if skipped.len() == 1 { "y" } else { "ies" },
                self.path
            );
        }
        let out = f(&mut bank)?;
        self.save_locked(&bank)?;
        Ok(out)
    }

    pub fn status(&self) -> BankStatus {
        let (exists, size_bytes) = match fs::metadata(&self.path) {
            Ok(md) => (md.is_file(), md.len()),
            Err(_) => (false, 0),
        };
        BankStatus {
            path: self.path.clone(),
            exists,
            size_bytes,
            question_count: self.load().len(),
        }
    }

    fn save_locked(&self, bank: &QuestionBank) -> Result<(), StoreError> {
        let text = encode_document(bank).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        info!("saving {} question(s) to {:?}", bank.len(), self.path);
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            match write_atomic(&self.path, text.as_bytes(), self.durability) {
                Ok(()) => return Ok(()),
                Err(source) if attempt < attempts => {
                    warn!(
                        "write attempt {attempt}/{attempts} to {:?} failed: {source}",
                        self.path
                    );
                    std::thread::sleep(self.retry.backoff * attempt);
                    attempt += 1;
                }
                Err(source) => {
                    warn!(
                        "giving up on {:?} after {attempts} attempt(s): {source}",
                        self.path
                    );
                    return Err(StoreError::WriteFailed {
                        path: self.path.clone(),
                        attempts,
                        source,
                    });
                }
            }
        }
    }
}

// Extracted filesystem helpers for `BankFile`.
include!("bank_file/helpers.rs");
