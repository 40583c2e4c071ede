// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Add/edit/delete operations over the persisted bank.
//!
//! Each operation validates its input, re-loads the bank, applies the change and rewrites the
//! file while holding the store's writer lock. Records are addressed by position; a position
//! captured from an older listing is re-checked against the fresh bank and rejected as stale
//! instead of touching an unrelated record.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::info;

use crate::model::{Fingerprint, QuestionBank, QuestionDraft, QuestionRecord, ValidationError};
use crate::store::{BankFile, StoreError};

/// Generation counter bumped on every successful bank mutation.
///
/// Clones share the counter. Exam sessions and list views remember the generation they last
/// saw and reload once it moves.
#[derive(Debug, Clone, Default)]
pub struct ChangeFeed {
    generation: Arc<AtomicU64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Records a bank change and returns the new generation.
    pub fn notify(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Position of a record in a listing, optionally pinned to the question text seen there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    pub index: usize,
    pub expected: Option<Fingerprint>,
}

impl RecordTarget {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            expected: None,
        }
    }

    pub fn expecting(mut self, question: &str) -> Self {
        self.expected = Some(Fingerprint::of_text(question));
        self
    }

    fn resolve<'a>(&self, bank: &'a QuestionBank) -> Result<&'a QuestionRecord, EditError> {
        let Some(record) = bank.get(self.index) else {
            return Err(EditError::StaleIndex {
                index: self.index,
                len: bank.len(),
            });
        };
        if let Some(expected) = &self.expected {
            let found = record.fingerprint();
            if &found != expected {
                return Err(EditError::RecordMoved {
                    index: self.index,
                    expected: expected.clone(),
                    found,
                });
            }
        }
        Ok(record)
    }
}

impl From<usize> for RecordTarget {
    fn from(index: usize) -> Self {
        Self::at(index)
    }
}

/// A delete that has been requested but not yet confirmed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    target: RecordTarget,
    summary: String,
}

impl PendingDelete {
    pub fn index(&self) -> usize {
        self.target.index
    }

    /// List label of the record about to be deleted, for the confirmation prompt.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

#[derive(Debug)]
pub enum EditError {
    Validation(ValidationError),
    StaleIndex {
        index: usize,
        len: usize,
    },
    RecordMoved {
        index: usize,
        expected: Fingerprint,
        found: Fingerprint,
    },
    Persistence(StoreError),
}

impl EditError {
    /// Whether the caller addressed a record through an outdated listing.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleIndex { .. } | Self::RecordMoved { .. })
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(source) => write!(f, "invalid question: {source}"),
            Self::StaleIndex { index, len } => write!(
                f,
                "question #{} no longer exists (the bank has {len} question(s)); reload the list",
                index + 1
            ),
            Self::RecordMoved {
                index,
                expected,
                found,
            } => write!(
                f,
                "question #{} changed from {:?} to {:?}; reload the list",
                index + 1,
                expected.as_str(),
                found.as_str()
            ),
            Self::Persistence(source) => write!(f, "cannot save the question bank: {source}"),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(source) => Some(source),
            Self::Persistence(source) => Some(source),
            Self::StaleIndex { .. } | Self::RecordMoved { .. } => None,
        }
    }
}

impl From<ValidationError> for EditError {
    fn from(source: ValidationError) -> Self {
        Self::Validation(source)
    }
}

impl From<StoreError> for EditError {
    fn from(source: StoreError) -> Self {
        Self::Persistence(source)
    }
}

#[derive(Debug, Clone)]
pub struct BankEditor {
    store: BankFile,
    feed: ChangeFeed,
}

impl BankEditor {
    pub fn new(store: BankFile, feed: ChangeFeed) -> Self {
        Self { store, feed }
    }

    pub fn store(&self) -> &BankFile {
        &self.store
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Fresh listing for a bank view.
    pub fn load_bank(&self) -> QuestionBank {
        self.store.load()
    }

    /// Appends a question and returns its position.
    pub fn add_question(&self, draft: QuestionDraft) -> Result<usize, EditError> {
        let record = draft.into_record()?;
        let index = self.store.modify(|bank| {
            bank.push(record);
            Ok::<_, EditError>(bank.len() - 1)
        })?;
        info!("added question #{}", index + 1);
        self.feed.notify();
        Ok(index)
    }

    /// Replaces the question at `target` and returns the previous record.
    ///
    /// Fields the previous record carried beyond question/options/correct are not kept.
    pub fn edit_question(
        &self,
        target: impl Into<RecordTarget>,
        draft: QuestionDraft,
    ) -> Result<QuestionRecord, EditError> {
        let target = target.into();
        let record = draft.into_record()?;
        let previous = self.store.modify(|bank| {
            target.resolve(bank)?;
            bank.replace(target.index, record).ok_or(EditError::StaleIndex {
                index: target.index,
                len: bank.len(),
            })
        })?;
        info!("edited question #{}", target.index + 1);
        self.feed.notify();
        Ok(previous)
    }

    /// First step of a delete: checks the target against the current bank and captures the
    /// question text so the confirmation can detect a reshuffled bank.
    pub fn request_delete(&self, target: impl Into<RecordTarget>) -> Result<PendingDelete, EditError> {
        let mut target = target.into();
        let bank = self.store.load();
        let record = target.resolve(&bank)?;
        let summary = record.summary().into_owned();
        target.expected = Some(record.fingerprint());
        Ok(PendingDelete { target, summary })
    }

    /// Second step of a delete, run once the user confirmed. Returns the removed record.
    pub fn confirm_delete(&self, pending: PendingDelete) -> Result<QuestionRecord, EditError> {
        let target = pending.target;
        let removed = self.store.modify(|bank| {
            target.resolve(bank)?;
            bank.remove(target.index).ok_or(EditError::StaleIndex {
                index: target.index,
                len: bank.len(),
            })
        })?;
        info!("deleted question #{}", target.index + 1);
        self.feed.notify();
        Ok(removed)
    }
}
