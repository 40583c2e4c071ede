// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::fingerprint::Fingerprint;
use super::question::QuestionRecord;

/// The ordered question collection. A record's position is its address for edit/delete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: QuestionRecord) {
        self.records.push(record);
    }

    /// Replaces the record at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, record: QuestionRecord) -> Option<QuestionRecord> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, index: usize) -> Option<QuestionRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.records.iter()
    }

    /// Records whose fingerprint is not rejected by `is_used`, in bank order.
    pub fn unused<'a>(
        &'a self,
        mut is_used: impl FnMut(&Fingerprint) -> bool + 'a,
    ) -> impl Iterator<Item = &'a QuestionRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| !is_used(&record.fingerprint()))
    }
}

impl From<Vec<QuestionRecord>> for QuestionBank {
    fn from(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<QuestionRecord> for QuestionBank {
    fn from_iter<I: IntoIterator<Item = QuestionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QuestionBank {
    type Item = QuestionRecord;
    type IntoIter = std::vec::IntoIter<QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
