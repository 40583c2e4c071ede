// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};
use smallvec::SmallVec;

use super::fingerprint::Fingerprint;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

const SUMMARY_MAX_CHARS: usize = 40;
const SUMMARY_KEEP_CHARS: usize = 37;

/// The set of correct answers of a question, as 1-based positions into its options.
///
/// Always sorted ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CorrectSet {
    positions: SmallVec<[usize; MAX_OPTIONS]>,
}

impl CorrectSet {
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        let mut positions = positions.into_iter().collect::<SmallVec<[usize; MAX_OPTIONS]>>();
        positions.sort_unstable();
        positions.dedup();
        Self { positions }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// The same set expressed as 0-based option indices. A position 0 has no option and
    /// is left out.
    pub fn option_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .filter_map(|position| position.checked_sub(1))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyQuestion,
    TooFewOptions { count: usize },
    TooManyOptions { count: usize },
    EmptyOption { position: usize },
    NoCorrectAnswer,
    CorrectOutOfRange { position: usize, option_count: usize },
    InvalidCorrectMarker { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuestion => f.write_str("question text must not be empty"),
            Self::TooFewOptions { count } => {
                write!(f, "at least {MIN_OPTIONS} answer options are required (got {count})")
            }
            Self::TooManyOptions { count } => {
                write!(f, "at most {MAX_OPTIONS} answer options are allowed (got {count})")
            }
            Self::EmptyOption { position } => write!(f, "answer option {position} is empty"),
            Self::NoCorrectAnswer => f.write_str("select at least one correct answer"),
            Self::CorrectOutOfRange {
                position,
                option_count,
            } => write!(
                f,
                "correct answer {position} does not refer to one of the {option_count} options"
            ),
            Self::InvalidCorrectMarker { value } => {
                write!(f, "correct answer marker {value:?} is not a position number")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// One multiple-choice question as stored in the bank.
///
/// Construction validates the record; a `QuestionRecord` value always satisfies the bank
/// invariants (non-empty text, 2..=6 non-empty options, correct positions within range).
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    question: String,
    options: Vec<String>,
    correct: CorrectSet,
    extra: Map<String, Value>,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct: CorrectSet,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        validate(&question, &options, &correct)?;
        Ok(Self {
            question,
            options,
            correct,
            extra: Map::new(),
        })
    }

    /// Attaches fields the record carried in its stored form but the bank does not interpret.
    pub(crate) fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct(&self) -> &CorrectSet {
        &self.correct
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of_text(&self.question)
    }

    /// Short label for list views.
    pub fn summary(&self) -> Cow<'_, str> {
        if self.question.chars().count() <= SUMMARY_MAX_CHARS {
            return Cow::Borrowed(&self.question);
        }
        let mut out = self
            .question
            .chars()
            .take(SUMMARY_KEEP_CHARS)
            .collect::<String>();
        out.push_str("...");
        Cow::Owned(out)
    }
}

fn validate(question: &str, options: &[String], correct: &CorrectSet) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    if options.len() < MIN_OPTIONS {
        return Err(ValidationError::TooFewOptions {
            count: options.len(),
        });
    }
    if options.len() > MAX_OPTIONS {
        return Err(ValidationError::TooManyOptions {
            count: options.len(),
        });
    }
    if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
        return Err(ValidationError::EmptyOption { position: index + 1 });
    }
    if correct.is_empty() {
        return Err(ValidationError::NoCorrectAnswer);
    }
    if let Some(&position) = correct
        .positions()
        .iter()
        .find(|&&position| position == 0 || position > options.len())
    {
        return Err(ValidationError::CorrectOutOfRange {
            position,
            option_count: options.len(),
        });
    }
    Ok(())
}

/// Raw form input for adding or editing a question.
///
/// `correct` holds 1-based positions into `options` exactly as entered, blank inputs
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct: Vec<usize>,
}

impl QuestionDraft {
    pub fn new(question: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct: Vec::new(),
        }
    }

    pub fn with_correct(mut self, positions: impl IntoIterator<Item = usize>) -> Self {
        self.correct = positions.into_iter().collect();
        self
    }

    /// Trims the input, drops blank options and renumbers the correct marks onto the
    /// remaining options, then validates the result.
    ///
    /// A correct mark placed on a blank option is discarded together with that option.
    pub fn into_record(self) -> Result<QuestionRecord, ValidationError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        let raw_count = self.options.len();
        if let Some(&position) = self
            .correct
            .iter()
            .find(|&&position| position == 0 || position > raw_count)
        {
            return Err(ValidationError::CorrectOutOfRange {
                position,
                option_count: raw_count,
            });
        }

        let mut options = Vec::with_capacity(raw_count);
        let mut correct = Vec::with_capacity(self.correct.len());
        for (index, option) in self.options.iter().enumerate() {
            let option = option.trim();
            if option.is_empty() {
                continue;
            }
            options.push(option.to_owned());
            if self.correct.contains(&(index + 1)) {
                correct.push(options.len());
            }
        }

        if options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions {
                count: options.len(),
            });
        }
        if correct.is_empty() {
            return Err(ValidationError::NoCorrectAnswer);
        }

        QuestionRecord::new(question, options, CorrectSet::from_positions(correct))
    }
}
