// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The JSON document format shared by the bank file, import and export.
//!
//! A document is a JSON array of question objects:
//!
//! ```json
//! [
//!   { "question": "2+2?", "options": ["3", "4", "5"], "correct": ["2"] }
//! ]
//! ```
//!
//! `correct` holds 1-based positions into `options`, written as strings. Any other keys on a
//! question object are carried through untouched.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{CorrectSet, QuestionBank, QuestionRecord, ValidationError};

const REQUIRED_FIELDS: [&str; 3] = ["question", "options", "correct"];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct QuestionJson {
    question: String,
    options: Vec<String>,
    correct: Vec<CorrectMarkerJson>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum CorrectMarkerJson {
    Text(String),
    Number(u64),
}

#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
    NotAList,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "malformed question document: {source}"),
            Self::NotAList => f.write_str("question document must be a JSON list"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
            Self::NotAList => None,
        }
    }
}

/// Why a document entry did not make it into the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingField(&'static str),
    Malformed(String),
    Invalid(ValidationError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("entry is not an object"),
            Self::MissingField(field) => write!(f, "entry has no {field:?} field"),
            Self::Malformed(reason) => write!(f, "entry is malformed: {reason}"),
            Self::Invalid(source) => write!(f, "entry is invalid: {source}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 0-based position of the entry in the document.
    pub index: usize,
    pub reason: SkipReason,
}

/// A decoded document: the usable questions in document order plus what was filtered out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub bank: QuestionBank,
    pub skipped: Vec<SkippedEntry>,
}

pub fn parse_document(text: &str) -> Result<ParsedDocument, DocumentError> {
    let value: Value = serde_json::from_str(text).map_err(DocumentError::Json)?;
    let Value::Array(entries) = value else {
        return Err(DocumentError::NotAList);
    };

    let mut parsed = ParsedDocument::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match record_from_value(entry) {
            Ok(record) => parsed.bank.push(record),
            Err(reason) => parsed.skipped.push(SkippedEntry { index, reason }),
        }
    }
    Ok(parsed)
}

fn record_from_value(entry: Value) -> Result<QuestionRecord, SkipReason> {
    let Some(object) = entry.as_object() else {
        return Err(SkipReason::NotAnObject);
    };
    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !object.contains_key(*field))
    {
        return Err(SkipReason::MissingField(missing));
    }

    let question_json: QuestionJson =
        serde_json::from_value(entry).map_err(|err| SkipReason::Malformed(err.to_string()))?;
    question_from_json(question_json).map_err(SkipReason::Invalid)
}

fn question_from_json(question_json: QuestionJson) -> Result<QuestionRecord, ValidationError> {
    let positions = question_json
        .correct
        .into_iter()
        .map(|marker| match marker {
            CorrectMarkerJson::Number(position) => usize::try_from(position)
                .map_err(|_| ValidationError::InvalidCorrectMarker {
                    value: position.to_string(),
                }),
            CorrectMarkerJson::Text(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ValidationError::InvalidCorrectMarker { value }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let record = QuestionRecord::new(
        question_json.question,
        question_json.options,
        CorrectSet::from_positions(positions),
    )?;
    Ok(record.with_extra(question_json.extra))
}

fn question_to_json(record: &QuestionRecord) -> QuestionJson {
    let mut buffer = itoa::Buffer::new();
    QuestionJson {
        question: record.question().to_owned(),
        options: record.options().to_vec(),
        correct: record
            .correct()
            .positions()
            .iter()
            .map(|&position| CorrectMarkerJson::Text(buffer.format(position).to_owned()))
            .collect(),
        extra: record.extra().clone(),
    }
}

/// Encodes the bank as a pretty-printed document (two-space indent, non-ASCII kept as is).
pub fn encode_document(bank: &QuestionBank) -> Result<String, serde_json::Error> {
    let questions = bank.iter().map(question_to_json).collect::<Vec<_>>();
    let mut text = serde_json::to_string_pretty(&questions)?;
    text.push('\n');
    Ok(text)
}

/// JSON Schema describing a question document.
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(Vec<QuestionJson>)
}
