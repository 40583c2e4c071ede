// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exam sessions: draw unseen questions at random, shuffle their options and score answers.
//!
//! A session re-reads the bank on every draw and keeps its own set of already presented
//! question fingerprints. Once every fingerprint in the bank is used the session is
//! exhausted until it is reset, either explicitly or because the bank changed.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Fingerprint, QuestionRecord};
use crate::ops::ChangeFeed;
use crate::store::BankFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    Loading,
    NoQuestions,
    Exhausted,
    Presenting,
    Answered,
}

impl fmt::Display for ExamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::NoQuestions => "no questions",
            Self::Exhausted => "exhausted",
            Self::Presenting => "presenting",
            Self::Answered => "answered",
        })
    }
}

/// One drawn question with its options in presentation order.
///
/// Positions are 0-based indices into the presented option list.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    record: QuestionRecord,
    order: Vec<usize>,
    correct_positions: BTreeSet<usize>,
}

impl Presentation {
    fn shuffle<R: Rng + ?Sized>(record: QuestionRecord, rng: &mut R) -> Self {
        let mut order = (0..record.options().len()).collect::<Vec<_>>();
        order.shuffle(rng);
        let correct_positions = order
            .iter()
            .enumerate()
            .filter_map(|(position, &option_index)| {
                record.correct().contains(option_index + 1).then_some(position)
            })
            .collect();
        Self {
            record,
            order,
            correct_positions,
        }
    }

    pub fn record(&self) -> &QuestionRecord {
        &self.record
    }

    pub fn question(&self) -> &str {
        self.record.question()
    }

    /// Options in the order they are shown.
    pub fn options(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.order
            .iter()
            .map(|&option_index| self.record.options()[option_index].as_str())
    }

    pub fn option(&self, position: usize) -> Option<&str> {
        let option_index = *self.order.get(position)?;
        Some(self.record.options()[option_index].as_str())
    }

    /// `order()[position]` is the 0-based index of the option in the stored record.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn correct_positions(&self) -> &BTreeSet<usize> {
        &self.correct_positions
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// How an option should be highlighted once the question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    WronglySelected,
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub outcome: Outcome,
    pub selected: BTreeSet<usize>,
    pub correct_positions: BTreeSet<usize>,
    pub wrongly_selected: BTreeSet<usize>,
}

impl AnswerReview {
    fn score(selected: BTreeSet<usize>, correct_positions: &BTreeSet<usize>) -> Self {
        let outcome = if &selected == correct_positions {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        let wrongly_selected = selected.difference(correct_positions).copied().collect();
        Self {
            outcome,
            selected,
            correct_positions: correct_positions.clone(),
            wrongly_selected,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }

    pub fn mark(&self, position: usize) -> OptionMark {
        if self.correct_positions.contains(&position) {
            OptionMark::Correct
        } else if self.wrongly_selected.contains(&position) {
            OptionMark::WronglySelected
        } else {
            OptionMark::Unmarked
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub fingerprint: Fingerprint,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    EmptySelection,
    NotPresenting { phase: ExamPhase },
    PositionOutOfRange { position: usize, option_count: usize },
    /// The bank changed since the question was drawn; the session was reset.
    BankChanged,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection => f.write_str("select at least one answer"),
            Self::NotPresenting { phase } => {
                write!(f, "no question is waiting for an answer (session is {phase})")
            }
            Self::PositionOutOfRange {
                position,
                option_count,
            } => write!(
                f,
                "answer {} is not one of the {option_count} options",
                position + 1
            ),
            Self::BankChanged => {
                f.write_str("the question bank changed; the exam session was restarted")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Unanswered,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unanswered => f.write_str("answer the current question first"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug)]
pub struct ExamSession<R = ThreadRng> {
    store: BankFile,
    feed: ChangeFeed,
    seen_generation: u64,
    used: HashSet<Fingerprint>,
    phase: ExamPhase,
    current: Option<Presentation>,
    review: Option<AnswerReview>,
    results: Vec<QuestionResult>,
    rng: R,
}

impl ExamSession<ThreadRng> {
    pub fn new(store: BankFile, feed: ChangeFeed) -> Self {
        Self::with_rng(store, feed, rand::thread_rng())
    }
}

impl<R: Rng> ExamSession<R> {
    /// Creates a session in [`ExamPhase::Loading`]; call [`ExamSession::draw_next`] to
    /// present the first question.
    pub fn with_rng(store: BankFile, feed: ChangeFeed, rng: R) -> Self {
        let seen_generation = feed.generation();
        Self {
            store,
            feed,
            seen_generation,
            used: HashSet::new(),
            phase: ExamPhase::Loading,
            current: None,
            review: None,
            results: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&Presentation> {
        self.current.as_ref()
    }

    pub fn review(&self) -> Option<&AnswerReview> {
        self.review.as_ref()
    }

    pub fn used(&self) -> &HashSet<Fingerprint> {
        &self.used
    }

    /// Pass/fail of every answered question since the session was created.
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    pub fn correct_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome == Outcome::Correct)
            .count()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == ExamPhase::Presenting
    }

    /// Moves to the next question. Refused while a question is still unanswered.
    pub fn draw_next(&mut self) -> Result<ExamPhase, SessionError> {
        if self.sync_with_bank() {
            return Ok(self.phase);
        }
        if self.phase == ExamPhase::Presenting {
            return Err(SessionError::Unanswered);
        }
        Ok(self.load())
    }

    pub fn submit_answer(
        &mut self,
        selection: impl IntoIterator<Item = usize>,
    ) -> Result<&AnswerReview, SubmitError> {
        if self.sync_with_bank() {
            return Err(SubmitError::BankChanged);
        }
        if self.phase != ExamPhase::Presenting {
            return Err(SubmitError::NotPresenting { phase: self.phase });
        }
        let Some(current) = &self.current else {
            return Err(SubmitError::NotPresenting { phase: self.phase });
        };

        let selected = selection.into_iter().collect::<BTreeSet<_>>();
        if selected.is_empty() {
            return Err(SubmitError::EmptySelection);
        }
        if let Some(&position) = selected.iter().find(|&&position| position >= current.len()) {
            return Err(SubmitError::PositionOutOfRange {
                position,
                option_count: current.len(),
            });
        }

        let review = AnswerReview::score(selected, current.correct_positions());
        debug!(
            "answered {:?}: {:?}",
            current.question(),
            review.outcome
        );
        self.results.push(QuestionResult {
            fingerprint: current.record().fingerprint(),
            outcome: review.outcome,
        });
        self.phase = ExamPhase::Answered;
        Ok(self.review.insert(review))
    }

    /// Forgets which questions were used and draws again.
    pub fn reset_session(&mut self) -> ExamPhase {
        self.used.clear();
        self.seen_generation = self.feed.generation();
        self.load()
    }

    /// Resets the session if the bank changed since it was last seen. Returns whether a
    /// reset happened.
    pub fn sync_with_bank(&mut self) -> bool {
        if self.feed.generation() == self.seen_generation {
            return false;
        }
        debug!("question bank changed; resetting exam session");
        self.reset_session();
        true
    }

    fn load(&mut self) -> ExamPhase {
        self.phase = ExamPhase::Loading;
        self.current = None;
        self.review = None;

        let bank = self.store.load();
        if bank.is_empty() {
            self.phase = ExamPhase::NoQuestions;
            return self.phase;
        }

        let chosen = {
            let used = &self.used;
            let available = bank
                .unused(|fingerprint| used.contains(fingerprint))
                .collect::<Vec<_>>();
            available.choose(&mut self.rng).map(|&record| record.clone())
        };
        let Some(record) = chosen else {
            self.phase = ExamPhase::Exhausted;
            return self.phase;
        };

        self.used.insert(record.fingerprint());
        debug!(
            "presenting {:?} ({} of {} used)",
            record.question(),
            self.used.len(),
            bank.len()
        );
        self.current = Some(Presentation::shuffle(record, &mut self.rng));
        self.phase = ExamPhase::Presenting;
        self.phase
    }
}
