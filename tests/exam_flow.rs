// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use quizbank::exam::{ExamPhase, ExamSession, OptionMark, Outcome};
use quizbank::model::QuestionDraft;
use quizbank::ops::{BankEditor, ChangeFeed, EditError};
use quizbank::store::BankFile;
use quizbank::transfer::BankTransfer;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[path = "../benches/fixtures/mod.rs"]
mod fixtures;

use fixtures::TempDir;

struct App {
    _tmp: TempDir,
    store: BankFile,
    feed: ChangeFeed,
    editor: BankEditor,
    transfer: BankTransfer,
}

impl App {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let store = tmp.bank_file();
        let feed = ChangeFeed::new();
        Self {
            editor: BankEditor::new(store.clone(), feed.clone()),
            transfer: BankTransfer::new(store.clone(), feed.clone()),
            _tmp: tmp,
            store,
            feed,
        }
    }

    fn session(&self, seed: u64) -> ExamSession<StdRng> {
        ExamSession::with_rng(self.store.clone(), self.feed.clone(), StdRng::seed_from_u64(seed))
    }
}

#[test]
fn added_question_survives_a_reload() {
    let app = App::new("add");
    let draft = QuestionDraft::new("Capital of France?", ["Paris", "Lyon"]).with_correct([1]);
    assert_eq!(app.editor.add_question(draft).unwrap(), 0);

    let reopened = BankFile::new(app.store.path());
    let bank = reopened.load();
    assert_eq!(bank.len(), 1);
    let record = bank.get(0).unwrap();
    assert_eq!(record.question(), "Capital of France?");
    assert_eq!(record.options(), ["Paris", "Lyon"]);
    assert_eq!(record.correct().positions(), [1]);
}

#[test]
fn import_keeps_only_complete_entries() {
    let app = App::new("import");
    let report = app
        .transfer
        .import_document(
            r#"[
              {"question": "A?", "options": ["x", "y"], "correct": ["2"]},
              {"question": "B?", "options": ["x", "y"]}
            ]"#,
        )
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 1);

    let bank = app.store.load();
    assert_eq!(bank.len(), 1);
    assert_eq!(bank.get(0).unwrap().question(), "A?");
}

#[test]
fn exam_scores_the_shuffled_two_plus_two() {
    let app = App::new("exam");
    let draft = QuestionDraft::new("2+2?", ["3", "4", "5"]).with_correct([2]);
    app.editor.add_question(draft).unwrap();

    for seed in 0..8 {
        let mut session = app.session(seed);
        assert_eq!(session.draw_next().unwrap(), ExamPhase::Presenting);
        let current = session.current().unwrap();
        let four = current.options().position(|option| option == "4").unwrap();
        let three = current.options().position(|option| option == "3").unwrap();

        let review = session.submit_answer([three]).unwrap();
        assert_eq!(review.outcome, Outcome::Incorrect);
        assert_eq!(review.mark(four), OptionMark::Correct);
        assert_eq!(review.mark(three), OptionMark::WronglySelected);

        assert_eq!(session.draw_next().unwrap(), ExamPhase::Exhausted);
        assert_eq!(session.reset_session(), ExamPhase::Presenting);
        let four = session
            .current()
            .unwrap()
            .options()
            .position(|option| option == "4")
            .unwrap();
        assert!(session.submit_answer([four]).unwrap().is_correct());
    }
}

#[test]
fn deleting_past_the_end_reports_a_stale_index() {
    let app = App::new("delete");
    for question in ["A?", "B?", "C?"] {
        let draft = QuestionDraft::new(question, ["yes", "no"]).with_correct([1]);
        app.editor.add_question(draft).unwrap();
    }

    let err = app.editor.request_delete(5).unwrap_err();
    assert!(matches!(err, EditError::StaleIndex { index: 5, len: 3 }));
    assert_eq!(app.store.load().len(), 3);

    let pending = app.editor.request_delete(1).unwrap();
    assert_eq!(pending.summary(), "B?");
    app.editor.confirm_delete(pending).unwrap();
    let remaining = app
        .store
        .load()
        .iter()
        .map(|record| record.question().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(remaining, ["A?", "C?"]);
}
