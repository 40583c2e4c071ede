// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quizbank-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quizbank and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quizbank CLI entrypoint.
//!
//! Manages the question bank file and runs interactive exams on the terminal.
//! The bank file is `--bank <file>`, else `$QUIZBANK_FILE`, else `questions.json`.

use std::error::Error;
use std::io::{self, BufRead, Write};

use quizbank::exam::{ExamPhase, ExamSession, OptionMark};
use quizbank::model::QuestionDraft;
use quizbank::ops::{BankEditor, ChangeFeed, RecordTarget};
use quizbank::store::{document_schema, BankFile, WriteDurability, DEFAULT_BANK_FILENAME};
use quizbank::transfer::BankTransfer;

const BANK_FILE_ENV: &str = "QUIZBANK_FILE";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--bank <file>] [--durable-writes] <command>\n\nCommands:\n  list\n  status\n  add --question <text> --option <text>... --correct <n>...\n  edit <n> --question <text> --option <text>... --correct <n>...\n  delete <n> [--yes]\n  import <file>\n  export <file>\n  exam\n  schema\n\nQuestion and answer numbers are 1-based.\nIf --bank is omitted, ${BANK_FILE_ENV} or ./{DEFAULT_BANK_FILENAME} is used.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\nSet RUST_LOG=info to see load/save diagnostics."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct DraftArgs {
    question: Option<String>,
    options: Vec<String>,
    correct: Vec<usize>,
}

impl DraftArgs {
    fn into_draft(self) -> QuestionDraft {
        QuestionDraft::new(self.question.unwrap_or_default(), self.options)
            .with_correct(self.correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Status,
    Add(DraftArgs),
    Edit { index: usize, draft: DraftArgs },
    Delete { index: usize, yes: bool },
    Import(String),
    Export(String),
    Exam,
    Schema,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    bank: Option<String>,
    durable_writes: bool,
    command: Option<Command>,
}

/// Parses a 1-based number from the command line into a 0-based index.
fn parse_position(raw: &str) -> Result<usize, ()> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(()),
        Ok(n) => Ok(n - 1),
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut command_name: Option<String> = None;
    let mut positionals: Vec<String> = Vec::new();
    let mut draft = DraftArgs::default();
    let mut yes = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bank" => {
                if options.bank.is_some() {
                    return Err(());
                }
                options.bank = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--question" => {
                if draft.question.is_some() {
                    return Err(());
                }
                draft.question = Some(args.next().ok_or(())?);
            }
            "--option" => draft.options.push(args.next().ok_or(())?),
            "--correct" => {
                let raw = args.next().ok_or(())?;
                let position: usize = raw.parse().map_err(|_| ())?;
                draft.correct.push(position);
            }
            "--yes" => {
                if yes {
                    return Err(());
                }
                yes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if command_name.is_none() {
                    command_name = Some(arg);
                } else {
                    positionals.push(arg);
                }
            }
        }
    }

    let Some(command_name) = command_name else {
        return Err(());
    };
    let has_draft = draft != DraftArgs::default();

    let command = match (command_name.as_str(), positionals.as_slice()) {
        ("list", []) => Command::List,
        ("status", []) => Command::Status,
        ("exam", []) => Command::Exam,
        ("schema", []) => Command::Schema,
        ("add", []) => Command::Add(draft),
        ("edit", [index]) => Command::Edit {
            index: parse_position(index)?,
            draft,
        },
        ("delete", [index]) => Command::Delete {
            index: parse_position(index)?,
            yes,
        },
        ("import", [path]) => Command::Import(path.clone()),
        ("export", [path]) => Command::Export(path.clone()),
        _ => return Err(()),
    };

    let takes_draft = matches!(command, Command::Add(_) | Command::Edit { .. });
    if has_draft && !takes_draft {
        return Err(());
    }
    if yes && !matches!(command, Command::Delete { .. }) {
        return Err(());
    }

    options.command = Some(command);
    Ok(options)
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Parses answer numbers like `1 3` or `1,3` into 0-based positions.
fn parse_selection(input: &str) -> Option<Vec<usize>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| parse_position(token).ok())
        .collect()
}

fn print_question(out: &mut impl Write, session: &ExamSession) -> io::Result<()> {
    match session.phase() {
        ExamPhase::Presenting => {
            if let Some(current) = session.current() {
                writeln!(out, "\n{}", current.question())?;
                for (position, option) in current.options().enumerate() {
                    writeln!(out, "  {}. {option}", position + 1)?;
                }
                writeln!(out, "Enter answer numbers (e.g. `1 3`), `q` to quit.")?;
            }
        }
        ExamPhase::NoQuestions => {
            writeln!(out, "\nThe question bank is empty. Add questions with `add` first.")?;
        }
        ExamPhase::Exhausted => {
            writeln!(out, "\nAll questions have been used. `r` restarts the session, `q` quits.")?;
        }
        ExamPhase::Loading | ExamPhase::Answered => {}
    }
    Ok(())
}

fn run_exam(store: BankFile, feed: ChangeFeed) -> Result<(), Box<dyn Error>> {
    let mut session = ExamSession::new(store, feed);
    let mut lines = io::stdin().lock().lines();
    let mut out = io::stdout().lock();

    session.draw_next()?;
    print_question(&mut out, &session)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "q" => break,
            "r" => {
                session.reset_session();
                print_question(&mut out, &session)?;
            }
            "n" if session.phase() != ExamPhase::Presenting => {
                session.draw_next()?;
                print_question(&mut out, &session)?;
            }
            input if session.phase() == ExamPhase::Answered => {
                writeln!(out, "`n` shows the next question (got {input:?}).")?;
            }
            input => {
                let Some(selection) = parse_selection(input) else {
                    writeln!(out, "Answers are option numbers between 1 and the option count.")?;
                    continue;
                };
                match session.submit_answer(selection).cloned() {
                    Ok(review) => {
                        let verdict = if review.is_correct() { "Correct!" } else { "Wrong." };
                        writeln!(out, "{verdict}")?;
                        if let Some(current) = session.current() {
                            for (position, option) in current.options().enumerate() {
                                let mark = match review.mark(position) {
                                    OptionMark::Correct => "[+]",
                                    OptionMark::WronglySelected => "[x]",
                                    OptionMark::Unmarked => "   ",
                                };
                                writeln!(out, "  {mark} {}. {option}", position + 1)?;
                            }
                        }
                        writeln!(out, "`n` for the next question, `r` to restart, `q` to quit.")?;
                    }
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        print_question(&mut out, &session)?;
                    }
                }
            }
        }
    }

    writeln!(
        out,
        "Answered {} question(s), {} correct.",
        session.results().len(),
        session.correct_count()
    )?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "quizbank".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let path = options
            .bank
            .or_else(|| std::env::var(BANK_FILE_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BANK_FILENAME.to_owned());
        let store = if options.durable_writes {
            BankFile::new(path).with_durability(WriteDurability::Durable)
        } else {
            BankFile::new(path)
        };
        let feed = ChangeFeed::new();
        let editor = BankEditor::new(store.clone(), feed.clone());
        let transfer = BankTransfer::new(store.clone(), feed.clone());

        match options.command.ok_or("missing command")? {
            Command::List => {
                let bank = editor.load_bank();
                if bank.is_empty() {
                    println!("The question bank is empty.");
                }
                for (index, record) in bank.iter().enumerate() {
                    println!(
                        "{:>3}. {} ({} options)",
                        index + 1,
                        record.summary(),
                        record.options().len()
                    );
                }
            }
            Command::Status => {
                let status = store.status();
                println!("Bank file: {}", status.path.display());
                println!("Exists: {}", if status.exists { "yes" } else { "no" });
                println!("Size: {} bytes", status.size_bytes);
                println!("Questions: {}", status.question_count);
            }
            Command::Add(draft) => {
                let index = editor.add_question(draft.into_draft())?;
                println!("Added question #{}.", index + 1);
            }
            Command::Edit { index, draft } => {
                editor.edit_question(RecordTarget::at(index), draft.into_draft())?;
                println!("Updated question #{}.", index + 1);
            }
            Command::Delete { index, yes } => {
                let pending = editor.request_delete(index)?;
                let prompt = format!("Delete question #{} \"{}\"?", index + 1, pending.summary());
                if !yes && !confirm(&prompt)? {
                    println!("Nothing deleted.");
                    return Ok(());
                }
                editor.confirm_delete(pending)?;
                println!("Deleted question #{}.", index + 1);
            }
            Command::Import(path) => {
                let report = transfer.import_file(&path)?;
                println!("Imported {} question(s).", report.imported);
                if !report.skipped.is_empty() {
                    println!("Skipped {} invalid entr(y/ies).", report.skipped.len());
                }
            }
            Command::Export(path) => {
                let count = transfer.export_file(&path)?;
                println!("Exported {count} question(s) to {path}.");
            }
            Command::Exam => run_exam(store, feed)?,
            Command::Schema => {
                println!("{}", serde_json::to_string_pretty(&document_schema())?);
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("quizbank: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, parse_selection, CliOptions, Command, DraftArgs};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn requires_a_command() {
        parse(&[]).unwrap_err();
        parse(&["--bank", "q.json"]).unwrap_err();
    }

    #[test]
    fn parses_simple_commands() {
        for (name, expected) in [
            ("list", Command::List),
            ("status", Command::Status),
            ("exam", Command::Exam),
            ("schema", Command::Schema),
        ] {
            let options = parse(&[name]).expect("parse options");
            assert_eq!(options.command, Some(expected));
            assert!(options.bank.is_none());
            assert!(!options.durable_writes);
        }
    }

    #[test]
    fn parses_global_flags_anywhere() {
        let options = parse(&["list", "--bank", "data/q.json", "--durable-writes"])
            .expect("parse options");
        assert_eq!(options.bank.as_deref(), Some("data/q.json"));
        assert!(options.durable_writes);
    }

    #[test]
    fn parses_add_draft() {
        let options = parse(&[
            "add",
            "--question",
            "2+2?",
            "--option",
            "3",
            "--option",
            "4",
            "--correct",
            "2",
        ])
        .expect("parse options");
        assert_eq!(
            options.command,
            Some(Command::Add(DraftArgs {
                question: Some("2+2?".to_owned()),
                options: vec!["3".to_owned(), "4".to_owned()],
                correct: vec![2],
            }))
        );
    }

    #[test]
    fn converts_question_numbers_to_indices() {
        let options = parse(&["delete", "3", "--yes"]).expect("parse options");
        assert_eq!(options.command, Some(Command::Delete { index: 2, yes: true }));

        let options = parse(&["edit", "1", "--question", "q"]).expect("parse options");
        assert!(matches!(options.command, Some(Command::Edit { index: 0, .. })));

        parse(&["delete", "0"]).unwrap_err();
        parse(&["delete", "x"]).unwrap_err();
    }

    #[test]
    fn rejects_misplaced_flags() {
        parse(&["list", "--option", "a"]).unwrap_err();
        parse(&["add", "--yes"]).unwrap_err();
        parse(&["add", "--question", "a", "--question", "b"]).unwrap_err();
        parse(&["--bank", "a", "--bank", "b", "list"]).unwrap_err();
        parse(&["add", "--correct", "one"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse(&["--nope", "list"]).unwrap_err();
        parse(&["frobnicate"]).unwrap_err();
        parse(&["list", "extra"]).unwrap_err();
        parse(&["import"]).unwrap_err();
    }

    #[test]
    fn parses_import_and_export_paths() {
        let options = parse(&["import", "in.json"]).expect("parse options");
        assert_eq!(options.command, Some(Command::Import("in.json".to_owned())));
        let options = parse(&["export", "out.json"]).expect("parse options");
        assert_eq!(options.command, Some(Command::Export("out.json".to_owned())));
    }

    #[test]
    fn parses_answer_selection() {
        assert_eq!(parse_selection("1 3"), Some(vec![0, 2]));
        assert_eq!(parse_selection("2,1"), Some(vec![1, 0]));
        assert_eq!(parse_selection("  "), Some(vec![]));
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("a"), None);
    }
}
