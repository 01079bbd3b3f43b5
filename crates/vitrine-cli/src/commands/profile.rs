//! The `vitrine profile` command: the philosopher trait quiz.

use std::io::{BufRead, Write};

use anyhow::Result;
use comfy_table::{Cell, Table};

use vitrine_core::engine::QuizEngine;
use vitrine_core::model::Axis;
use vitrine_core::report::{to_json, TraitQuizOutcome};
use vitrine_core::trait_quiz::{TraitQuiz, TraitQuizEvent, TraitQuizStatus};

use crate::commands::{messages, open_data, read_command, session_output};
use crate::config::VitrineConfig;
use crate::messages::Messages;

pub fn execute(config: &VitrineConfig, json: bool) -> Result<()> {
    let data = open_data(config)?;
    let mut quiz = TraitQuiz::new(data.trait_quiz()?, data.philosophers()?);
    let msgs = messages(config);

    let stdin = std::io::stdin();
    let mut output = session_output(json);
    let outcome = run_session(&mut quiz, &mut stdin.lock(), &mut output, msgs)?;

    if json {
        println!("{}", to_json(&outcome)?);
    } else {
        print_outcome(&outcome, &mut output, msgs)?;
    }
    Ok(())
}

/// Drive the quiz from line input until it completes, the user quits, or
/// input ends.
pub fn run_session<R: BufRead, W: Write>(
    quiz: &mut TraitQuiz,
    input: &mut R,
    output: &mut W,
    msgs: &Messages,
) -> Result<TraitQuizOutcome> {
    writeln!(output, "{}", msgs.profile_title)?;
    writeln!(output, "{}", msgs.profile_help)?;

    loop {
        match quiz.status() {
            TraitQuizStatus::NoQuestions => {
                writeln!(output, "{}", msgs.no_questions)?;
                break;
            }
            TraitQuizStatus::Completed => break,
            TraitQuizStatus::InProgress => {}
        }

        let index = quiz.current_index();
        if let Some(question) = quiz.current_question() {
            let chosen = quiz.answers()[index];
            writeln!(
                output,
                "\n[{}/{}] {:.0}% {}",
                index + 1,
                quiz.questions().len(),
                quiz.progress_percent(),
                question.question
            )?;
            for option in &question.options {
                let marker = if chosen == Some(option.letter) { '*' } else { ' ' };
                writeln!(output, " {marker}{}) {}", option.letter, option.text)?;
            }
        }

        let Some(command) = read_command(input, output)? else {
            writeln!(output, "{}", msgs.session_ended)?;
            break;
        };
        let advance = match command.to_ascii_lowercase().as_str() {
            "q" => break,
            "p" => {
                quiz.dispatch(TraitQuizEvent::Prev);
                false
            }
            "r" => {
                quiz.dispatch(TraitQuizEvent::Reset);
                false
            }
            "" | "n" => true,
            other => {
                let answered = other
                    .parse::<Axis>()
                    .is_ok_and(|axis| quiz.answer_current(axis));
                if !answered {
                    writeln!(output, "{}", msgs.invalid_input)?;
                }
                answered
            }
        };
        if advance {
            let was_last = index + 1 == quiz.questions().len();
            quiz.dispatch(TraitQuizEvent::Next);
            if was_last && !quiz.is_finished() {
                writeln!(output, "{}", msgs.answer_all_first)?;
            }
        }
    }

    Ok(TraitQuizOutcome::from_quiz(quiz))
}

fn print_outcome<W: Write>(
    outcome: &TraitQuizOutcome,
    output: &mut W,
    msgs: &Messages,
) -> Result<()> {
    if !outcome.completed {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Axis", "Trait", "Answers"]);
    for score in &outcome.axis_scores {
        table.add_row(vec![
            Cell::new(score.axis),
            Cell::new(&score.label),
            Cell::new(score.count),
        ]);
    }
    writeln!(output, "\n{table}")?;

    match &outcome.matched {
        Some(p) => {
            writeln!(output, "\n{}: {} ({})", msgs.your_match, p.name, p.code)?;
            if !p.quote.is_empty() {
                writeln!(output, "  \"{}\"", p.quote)?;
            }
            if !p.fun_desc.is_empty() {
                writeln!(output, "  {}", p.fun_desc)?;
            }
        }
        None => writeln!(output, "\n{}", msgs.no_match)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vitrine_core::model::{AxisLabels, Philosopher, TraitOption, TraitQuestion, TraitQuizData};
    use vitrine_core::preferences::Language;

    fn quiz() -> TraitQuiz {
        let question = |text: &str| TraitQuestion {
            question: text.into(),
            options: Axis::ALL
                .iter()
                .map(|&letter| TraitOption {
                    letter,
                    text: format!("answer {letter}"),
                })
                .collect(),
        };
        let data = TraitQuizData {
            questions: vec![question("First?"), question("Second?")],
            axis_labels: AxisLabels::default(),
        };
        let candidates = vec![
            Philosopher {
                id: "camus".into(),
                name: "Albert Camus".into(),
                code: "CC".into(),
                ..Default::default()
            },
            Philosopher {
                id: "foucault".into(),
                name: "Michel Foucault".into(),
                code: "DD".into(),
                ..Default::default()
            },
        ];
        TraitQuiz::new(data, candidates)
    }

    fn run(input: &str) -> (TraitQuizOutcome, String) {
        let mut q = quiz();
        let mut output = Vec::new();
        let outcome = run_session(
            &mut q,
            &mut Cursor::new(input),
            &mut output,
            Messages::for_language(Language::En),
        )
        .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn letters_answer_and_advance() {
        let (outcome, text) = run("d\nD\n");
        assert!(outcome.completed);
        assert_eq!(outcome.answer_code, "DD");
        assert_eq!(outcome.matched.unwrap().id, "foucault");
        assert!(text.contains("[2/2]"));
    }

    #[test]
    fn going_back_changes_an_answer() {
        let (outcome, _) = run("a\np\nc\nc\n");
        assert_eq!(outcome.answer_code, "CC");
        assert_eq!(outcome.matched.unwrap().id, "camus");
    }

    #[test]
    fn skipping_blocks_completion() {
        let (outcome, text) = run("n\nn\n");
        assert!(!outcome.completed);
        assert!(text.contains("Answer every question"));
    }

    #[test]
    fn end_of_input_stops_gracefully() {
        let (outcome, text) = run("c\n");
        assert!(!outcome.completed);
        assert_eq!(outcome.answer_code, "C-");
        assert!(text.contains("Session ended"));
    }

    #[test]
    fn invalid_letters_are_reported() {
        let (outcome, text) = run("z\nq\n");
        assert!(text.contains("Not a valid choice"));
        assert_eq!(outcome.answer_code, "--");
    }
}
