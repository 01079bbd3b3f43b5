//! The `vitrine trivia` command: multiple-choice culture quizzes.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::Rng;

use vitrine_core::engine::QuizEngine;
use vitrine_core::model::{TriviaCatalog, TriviaQuizSet};
use vitrine_core::report::{to_json, TriviaOutcome};
use vitrine_core::trivia::{SelectOutcome, TriviaEvent, TriviaPhase, TriviaQuiz};

use crate::commands::{messages, open_data, read_command, session_output, session_rng};
use crate::config::VitrineConfig;
use crate::messages::Messages;

pub struct TriviaArgs {
    pub quiz: Option<String>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn execute(config: &VitrineConfig, args: TriviaArgs) -> Result<()> {
    let data = open_data(config)?;
    let catalog = data.trivia()?;
    let msgs = messages(config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = session_output(args.json);

    let set = match &args.quiz {
        Some(id) => catalog
            .find(id)
            .with_context(|| format!("no quiz with id {id}"))?,
        None => match pick_quiz(&catalog, &mut input, &mut output, msgs)? {
            Some(set) => set,
            None => return Ok(()),
        },
    };
    tracing::info!(quiz = %set.id, questions = set.questions.len(), "starting trivia quiz");

    let mut quiz = TriviaQuiz::with_rng(set.questions.clone(), session_rng(args.seed))
        .with_context(|| format!("quiz {} is malformed", set.id))?;
    writeln!(output, "{}", set.title)?;
    let outcome = run_session(&mut quiz, &mut input, &mut output, msgs)?;

    if args.json {
        println!("{}", to_json(&outcome)?);
    } else if quiz.is_finished() {
        print_outcome(&outcome, &mut output, msgs)?;
    }
    Ok(())
}

/// Show the quiz selection list and read a 1-based choice.
pub fn pick_quiz<'a, R: BufRead, W: Write>(
    catalog: &'a TriviaCatalog,
    input: &mut R,
    output: &mut W,
    msgs: &Messages,
) -> Result<Option<&'a TriviaQuizSet>> {
    if catalog.quiz.is_empty() {
        writeln!(output, "{}", msgs.no_questions)?;
        return Ok(None);
    }
    writeln!(output, "{}", msgs.pick_quiz)?;
    for (i, set) in catalog.quiz.iter().enumerate() {
        writeln!(output, "  {}) {} [{}]", i + 1, set.title, set.category)?;
    }
    loop {
        let Some(command) = read_command(input, output)? else {
            return Ok(None);
        };
        if command.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match command.parse::<usize>() {
            Ok(n) if (1..=catalog.quiz.len()).contains(&n) => return Ok(Some(&catalog.quiz[n - 1])),
            _ => writeln!(output, "{}", msgs.invalid_input)?,
        }
    }
}

fn show_question<G: Rng, W: Write>(
    quiz: &TriviaQuiz<G>,
    output: &mut W,
    msgs: &Messages,
) -> Result<()> {
    let (Some(index), Some(question)) = (quiz.current_index(), quiz.current_question()) else {
        return Ok(());
    };
    writeln!(
        output,
        "\n[{}/{}] {:.0}% {}",
        index + 1,
        quiz.total(),
        quiz.progress_percent(),
        question.question
    )?;

    let chosen = quiz.answers()[index];
    let revealed = quiz.is_revealed();
    for (position, (original, option)) in quiz.display_options().into_iter().enumerate() {
        let marker = match (revealed, option.correct, chosen == Some(original)) {
            (true, true, _) => '+',
            (true, false, true) => 'x',
            _ => ' ',
        };
        writeln!(output, " {marker}{}) {}", position + 1, option.text)?;
    }

    if revealed {
        if let Some(answer) = quiz.current_answer() {
            if answer.correct {
                writeln!(output, "{}", msgs.correct)?;
            } else if let Some(correct) = question.correct_option() {
                writeln!(output, "{} {}", msgs.incorrect, correct.text)?;
            }
        }
        if !question.note.is_empty() {
            writeln!(output, "{} {}", msgs.did_you_know, question.note)?;
        }
    }
    Ok(())
}

/// Run the quiz from line input until it completes, the user quits, or
/// input ends.
pub fn run_session<G: Rng, R: BufRead, W: Write>(
    quiz: &mut TriviaQuiz<G>,
    input: &mut R,
    output: &mut W,
    msgs: &Messages,
) -> Result<TriviaOutcome> {
    writeln!(output, "{}", msgs.trivia_help)?;

    loop {
        match quiz.phase() {
            TriviaPhase::NoQuestions => {
                writeln!(output, "{}", msgs.no_questions)?;
                break;
            }
            TriviaPhase::Completed => break,
            TriviaPhase::InProgress { .. } => show_question(quiz, output, msgs)?,
        }

        let Some(command) = read_command(input, output)? else {
            writeln!(output, "{}", msgs.session_ended)?;
            break;
        };
        match command.to_ascii_lowercase().as_str() {
            "q" => break,
            "" | "n" => quiz.dispatch(TriviaEvent::Next),
            "p" => quiz.dispatch(TriviaEvent::Prev),
            "r" => quiz.dispatch(TriviaEvent::Reset),
            other => {
                let outcome = match other.parse::<usize>() {
                    Ok(n) if n >= 1 => quiz.select_shown(n - 1),
                    _ => SelectOutcome::Ignored,
                };
                if outcome == SelectOutcome::Ignored {
                    writeln!(output, "{}", msgs.invalid_input)?;
                }
            }
        }
    }

    Ok(TriviaOutcome::from_quiz(quiz))
}

fn print_outcome<W: Write>(
    outcome: &TriviaOutcome,
    output: &mut W,
    msgs: &Messages,
) -> Result<()> {
    writeln!(
        output,
        "\n{}: {}/{} ({}%)",
        msgs.score, outcome.score, outcome.total, outcome.percentage
    )?;
    writeln!(output, "{}", msgs.tier_message(outcome.tier))?;

    let mut table = Table::new();
    table.set_header(vec!["Question", "Your answer", "Correct answer", ""]);
    for entry in &outcome.review {
        table.add_row(vec![
            Cell::new(&entry.question),
            Cell::new(entry.chosen.as_deref().unwrap_or("-")),
            Cell::new(&entry.correct_answer),
            Cell::new(if entry.is_correct { "ok" } else { "x" }),
        ]);
    }
    writeln!(output, "\n{table}")?;
    Ok(())
}
