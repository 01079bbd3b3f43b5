//! The `vitrine validate` command.

use anyhow::Result;

use vitrine_core::parser::{has_errors, Severity};

use crate::commands::open_data;
use crate::config::VitrineConfig;

pub fn execute(config: &VitrineConfig) -> Result<()> {
    let data = open_data(config)?;
    println!("Data directory: {}", data.dir().display());

    let quiz = data.trait_quiz()?;
    println!("Trait quiz: {} questions", quiz.questions.len());
    println!("Philosophers: {}", data.philosophers()?.len());
    let trivia = data.trivia()?;
    let question_count: usize = trivia.quiz.iter().map(|q| q.questions.len()).sum();
    println!("Trivia: {} quizzes, {} questions", trivia.quiz.len(), question_count);

    let issues = data.validate()?;
    for issue in &issues {
        let label = match issue.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        println!("  [{}] {label}: {}", issue.context, issue.message);
    }

    if issues.is_empty() {
        println!("All data files valid.");
    } else {
        println!("\n{} issue(s) found.", issues.len());
    }

    if has_errors(&issues) {
        anyhow::bail!("data validation failed");
    }
    Ok(())
}
