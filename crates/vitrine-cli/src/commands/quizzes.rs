//! The `vitrine quizzes` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::commands::open_data;
use crate::config::VitrineConfig;

pub fn execute(config: &VitrineConfig, category: Option<String>, json: bool) -> Result<()> {
    let catalog = open_data(config)?.trivia()?;
    let sets = catalog.by_category(category.as_deref());

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    if sets.is_empty() {
        println!("No quizzes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Category", "Questions"]);
    for set in &sets {
        table.add_row(vec![
            Cell::new(&set.id),
            Cell::new(&set.title),
            Cell::new(&set.category),
            Cell::new(set.questions.len()),
        ]);
    }
    println!("{table}");
    println!("Categories: {}", catalog.categories().join(", "));

    Ok(())
}
