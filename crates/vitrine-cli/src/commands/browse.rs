//! The `vitrine browse` command: the content gallery.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use vitrine_core::catalog::{CatalogItem, ContentKind};

use crate::commands::open_data;
use crate::config::VitrineConfig;

pub fn execute(
    config: &VitrineConfig,
    kind: String,
    category: Option<String>,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let kind: ContentKind = kind.parse()?;
    let gallery = open_data(config)?.gallery(kind)?;

    if let Some(id) = id {
        let item = gallery
            .find(&id)
            .with_context(|| format!("no {kind} with id {id}"))?;
        if json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            print_detail(item);
        }
        return Ok(());
    }

    let items = gallery.filter(category.as_deref());
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let categories = gallery.categories();
    if !categories.is_empty() {
        println!("Categories: All, {}", categories.join(", "));
    }
    if items.is_empty() {
        println!("Nothing to show.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Category"]);
    for item in &items {
        table.add_row(vec![
            Cell::new(item.id()),
            Cell::new(item.name()),
            Cell::new(item.category().unwrap_or("")),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_detail(item: &CatalogItem) {
    println!("{} ({})", item.name(), item.kind());
    for (label, value) in item.fields() {
        println!("  {label}: {value}");
    }
    if !item.image().is_empty() {
        println!("  image: {}", item.image());
    }
}
