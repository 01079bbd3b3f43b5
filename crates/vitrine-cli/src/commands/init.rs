//! The `vitrine init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("vitrine.toml").exists() {
        println!("vitrine.toml already exists, skipping.");
    } else {
        std::fs::write("vitrine.toml", SAMPLE_CONFIG)?;
        println!("Created vitrine.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point data_dir in vitrine.toml at your data files");
    println!("  2. Run: vitrine validate");
    println!("  3. Run: vitrine profile");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vitrine configuration

# Directory with trait-quiz.json, philosophers.json, culture-quiz.json,
# paintings.json, locations.json, leaders.json and innovations.json.
data_dir = "./datasets"

# Pairwise duels
max_rounds = 10
k_factor = 32.0

# Language preference file (defaults to ~/.config/vitrine/preferences.toml)
# preferences_path = "${HOME}/.config/vitrine/preferences.toml"
"#;
