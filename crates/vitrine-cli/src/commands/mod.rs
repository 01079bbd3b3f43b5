//! Subcommand implementations.
//!
//! Interactive sessions read one command per line from a `BufRead` and write
//! to a `Write`, so they can be driven from tests as well as a terminal.

pub mod browse;
pub mod duel;
pub mod init;
pub mod lang;
pub mod profile;
pub mod quizzes;
pub mod trivia;
pub mod validate;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use vitrine_core::engine::{entropy_rng, seeded_rng, DefaultRng};
use vitrine_core::parser::DataSet;
use vitrine_core::preferences::{FileStore, Preferences};

use crate::config::VitrineConfig;
use crate::messages::Messages;

/// Open the configured data directory.
pub fn open_data(config: &VitrineConfig) -> Result<DataSet> {
    DataSet::open(&config.data_dir)
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))
}

/// Interface strings for the stored language preference.
pub fn messages(config: &VitrineConfig) -> &'static Messages {
    let prefs = Preferences::open(FileStore::new(config.preferences_file()));
    Messages::for_language(prefs.language())
}

/// A seeded random source when `seed` is given, else a fresh one.
pub fn session_rng(seed: Option<u64>) -> DefaultRng {
    match seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded session");
            seeded_rng(seed)
        }
        None => entropy_rng(),
    }
}

/// Write a prompt and read one trimmed line. `None` at end of input.
pub fn read_command<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    write!(output, "> ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Where interactive output goes: stderr when stdout carries JSON.
pub fn session_output(json: bool) -> Box<dyn Write> {
    if json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_command_trims_and_detects_eof() {
        let mut input = Cursor::new("  a \n");
        let mut output = Vec::new();
        assert_eq!(read_command(&mut input, &mut output).unwrap().as_deref(), Some("a"));
        assert_eq!(read_command(&mut input, &mut output).unwrap(), None);
        assert!(String::from_utf8(output).unwrap().starts_with("> "));
    }
}
