//! The persisted UI language preference.
//!
//! Storage is pluggable through [`PreferenceStore`]; the TOML file store is
//! what the CLI uses, the memory store backs tests and ephemeral sessions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ja,
            Language::Ja => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ja" | "japanese" => Ok(Language::Ja),
            other => Err(format!("unknown language: {other} (expected en or ja)")),
        }
    }
}

/// Where the language preference is kept.
pub trait PreferenceStore {
    /// The stored language, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<Language>>;

    fn save(&mut self, language: Language) -> Result<()>;
}

/// Keeps the preference in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    language: Option<Language>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Language>> {
        Ok(self.language)
    }

    fn save(&mut self, language: Language) -> Result<()> {
        self.language = Some(language);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    language: Language,
}

/// Stores the preference as `language = "en"` in a TOML file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<Option<Language>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read preferences: {}", self.path.display()))?;
        let file: PreferenceFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse preferences: {}", self.path.display()))?;
        Ok(Some(file.language))
    }

    fn save(&mut self, language: Language) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string(&PreferenceFile { language })?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write preferences: {}", self.path.display()))?;
        Ok(())
    }
}

/// The language preference service.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
    language: Language,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Load the stored language. An unreadable store falls back to the
    /// default language.
    pub fn open(store: S) -> Self {
        let language = match store.load() {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable preferences: {e:#}");
                Language::default()
            }
        };
        Self { store, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set(&mut self, language: Language) -> Result<()> {
        self.store.save(language)?;
        self.language = language;
        tracing::debug!(%language, "language preference saved");
        Ok(())
    }

    /// Switch to the other language and return it.
    pub fn toggle(&mut self) -> Result<Language> {
        let next = self.language.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
