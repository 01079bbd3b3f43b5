//! JSON data source parser.
//!
//! Loads the quiz files and content catalogs from a data directory, and
//! validates them.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, ContentKind, Gallery, Innovation, Leader, Location, Painting};
use crate::model::{Philosopher, TraitQuizData, TriviaCatalog};

/// File name of the trait quiz inside a data directory.
pub const TRAIT_QUIZ_FILE: &str = "trait-quiz.json";
/// File name of the trivia catalog inside a data directory.
pub const TRIVIA_FILE: &str = "culture-quiz.json";

fn parse_json<T: DeserializeOwned>(content: &str, source_path: &Path) -> Result<T> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))
}

/// Parse a trait quiz JSON string (useful for testing).
pub fn parse_trait_quiz_str(content: &str, source_path: &Path) -> Result<TraitQuizData> {
    parse_json(content, source_path)
}

/// Parse a trait quiz file.
pub fn parse_trait_quiz(path: &Path) -> Result<TraitQuizData> {
    parse_trait_quiz_str(&read_file(path)?, path)
}

/// Parse philosophers from either a bare array or `{ "philosophers": [...] }`.
///
/// Any other JSON shape yields an empty list.
pub fn parse_philosophers_str(content: &str, source_path: &Path) -> Result<Vec<Philosopher>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PhilosopherFile {
        List(Vec<Philosopher>),
        Wrapped { philosophers: Vec<Philosopher> },
    }

    let value: serde_json::Value = parse_json(content, source_path)?;
    if !value.is_array() && value.get("philosophers").is_none() {
        tracing::warn!(path = %source_path.display(), "no philosophers found in data file");
        return Ok(Vec::new());
    }
    let parsed: PhilosopherFile = serde_json::from_value(value)
        .with_context(|| format!("failed to parse philosophers: {}", source_path.display()))?;
    Ok(match parsed {
        PhilosopherFile::List(list) => list,
        PhilosopherFile::Wrapped { philosophers } => philosophers,
    })
}

pub fn parse_philosophers(path: &Path) -> Result<Vec<Philosopher>> {
    parse_philosophers_str(&read_file(path)?, path)
}

/// Parse a trivia catalog JSON string (`{ "quiz": [...] }`).
pub fn parse_trivia_catalog_str(content: &str, source_path: &Path) -> Result<TriviaCatalog> {
    parse_json(content, source_path)
}

pub fn parse_trivia_catalog(path: &Path) -> Result<TriviaCatalog> {
    parse_trivia_catalog_str(&read_file(path)?, path)
}

/// Parse a JSON array of catalog items of the given kind.
pub fn parse_catalog_str(
    kind: ContentKind,
    content: &str,
    source_path: &Path,
) -> Result<Vec<CatalogItem>> {
    let items = match kind {
        ContentKind::Philosopher => parse_philosophers_str(content, source_path)?
            .into_iter()
            .map(CatalogItem::Philosopher)
            .collect(),
        ContentKind::Painting => parse_json::<Vec<Painting>>(content, source_path)?
            .into_iter()
            .map(CatalogItem::Painting)
            .collect(),
        ContentKind::Location => parse_json::<Vec<Location>>(content, source_path)?
            .into_iter()
            .map(CatalogItem::Location)
            .collect(),
        ContentKind::Leader => parse_json::<Vec<Leader>>(content, source_path)?
            .into_iter()
            .map(CatalogItem::Leader)
            .collect(),
        ContentKind::Innovation => parse_json::<Vec<Innovation>>(content, source_path)?
            .into_iter()
            .map(CatalogItem::Innovation)
            .collect(),
    };
    Ok(items)
}

/// A data directory holding the quiz and catalog files under fixed names.
#[derive(Debug, Clone)]
pub struct DataSet {
    dir: PathBuf,
}

impl DataSet {
    /// Open a data directory. Individual files are read lazily.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            anyhow::bail!("not a directory: {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run `parse` on `file` if it exists, else fall back to the default.
    fn load_optional<T: Default>(
        &self,
        file: &str,
        parse: impl FnOnce(&Path) -> Result<T>,
    ) -> Result<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "data file missing, using empty data");
            return Ok(T::default());
        }
        parse(&path)
    }

    pub fn trait_quiz(&self) -> Result<TraitQuizData> {
        self.load_optional(TRAIT_QUIZ_FILE, parse_trait_quiz)
    }

    pub fn philosophers(&self) -> Result<Vec<Philosopher>> {
        self.load_optional(ContentKind::Philosopher.file_name(), parse_philosophers)
    }

    pub fn trivia(&self) -> Result<TriviaCatalog> {
        self.load_optional(TRIVIA_FILE, parse_trivia_catalog)
    }

    /// The browsable gallery for one content kind.
    pub fn gallery(&self, kind: ContentKind) -> Result<Gallery> {
        let items = self.load_optional(kind.file_name(), |path| {
            parse_catalog_str(kind, &read_file(path)?, path)
        })?;
        Ok(Gallery::new(items))
    }

    /// Load every file and collect validation issues across all of them.
    pub fn validate(&self) -> Result<Vec<ValidationIssue>> {
        let quiz = self.trait_quiz()?;
        let mut issues = validate_trait_quiz(&quiz);
        issues.extend(validate_philosophers(
            &self.philosophers()?,
            quiz.questions.len(),
        ));
        issues.extend(validate_trivia(&self.trivia()?));
        for kind in ContentKind::ALL {
            if kind == ContentKind::Philosopher {
                continue;
            }
            issues.extend(validate_gallery(kind, &self.gallery(kind)?));
        }
        Ok(issues)
    }
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    /// The data would make an engine produce wrong results.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A finding from data validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Where the issue was found, e.g. `trait-quiz question 2`.
    pub context: String,
    pub message: String,
}

impl ValidationIssue {
    fn warning(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            context: context.into(),
            message: message.into(),
        }
    }

    fn error(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Validate the trait quiz questions.
pub fn validate_trait_quiz(quiz: &TraitQuizData) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, question) in quiz.questions.iter().enumerate() {
        let context = format!("trait-quiz question {}", index + 1);
        if question.options.is_empty() {
            issues.push(ValidationIssue::error(&context, "question has no options"));
        }
        let mut letters = HashSet::new();
        for option in &question.options {
            if !letters.insert(option.letter) {
                issues.push(ValidationIssue::warning(
                    &context,
                    format!("duplicate option letter: {}", option.letter),
                ));
            }
        }
    }

    issues
}

/// Validate philosopher entries against the trait quiz length.
pub fn validate_philosophers(
    philosophers: &[Philosopher],
    question_count: usize,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    for p in philosophers {
        let context = format!("philosopher {}", p.id);
        if !seen_ids.insert(&p.id) {
            issues.push(ValidationIssue::error(&context, format!("duplicate id: {}", p.id)));
        }
        if p.name.trim().is_empty() {
            issues.push(ValidationIssue::warning(&context, "name is empty"));
        }
        let code_len = p.code.chars().count();
        if question_count > 0 && code_len != question_count {
            issues.push(ValidationIssue::warning(
                &context,
                format!("code has {code_len} letters but the quiz has {question_count} questions"),
            ));
        }
        let invalid: String = p
            .code
            .chars()
            .filter(|c| !matches!(c.to_ascii_uppercase(), 'A'..='E'))
            .collect();
        if !invalid.is_empty() {
            issues.push(ValidationIssue::warning(
                &context,
                format!("code contains letters outside A-E: {invalid}"),
            ));
        }
    }

    issues
}

/// Validate the trivia quizzes.
pub fn validate_trivia(catalog: &TriviaCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    for set in &catalog.quiz {
        let set_context = format!("quiz {}", set.id);
        if !seen_ids.insert(&set.id) {
            issues.push(ValidationIssue::error(
                &set_context,
                format!("duplicate quiz id: {}", set.id),
            ));
        }
        if set.questions.is_empty() {
            issues.push(ValidationIssue::warning(&set_context, "quiz has no questions"));
        }
        for (index, question) in set.questions.iter().enumerate() {
            let context = format!("quiz {} question {}", set.id, index + 1);
            if question.question.trim().is_empty() {
                issues.push(ValidationIssue::warning(&context, "question text is empty"));
            }
            let count = question.correct_count();
            if question.options.is_empty() {
                issues.push(ValidationIssue::error(&context, "question has no options"));
            } else if count != 1 {
                issues.push(ValidationIssue::error(
                    &context,
                    format!("{count} correct options, expected exactly one"),
                ));
            }
        }
    }

    issues
}

/// Validate a content gallery.
pub fn validate_gallery(kind: ContentKind, gallery: &Gallery) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    for item in gallery.items() {
        let context = format!("{kind} {}", item.id());
        if !seen_ids.insert(item.id()) {
            issues.push(ValidationIssue::error(
                &context,
                format!("duplicate id: {}", item.id()),
            ));
        }
        if item.name().trim().is_empty() {
            issues.push(ValidationIssue::warning(&context, "name is empty"));
        }
    }

    issues
}
