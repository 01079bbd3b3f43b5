//! Core data model types for vitrine.
//!
//! These are the read-only shapes supplied by the data source: trait quiz
//! questions and candidates, trivia quizzes, and ranking entities.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One of the five trait dimensions used to profile quiz takers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(alias = "d")]
    D,
    #[serde(alias = "e")]
    E,
}

impl Axis {
    /// All axes in display order.
    pub const ALL: [Axis; 5] = [Axis::A, Axis::B, Axis::C, Axis::D, Axis::E];

    /// The upper-case letter for this axis.
    pub fn letter(self) -> char {
        match self {
            Axis::A => 'A',
            Axis::B => 'B',
            Axis::C => 'C',
            Axis::D => 'D',
            Axis::E => 'E',
        }
    }

    /// Position of this axis in [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Axis::A => 0,
            Axis::B => 1,
            Axis::C => 2,
            Axis::D => 3,
            Axis::E => 4,
        }
    }

    /// Parse a single character, ignoring case.
    pub fn from_char(c: char) -> Option<Axis> {
        match c.to_ascii_uppercase() {
            'A' => Some(Axis::A),
            'B' => Some(Axis::B),
            'C' => Some(Axis::C),
            'D' => Some(Axis::D),
            'E' => Some(Axis::E),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Axis {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Axis::from_char(c).ok_or_else(|| DataError::UnknownAxis(s.into())),
            _ => Err(DataError::UnknownAxis(s.into())),
        }
    }
}

/// Human-readable names for the five axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
    #[serde(rename = "E")]
    pub e: String,
}

impl AxisLabels {
    pub fn label(&self, axis: Axis) -> &str {
        match axis {
            Axis::A => &self.a,
            Axis::B => &self.b,
            Axis::C => &self.c,
            Axis::D => &self.d,
            Axis::E => &self.e,
        }
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            a: "Nature & Intuition".into(),
            b: "Radical Freedom".into(),
            c: "Absurd Resistance".into(),
            d: "Power Critique".into(),
            e: "Social Ethics".into(),
        }
    }
}

/// A single answer choice in the trait quiz, tagged with its axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitOption {
    pub letter: Axis,
    pub text: String,
}

/// A fixed-choice trait quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<TraitOption>,
}

/// The trait quiz data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitQuizData {
    #[serde(default)]
    pub questions: Vec<TraitQuestion>,
    #[serde(default, rename = "axisLabels")]
    pub axis_labels: AxisLabels,
}

/// A philosopher: both a gallery entry and a trait quiz candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Philosopher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub birth: String,
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, rename = "fun-desc")]
    pub fun_desc: String,
    /// Trait code over the axis alphabet, one letter per question.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub image: String,
}

/// One answer choice of a trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

/// A trivia question with its explanatory note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub options: Vec<TriviaOption>,
}

impl TriviaQuestion {
    /// Number of options flagged as correct.
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }

    /// The unique correct option, if the question is well formed.
    pub fn correct_option(&self) -> Option<&TriviaOption> {
        match self.correct_count() {
            1 => self.options.iter().find(|o| o.correct),
            _ => None,
        }
    }
}

/// A named trivia quiz, one entry of the quiz selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuizSet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub questions: Vec<TriviaQuestion>,
}

/// The trivia data file: every quiz available for selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaCatalog {
    #[serde(default)]
    pub quiz: Vec<TriviaQuizSet>,
}

impl TriviaCatalog {
    pub fn find(&self, id: &str) -> Option<&TriviaQuizSet> {
        self.quiz.iter().find(|q| q.id == id)
    }

    /// Quizzes in the given category, compared case-insensitively.
    /// `None` or `"All"` selects every quiz.
    pub fn by_category(&self, category: Option<&str>) -> Vec<&TriviaQuizSet> {
        match category {
            None => self.quiz.iter().collect(),
            Some(c) if c.eq_ignore_ascii_case("all") => self.quiz.iter().collect(),
            Some(c) => self
                .quiz
                .iter()
                .filter(|q| q.category.eq_ignore_ascii_case(c))
                .collect(),
        }
    }

    /// Distinct categories in first-appearance order, lower-cased.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for q in &self.quiz {
            let c = q.category.to_lowercase();
            if !c.is_empty() && !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }
}

/// An entity taking part in pairwise ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// Display fields shown with the final result.
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl RankingEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            details: BTreeMap::new(),
        }
    }

    /// A display field as text, if present.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(|v| v.as_str())
    }
}

impl From<&Philosopher> for RankingEntity {
    fn from(p: &Philosopher) -> Self {
        let mut details = BTreeMap::new();
        for (key, value) in [("birth", &p.birth), ("quote", &p.quote), ("fun-desc", &p.fun_desc)] {
            if !value.is_empty() {
                details.insert(key.to_string(), serde_json::Value::String(value.clone()));
            }
        }
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            image: p.image.clone(),
            details,
        }
    }
}
