//! Result summaries for finished sessions.
//!
//! Outcomes are built from an engine's state on demand and rendered by the
//! presentation layer as text or JSON. Nothing here is persisted.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;

use crate::model::{Axis, Philosopher};
use crate::ranking::PairwiseRanking;
use crate::statistics::PerformanceTier;
use crate::trait_quiz::TraitQuiz;
use crate::trivia::{ReviewEntry, TriviaQuiz};

/// Per-axis tally with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisScore {
    pub axis: Axis,
    pub label: String,
    pub count: usize,
}

/// Summary of a trait quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitQuizOutcome {
    pub completed: bool,
    /// The user's answers as a code, `-` for unanswered questions.
    pub answer_code: String,
    pub axis_scores: Vec<AxisScore>,
    pub dominant: Option<Axis>,
    pub matched: Option<Philosopher>,
}

impl TraitQuizOutcome {
    pub fn from_quiz(quiz: &TraitQuiz) -> Self {
        let scores = quiz.axis_scores();
        let labels = quiz.axis_labels();
        Self {
            completed: quiz.is_completed(),
            answer_code: quiz.answer_code(),
            axis_scores: scores
                .iter()
                .map(|(axis, count)| AxisScore {
                    axis,
                    label: labels.label(axis).to_string(),
                    count,
                })
                .collect(),
            dominant: scores.dominant(),
            matched: quiz.matched_candidate().cloned(),
        }
    }
}

/// Summary of a trivia quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaOutcome {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: PerformanceTier,
    pub review: Vec<ReviewEntry>,
}

impl TriviaOutcome {
    pub fn from_quiz<R: Rng>(quiz: &TriviaQuiz<R>) -> Self {
        let tier = quiz.tier();
        Self {
            score: quiz.score(),
            total: quiz.total(),
            percentage: quiz.percentage(),
            tier,
            review: quiz.review_list(),
        }
    }
}

/// One row of the final ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub rating: i32,
}

/// Summary of a pairwise ranking session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingOutcome {
    pub finished: bool,
    /// Comparisons made so far.
    pub rounds: u32,
    pub champion: Option<Standing>,
    pub standings: Vec<Standing>,
}

impl RankingOutcome {
    pub fn from_ranking<R: Rng>(ranking: &PairwiseRanking<R>) -> Self {
        let standings: Vec<Standing> = ranking
            .standings()
            .into_iter()
            .enumerate()
            .map(|(i, c)| Standing {
                rank: i + 1,
                id: c.id().to_string(),
                name: c.name().to_string(),
                rating: c.rating,
            })
            .collect();
        let champion = ranking.champion().and_then(|champ| {
            standings.iter().find(|s| s.id == champ.id()).cloned()
        });
        Self {
            finished: ranking.finished(),
            rounds: ranking.round().saturating_sub(1),
            champion,
            standings,
        }
    }
}

/// Pretty-printed JSON for any outcome.
pub fn to_json<T: Serialize>(outcome: &T) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("failed to serialize outcome")
}
