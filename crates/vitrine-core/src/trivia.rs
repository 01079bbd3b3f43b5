//! Multi-step trivia quiz with locked answers and reveal-on-answer feedback.
//!
//! Answers are stored by original option index, never by display position:
//! the options are reshuffled every time a question becomes current, so the
//! on-screen order is not stable across navigation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::engine::{entropy_rng, DefaultRng, QuizEngine};
use crate::error::{DataError, EngineError};
use crate::model::{TriviaOption, TriviaQuestion};
use crate::statistics::{percentage, progress_percent, PerformanceTier};

/// Where the trivia session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TriviaPhase {
    /// The data source supplied no questions.
    NoQuestions,
    /// `reveal` is true iff the current question has been answered.
    InProgress { current: usize, reveal: bool },
    Completed,
}

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Correct,
    Incorrect,
    /// The question was already answered, the option does not exist, or the
    /// session is not in progress.
    Ignored,
}

/// One line of the end-of-quiz answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    pub question: String,
    /// Text of the chosen option, `None` when the question was skipped.
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub note: String,
}

/// Snapshot of a trivia session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaState {
    pub phase: TriviaPhase,
    /// Chosen original option index per question.
    pub answers: Vec<Option<usize>>,
    /// Original option indices in their current display order.
    pub display_order: Vec<usize>,
}

/// User actions accepted by [`TriviaQuiz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaEvent {
    /// Select by original option index.
    Select(usize),
    /// Select by position in the current display order.
    SelectShown(usize),
    Next,
    Prev,
    Reset,
}

/// The trivia quiz engine.
#[derive(Debug)]
pub struct TriviaQuiz<R = DefaultRng> {
    questions: Vec<TriviaQuestion>,
    answers: Vec<Option<usize>>,
    phase: TriviaPhase,
    display_order: Vec<usize>,
    rng: R,
}

/// Check that every question has options and exactly one correct answer.
pub fn validate_questions(questions: &[TriviaQuestion]) -> Result<(), DataError> {
    for (index, question) in questions.iter().enumerate() {
        if question.options.is_empty() {
            return Err(DataError::NoOptions { question: index });
        }
        let count = question.correct_count();
        if count != 1 {
            return Err(DataError::CorrectOptionCount {
                question: index,
                count,
            });
        }
    }
    Ok(())
}

impl TriviaQuiz<DefaultRng> {
    /// Start a session with a non-deterministic random source.
    pub fn new(questions: Vec<TriviaQuestion>) -> Result<Self, EngineError> {
        Self::with_rng(questions, entropy_rng())
    }
}

impl<R: Rng> TriviaQuiz<R> {
    /// Start a session shuffling with the supplied random source.
    ///
    /// Rejects questions without options or without exactly one correct
    /// option. An empty question list yields the `NoQuestions` phase.
    pub fn with_rng(questions: Vec<TriviaQuestion>, rng: R) -> Result<Self, EngineError> {
        validate_questions(&questions)?;
        let mut quiz = Self {
            answers: vec![None; questions.len()],
            questions,
            phase: TriviaPhase::NoQuestions,
            display_order: Vec::new(),
            rng,
        };
        quiz.start();
        Ok(quiz)
    }

    fn start(&mut self) {
        self.answers = vec![None; self.questions.len()];
        if self.questions.is_empty() {
            tracing::warn!("trivia quiz started without questions");
            self.phase = TriviaPhase::NoQuestions;
            self.display_order.clear();
            return;
        }
        self.phase = TriviaPhase::InProgress {
            current: 0,
            reveal: false,
        };
        self.enter_question(0);
    }

    pub fn phase(&self) -> TriviaPhase {
        self.phase
    }

    pub fn questions(&self) -> &[TriviaQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Index of the current question while in progress.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            TriviaPhase::InProgress { current, .. } => Some(current),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.current_index().map(|i| &self.questions[i])
    }

    /// Whether correctness feedback for the current question should show.
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, TriviaPhase::InProgress { reveal: true, .. })
    }

    /// The chosen option of the current question, if any.
    pub fn current_answer(&self) -> Option<&TriviaOption> {
        let current = self.current_index()?;
        self.answers[current].map(|i| &self.questions[current].options[i])
    }

    /// Options of the current question in display order, paired with their
    /// original index.
    pub fn display_options(&self) -> Vec<(usize, &TriviaOption)> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        self.display_order
            .iter()
            .map(|&i| (i, &question.options[i]))
            .collect()
    }

    /// Make `index` the current question and reshuffle its options.
    ///
    /// The index is clamped to the last question. Ignored unless the
    /// session is in progress.
    pub fn enter_question(&mut self, index: usize) {
        if !matches!(self.phase, TriviaPhase::InProgress { .. }) {
            return;
        }
        let current = index.min(self.questions.len() - 1);
        let mut order: Vec<usize> = (0..self.questions[current].options.len()).collect();
        order.shuffle(&mut self.rng);
        self.display_order = order;
        self.phase = TriviaPhase::InProgress {
            current,
            reveal: self.answers[current].is_some(),
        };
        tracing::debug!(question = current, "entered trivia question");
    }

    /// Lock in an answer for the current question by original option index.
    ///
    /// The first answer is final: later selections for the same question
    /// are ignored, even after navigating away and back.
    pub fn select_option(&mut self, option: usize) -> SelectOutcome {
        let TriviaPhase::InProgress { current, .. } = self.phase else {
            return SelectOutcome::Ignored;
        };
        if self.answers[current].is_some() {
            tracing::debug!(question = current, "answer already locked");
            return SelectOutcome::Ignored;
        }
        let Some(chosen) = self.questions[current].options.get(option) else {
            tracing::warn!(question = current, option, "ignoring selection of unknown option");
            return SelectOutcome::Ignored;
        };
        let correct = chosen.correct;
        self.answers[current] = Some(option);
        self.phase = TriviaPhase::InProgress {
            current,
            reveal: true,
        };
        tracing::debug!(question = current, option, correct, "trivia answer locked");
        if correct {
            SelectOutcome::Correct
        } else {
            SelectOutcome::Incorrect
        }
    }

    /// Lock in the option shown at `position` in the current display order.
    pub fn select_shown(&mut self, position: usize) -> SelectOutcome {
        match self.display_order.get(position) {
            Some(&option) => self.select_option(option),
            None => SelectOutcome::Ignored,
        }
    }

    /// Go to the next question, or complete the quiz from the last one.
    pub fn advance(&mut self) {
        let TriviaPhase::InProgress { current, .. } = self.phase else {
            return;
        };
        if current + 1 >= self.questions.len() {
            self.phase = TriviaPhase::Completed;
            self.display_order.clear();
            tracing::debug!(score = self.score(), total = self.total(), "trivia quiz completed");
        } else {
            self.enter_question(current + 1);
        }
    }

    /// Go back one question, clamped at the first.
    pub fn retreat(&mut self) {
        let TriviaPhase::InProgress { current, .. } = self.phase else {
            return;
        };
        self.enter_question(current.saturating_sub(1));
    }

    /// Number of answered questions whose chosen option is correct.
    pub fn score(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, question)| answer.is_some_and(|i| question.options[i].correct))
            .count()
    }

    /// Rounded percentage of correct answers over all questions.
    pub fn percentage(&self) -> u32 {
        percentage(self.score(), self.total())
    }

    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(self.percentage())
    }

    /// Each question's chosen answer next to its correct answer.
    pub fn review_list(&self) -> Vec<ReviewEntry> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| {
                let chosen = answer.map(|i| &question.options[i]);
                ReviewEntry {
                    question: question.question.clone(),
                    chosen: chosen.map(|o| o.text.clone()),
                    correct_answer: question
                        .correct_option()
                        .map(|o| o.text.clone())
                        .unwrap_or_default(),
                    is_correct: chosen.is_some_and(|o| o.correct),
                    note: question.note.clone(),
                }
            })
            .collect()
    }
}

impl<R: Rng> QuizEngine for TriviaQuiz<R> {
    type Event = TriviaEvent;
    type State = TriviaState;

    fn state(&self) -> TriviaState {
        TriviaState {
            phase: self.phase,
            answers: self.answers.clone(),
            display_order: self.display_order.clone(),
        }
    }

    fn dispatch(&mut self, event: TriviaEvent) {
        match event {
            TriviaEvent::Select(option) => {
                self.select_option(option);
            }
            TriviaEvent::SelectShown(position) => {
                self.select_shown(position);
            }
            TriviaEvent::Next => self.advance(),
            TriviaEvent::Prev => self.retreat(),
            TriviaEvent::Reset => self.reset(),
        }
    }

    fn progress_percent(&self) -> f64 {
        match self.phase {
            TriviaPhase::NoQuestions => 0.0,
            TriviaPhase::InProgress { current, .. } => progress_percent(current, self.total()),
            TriviaPhase::Completed => 100.0,
        }
    }

    fn is_finished(&self) -> bool {
        self.phase == TriviaPhase::Completed
    }

    fn reset(&mut self) {
        self.start();
        tracing::debug!("trivia quiz reset");
    }
}
