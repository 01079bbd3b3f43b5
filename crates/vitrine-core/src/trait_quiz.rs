//! Multi-axis trait quiz: tally answers per axis and find the closest candidate.
//!
//! Each answer is an axis letter. The ordered answer letters form the user's
//! code; a candidate's match score is the number of positions where its own
//! code carries the same letter.

use serde::Serialize;

use crate::engine::QuizEngine;
use crate::model::{Axis, AxisLabels, Philosopher, TraitQuestion, TraitQuizData};
use crate::statistics::progress_percent;

/// Per-axis answer counts, always derived from a full answer vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AxisScores {
    counts: [usize; 5],
}

impl AxisScores {
    /// Count one increment per answered slot into its axis bucket.
    pub fn tally(answers: &[Option<Axis>]) -> Self {
        let mut counts = [0usize; 5];
        for axis in answers.iter().flatten() {
            counts[axis.index()] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, axis: Axis) -> usize {
        self.counts[axis.index()]
    }

    /// Sum over all buckets, equal to the number of answered slots.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, usize)> + '_ {
        Axis::ALL.iter().map(|&axis| (axis, self.get(axis)))
    }

    /// The axis with the highest count; the earliest axis wins ties.
    pub fn dominant(&self) -> Option<Axis> {
        let mut best: Option<(Axis, usize)> = None;
        for (axis, count) in self.iter() {
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((axis, count));
            }
        }
        best.map(|(axis, _)| axis)
    }
}

/// Number of positions where `code` (case-insensitive) equals the answers.
///
/// Only the overlapping prefix is compared; unanswered slots never match.
pub fn match_score(answers: &[Option<Axis>], code: &str) -> usize {
    answers
        .iter()
        .zip(code.chars())
        .filter(|(answer, c)| matches!(answer, Some(axis) if Axis::from_char(*c) == Some(*axis)))
        .count()
}

/// The candidate with the strictly greatest match score.
///
/// Candidates are scanned in list order, so the first one wins a tie.
/// Returns `None` only when `candidates` is empty.
pub fn best_match<'a>(
    answers: &[Option<Axis>],
    candidates: &'a [Philosopher],
) -> Option<&'a Philosopher> {
    let mut best: Option<(&Philosopher, usize)> = None;
    for candidate in candidates {
        let score = match_score(answers, &candidate.code);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Where the trait quiz session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitQuizStatus {
    /// The data source supplied no questions.
    NoQuestions,
    InProgress,
    Completed,
}

/// Snapshot of a trait quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitQuizState {
    pub status: TraitQuizStatus,
    pub current: usize,
    pub question_count: usize,
    pub answers: Vec<Option<Axis>>,
}

/// User actions accepted by [`TraitQuiz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitQuizEvent {
    Answer { index: usize, axis: Axis },
    Next,
    Prev,
    Reset,
}

/// The trait quiz engine.
#[derive(Debug, Clone)]
pub struct TraitQuiz {
    data: TraitQuizData,
    candidates: Vec<Philosopher>,
    current: usize,
    answers: Vec<Option<Axis>>,
    completed: bool,
}

impl TraitQuiz {
    pub fn new(data: TraitQuizData, candidates: Vec<Philosopher>) -> Self {
        let answers = vec![None; data.questions.len()];
        if data.questions.is_empty() {
            tracing::warn!("trait quiz started without questions");
        }
        Self {
            data,
            candidates,
            current: 0,
            answers,
            completed: false,
        }
    }

    pub fn status(&self) -> TraitQuizStatus {
        if self.data.questions.is_empty() {
            TraitQuizStatus::NoQuestions
        } else if self.completed {
            TraitQuizStatus::Completed
        } else {
            TraitQuizStatus::InProgress
        }
    }

    pub fn questions(&self) -> &[TraitQuestion] {
        &self.data.questions
    }

    pub fn axis_labels(&self) -> &AxisLabels {
        &self.data.axis_labels
    }

    pub fn candidates(&self) -> &[Philosopher] {
        &self.candidates
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question under the cursor, `None` when there are no questions.
    pub fn current_question(&self) -> Option<&TraitQuestion> {
        self.data.questions.get(self.current)
    }

    pub fn answers(&self) -> &[Option<Axis>] {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether every question has an answer.
    pub fn all_answered(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Record `axis` for question `index`, replacing any earlier answer.
    ///
    /// Ignored once the quiz is completed, for an out-of-range index, or
    /// when the question does not offer that letter. Returns whether the
    /// answer was recorded.
    pub fn answer(&mut self, index: usize, axis: Axis) -> bool {
        if self.completed {
            tracing::warn!("ignoring answer for question {index}: quiz already completed");
            return false;
        }
        let Some(question) = self.data.questions.get(index) else {
            tracing::warn!("ignoring answer for out-of-range question {index}");
            return false;
        };
        if !question.options.is_empty() && !question.options.iter().any(|o| o.letter == axis) {
            tracing::warn!("question {index} has no option {axis}");
            return false;
        }
        self.answers[index] = Some(axis);
        tracing::debug!(question = index, %axis, "trait answer recorded");
        true
    }

    /// Answer the question under the cursor.
    pub fn answer_current(&mut self, axis: Axis) -> bool {
        self.answer(self.current, axis)
    }

    /// Move forward; at the last question with every slot answered, complete.
    pub fn advance(&mut self) {
        if self.completed || self.data.questions.is_empty() {
            return;
        }
        if self.current + 1 < self.data.questions.len() {
            self.current += 1;
        } else if self.all_answered() {
            self.completed = true;
            tracing::debug!("trait quiz completed");
        }
    }

    /// Move back one question, clamped at the first.
    pub fn retreat(&mut self) {
        if self.completed {
            return;
        }
        self.current = self.current.saturating_sub(1);
    }

    /// Per-axis counts over the current answers.
    pub fn axis_scores(&self) -> AxisScores {
        AxisScores::tally(&self.answers)
    }

    /// The best-matching candidate, available once the quiz is completed.
    pub fn matched_candidate(&self) -> Option<&Philosopher> {
        if !self.completed {
            return None;
        }
        best_match(&self.answers, &self.candidates)
    }

    /// The user's answer letters in question order, `-` for unanswered slots.
    pub fn answer_code(&self) -> String {
        self.answers
            .iter()
            .map(|a| a.map_or('-', Axis::letter))
            .collect()
    }
}

impl QuizEngine for TraitQuiz {
    type Event = TraitQuizEvent;
    type State = TraitQuizState;

    fn state(&self) -> TraitQuizState {
        TraitQuizState {
            status: self.status(),
            current: self.current,
            question_count: self.data.questions.len(),
            answers: self.answers.clone(),
        }
    }

    fn dispatch(&mut self, event: TraitQuizEvent) {
        match event {
            TraitQuizEvent::Answer { index, axis } => {
                self.answer(index, axis);
            }
            TraitQuizEvent::Next => self.advance(),
            TraitQuizEvent::Prev => self.retreat(),
            TraitQuizEvent::Reset => self.reset(),
        }
    }

    fn progress_percent(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        progress_percent(self.current, self.data.questions.len())
    }

    fn is_finished(&self) -> bool {
        self.completed
    }

    fn reset(&mut self) {
        self.current = 0;
        self.answers = vec![None; self.data.questions.len()];
        self.completed = false;
        tracing::debug!("trait quiz reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::replay;
    use crate::model::TraitOption;

    fn question(text: &str) -> TraitQuestion {
        TraitQuestion {
            question: text.into(),
            options: Axis::ALL
                .iter()
                .map(|&letter| TraitOption {
                    letter,
                    text: format!("{text} / {letter}"),
                })
                .collect(),
        }
    }

    fn candidate(id: &str, code: &str) -> Philosopher {
        Philosopher {
            id: id.into(),
            name: id.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    fn quiz(questions: usize, candidates: Vec<Philosopher>) -> TraitQuiz {
        let data = TraitQuizData {
            questions: (0..questions).map(|i| question(&format!("Q{i}"))).collect(),
            axis_labels: AxisLabels::default(),
        };
        TraitQuiz::new(data, candidates)
    }

    #[test]
    fn two_question_scenario_selects_exact_code() {
        let mut q = quiz(2, vec![candidate("ab", "AB"), candidate("ac", "AC")]);
        replay(
            &mut q,
            [
                TraitQuizEvent::Answer { index: 0, axis: Axis::A },
                TraitQuizEvent::Next,
                TraitQuizEvent::Answer { index: 1, axis: Axis::B },
                TraitQuizEvent::Next,
            ],
        );
        assert_eq!(q.status(), TraitQuizStatus::Completed);
        assert_eq!(match_score(q.answers(), "AB"), 2);
        assert_eq!(match_score(q.answers(), "AC"), 1);
        assert_eq!(q.matched_candidate().unwrap().id, "ab");
    }

    #[test]
    fn tally_counts_each_answered_slot_once() {
        let answers = [Some(Axis::A), None, Some(Axis::C), Some(Axis::A), None, Some(Axis::E)];
        let scores = AxisScores::tally(&answers);
        assert_eq!(scores.get(Axis::A), 2);
        assert_eq!(scores.get(Axis::B), 0);
        assert_eq!(scores.get(Axis::C), 1);
        assert_eq!(scores.get(Axis::E), 1);
        assert_eq!(scores.total(), answers.iter().filter(|a| a.is_some()).count());
        assert_eq!(scores.dominant(), Some(Axis::A));
        assert_eq!(AxisScores::default().dominant(), None);
    }

    #[test]
    fn overwriting_an_answer_does_not_drift_the_tally() {
        let mut q = quiz(3, vec![]);
        q.answer(0, Axis::A);
        q.answer(0, Axis::B);
        q.answer(0, Axis::B);
        let scores = q.axis_scores();
        assert_eq!(scores.get(Axis::A), 0);
        assert_eq!(scores.get(Axis::B), 1);
        assert_eq!(scores.total(), 1);
    }

    #[test]
    fn match_is_case_insensitive_and_uses_overlapping_prefix() {
        let answers = [Some(Axis::A), Some(Axis::B), Some(Axis::C)];
        assert_eq!(match_score(&answers, "abc"), 3);
        assert_eq!(match_score(&answers, "AB"), 2);
        assert_eq!(match_score(&answers, "ABCDE"), 3);
        assert_eq!(match_score(&answers, ""), 0);
        assert_eq!(match_score(&[None, Some(Axis::B)], "AB"), 1);
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let answers = [Some(Axis::A), Some(Axis::B)];
        let candidates = vec![
            candidate("first", "AX"),
            candidate("second", "XB"),
            candidate("third", "AD"),
        ];
        assert_eq!(best_match(&answers, &candidates).unwrap().id, "first");
    }

    #[test]
    fn zero_score_still_picks_a_candidate() {
        let answers = [Some(Axis::A)];
        let candidates = vec![candidate("only", "E")];
        assert_eq!(best_match(&answers, &candidates).unwrap().id, "only");
        assert!(best_match(&answers, &[]).is_none());
    }

    #[test]
    fn match_is_stable_across_calls() {
        let candidates = vec![candidate("x", "ABC"), candidate("y", "ABD"), candidate("z", "CBA")];
        let mut q = quiz(3, candidates);
        for (i, axis) in [Axis::A, Axis::B, Axis::D].into_iter().enumerate() {
            q.answer(i, axis);
            q.advance();
        }
        let first = q.matched_candidate().map(|c| c.id.clone());
        for _ in 0..5 {
            assert_eq!(q.matched_candidate().map(|c| c.id.clone()), first);
        }
        assert_eq!(first.as_deref(), Some("y"));
    }

    #[test]
    fn no_match_before_completion() {
        let mut q = quiz(2, vec![candidate("x", "AA")]);
        q.answer(0, Axis::A);
        q.answer(1, Axis::A);
        assert!(q.matched_candidate().is_none());
    }

    #[test]
    fn advance_at_last_question_requires_all_answers() {
        let mut q = quiz(2, vec![]);
        q.answer(1, Axis::C);
        q.advance();
        q.advance();
        assert_eq!(q.current_index(), 1);
        assert_eq!(q.status(), TraitQuizStatus::InProgress);

        q.retreat();
        q.answer_current(Axis::D);
        q.advance();
        q.advance();
        assert!(q.is_completed());
        assert_eq!(q.answer_code(), "DC");
    }

    #[test]
    fn answers_are_frozen_after_completion() {
        let mut q = quiz(1, vec![]);
        q.answer(0, Axis::A);
        q.advance();
        assert!(q.is_completed());
        assert!(!q.answer(0, Axis::B));
        assert_eq!(q.answers(), &[Some(Axis::A)]);
    }

    #[test]
    fn rejects_out_of_range_and_unoffered_answers() {
        let data = TraitQuizData {
            questions: vec![TraitQuestion {
                question: "Only A or B".into(),
                options: vec![
                    TraitOption { letter: Axis::A, text: "a".into() },
                    TraitOption { letter: Axis::B, text: "b".into() },
                ],
            }],
            axis_labels: AxisLabels::default(),
        };
        let mut q = TraitQuiz::new(data, vec![]);
        assert!(!q.answer(3, Axis::A));
        assert!(!q.answer(0, Axis::E));
        assert!(q.answer(0, Axis::B));
    }

    #[test]
    fn retreat_is_clamped_at_zero() {
        let mut q = quiz(3, vec![]);
        q.retreat();
        q.retreat();
        assert_eq!(q.current_index(), 0);
        q.advance();
        q.advance();
        q.advance();
        assert_eq!(q.current_index(), 2);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut q = quiz(3, vec![candidate("x", "AAA")]);
        q.answer(0, Axis::A);
        q.advance();
        q.answer(1, Axis::B);

        q.reset();
        let once = q.state();
        q.reset();
        assert_eq!(q.state(), once);
        assert_eq!(once.current, 0);
        assert!(once.answers.iter().all(Option::is_none));
        assert_eq!(once.status, TraitQuizStatus::InProgress);
    }

    #[test]
    fn progress_never_decreases_while_advancing() {
        let mut q = quiz(4, vec![]);
        let mut last = q.progress_percent();
        for i in 0..6 {
            if i < 4 {
                q.answer_current(Axis::A);
            }
            q.advance();
            let now = q.progress_percent();
            assert!(now >= last, "progress dropped from {last} to {now}");
            last = now;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn empty_quiz_is_a_placeholder_state() {
        let mut q = quiz(0, vec![candidate("x", "A")]);
        assert_eq!(q.status(), TraitQuizStatus::NoQuestions);
        q.advance();
        q.retreat();
        assert!(!q.answer_current(Axis::A));
        assert!(q.current_question().is_none());
        assert_eq!(q.progress_percent(), 0.0);
        assert!(q.matched_candidate().is_none());
    }
}
