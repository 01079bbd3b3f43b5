//! Pairwise preference ranking driven by Elo updates.
//!
//! Every round the whole candidate list is reshuffled and the first two
//! candidates are presented. The user's pick wins the comparison. After a
//! fixed number of rounds the highest-rated candidate is the champion.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{entropy_rng, DefaultRng, QuizEngine};
use crate::error::EngineError;
use crate::model::RankingEntity;
use crate::rating::{elo_update, DEFAULT_K_FACTOR, INITIAL_RATING, MAX_K_FACTOR};

/// Configuration for a ranking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Number of comparisons before the session finishes.
    pub max_rounds: u32,
    /// Largest rating move per comparison.
    pub k_factor: f64,
    /// Rating every candidate starts from.
    pub initial_rating: i32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: INITIAL_RATING,
        }
    }
}

/// A candidate together with its running rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub entity: RankingEntity,
    pub rating: i32,
}

impl RankedCandidate {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }
}

/// Which side of the presented pair the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Ratings before and after one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingChange {
    pub round: u32,
    pub winner_id: String,
    pub loser_id: String,
    pub winner_before: i32,
    pub winner_after: i32,
    pub loser_before: i32,
    pub loser_after: i32,
}

/// Snapshot of a ranking session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingState {
    /// 1-based round number; greater than `max_rounds` once finished.
    pub round: u32,
    pub max_rounds: u32,
    /// The two candidates on offer, `None` once finished.
    pub pair: Option<(RankedCandidate, RankedCandidate)>,
    pub finished: bool,
}

/// User actions accepted by [`PairwiseRanking`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingEvent {
    Choose(String),
    ChooseSide(Side),
    Reset,
}

/// The pairwise ranking engine.
#[derive(Debug)]
pub struct PairwiseRanking<R = DefaultRng> {
    entities: Vec<RankingEntity>,
    candidates: Vec<RankedCandidate>,
    config: RankingConfig,
    round: u32,
    pair: (usize, usize),
    rng: R,
}

impl PairwiseRanking<DefaultRng> {
    /// Start a session with a non-deterministic random source.
    pub fn new(
        entities: Vec<RankingEntity>,
        config: RankingConfig,
    ) -> Result<Self, EngineError> {
        Self::with_rng(entities, config, entropy_rng())
    }
}

impl<R: Rng> PairwiseRanking<R> {
    /// Start a session shuffling with the supplied random source.
    ///
    /// Fails when fewer than two entities are supplied, since no pair can
    /// be formed, when two entities share an id, when `max_rounds` is zero,
    /// or when `k_factor` is outside `(0, MAX_K_FACTOR]`.
    pub fn with_rng(
        entities: Vec<RankingEntity>,
        config: RankingConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        if entities.len() < 2 {
            return Err(EngineError::NotEnoughCandidates {
                found: entities.len(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = entities.iter().find(|e| !seen.insert(e.id.as_str())) {
            return Err(EngineError::DuplicateCandidate(dup.id.clone()));
        }
        if config.max_rounds == 0 {
            return Err(EngineError::InvalidConfig("max_rounds must be at least 1".into()));
        }
        if !(config.k_factor > 0.0 && config.k_factor <= MAX_K_FACTOR) {
            return Err(EngineError::InvalidConfig(format!(
                "k_factor must be in (0, {MAX_K_FACTOR}], got {}",
                config.k_factor
            )));
        }

        let mut ranking = Self {
            entities,
            candidates: Vec::new(),
            config,
            round: 1,
            pair: (0, 1),
            rng,
        };
        ranking.initialize();
        Ok(ranking)
    }

    fn initialize(&mut self) {
        self.candidates = self
            .entities
            .iter()
            .cloned()
            .map(|entity| RankedCandidate {
                entity,
                rating: self.config.initial_rating,
            })
            .collect();
        self.candidates.shuffle(&mut self.rng);
        self.round = 1;
        self.pair = (0, 1);
        tracing::debug!(
            candidates = self.candidates.len(),
            "ranking session initialized"
        );
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Current round, 1-based.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Candidates in their current (shuffled) order.
    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    pub fn finished(&self) -> bool {
        self.round > self.config.max_rounds
    }

    /// The two candidates on offer this round.
    pub fn current_pair(&self) -> Option<(&RankedCandidate, &RankedCandidate)> {
        if self.finished() {
            return None;
        }
        Some((&self.candidates[self.pair.0], &self.candidates[self.pair.1]))
    }

    /// Record the user's preference for `winner_id` within the current pair.
    ///
    /// Only the two paired ratings change. Ignored (returning `None`) when the
    /// session is finished or the id is not part of the current pair.
    pub fn choose(&mut self, winner_id: &str) -> Option<RatingChange> {
        if self.finished() {
            tracing::warn!("ignoring choice {winner_id}: ranking already finished");
            return None;
        }
        let (left, right) = self.pair;
        let (winner, loser) = if self.candidates[left].id() == winner_id {
            (left, right)
        } else if self.candidates[right].id() == winner_id {
            (right, left)
        } else {
            tracing::warn!("ignoring choice {winner_id}: not in the current pair");
            return None;
        };
        Some(self.apply(winner, loser))
    }

    /// Record a preference by position within the current pair.
    pub fn choose_side(&mut self, side: Side) -> Option<RatingChange> {
        if self.finished() {
            return None;
        }
        let (left, right) = self.pair;
        Some(match side {
            Side::Left => self.apply(left, right),
            Side::Right => self.apply(right, left),
        })
    }

    fn apply(&mut self, winner: usize, loser: usize) -> RatingChange {
        let winner_before = self.candidates[winner].rating;
        let loser_before = self.candidates[loser].rating;
        let (winner_after, loser_after) =
            elo_update(winner_before, loser_before, self.config.k_factor);
        self.candidates[winner].rating = winner_after;
        self.candidates[loser].rating = loser_after;

        let change = RatingChange {
            round: self.round,
            winner_id: self.candidates[winner].id().to_string(),
            loser_id: self.candidates[loser].id().to_string(),
            winner_before,
            winner_after,
            loser_before,
            loser_after,
        };
        tracing::debug!(
            round = self.round,
            winner = %change.winner_id,
            loser = %change.loser_id,
            winner_after,
            loser_after,
            "ranking round played"
        );

        self.round += 1;
        if !self.finished() {
            self.candidates.shuffle(&mut self.rng);
            self.pair = (0, 1);
        }
        change
    }

    /// The highest-rated candidate; the first in current order wins ties.
    pub fn champion(&self) -> Option<&RankedCandidate> {
        let mut best: Option<&RankedCandidate> = None;
        for candidate in &self.candidates {
            if best.map_or(true, |b| candidate.rating > b.rating) {
                best = Some(candidate);
            }
        }
        best
    }

    /// All candidates by descending rating, ties kept in current order.
    pub fn standings(&self) -> Vec<&RankedCandidate> {
        let mut standings: Vec<&RankedCandidate> = self.candidates.iter().collect();
        standings.sort_by(|a, b| b.rating.cmp(&a.rating));
        standings
    }
}

impl<R: Rng> QuizEngine for PairwiseRanking<R> {
    type Event = RankingEvent;
    type State = RankingState;

    fn state(&self) -> RankingState {
        RankingState {
            round: self.round,
            max_rounds: self.config.max_rounds,
            pair: self.current_pair().map(|(a, b)| (a.clone(), b.clone())),
            finished: self.finished(),
        }
    }

    fn dispatch(&mut self, event: RankingEvent) {
        match event {
            RankingEvent::Choose(id) => {
                self.choose(&id);
            }
            RankingEvent::ChooseSide(side) => {
                self.choose_side(side);
            }
            RankingEvent::Reset => self.reset(),
        }
    }

    fn progress_percent(&self) -> f64 {
        let round = self.round.min(self.config.max_rounds);
        f64::from(round) / f64::from(self.config.max_rounds) * 100.0
    }

    fn is_finished(&self) -> bool {
        self.finished()
    }

    fn reset(&mut self) {
        self.initialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::seeded_rng;
    use rand::rngs::StdRng;

    fn entities(n: usize) -> Vec<RankingEntity> {
        (0..n)
            .map(|i| RankingEntity::new(format!("p{i}"), format!("Person {i}")))
            .collect()
    }

    fn ranking(n: usize, seed: u64) -> PairwiseRanking<StdRng> {
        PairwiseRanking::with_rng(entities(n), RankingConfig::default(), seeded_rng(seed)).unwrap()
    }

    #[test]
    fn rejects_short_candidate_lists() {
        for n in 0..2 {
            let config = RankingConfig::default();
            let err = PairwiseRanking::with_rng(entities(n), config, seeded_rng(1)).unwrap_err();
            assert_eq!(err, EngineError::NotEnoughCandidates { found: n });
        }
    }

    #[test]
    fn rejects_zero_rounds() {
        let config = RankingConfig {
            max_rounds: 0,
            ..Default::default()
        };
        let err = PairwiseRanking::with_rng(entities(3), config, seeded_rng(1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unbounded_k_factor() {
        for k_factor in [0.0, -1.0, f64::NAN, f64::INFINITY, MAX_K_FACTOR + 1.0, 1e10] {
            let config = RankingConfig {
                k_factor,
                ..Default::default()
            };
            let err = PairwiseRanking::with_rng(entities(2), config, seeded_rng(1)).unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfig(_)), "k_factor {k_factor}");
        }
    }

    #[test]
    fn largest_k_factor_keeps_moves_bounded() {
        let config = RankingConfig {
            max_rounds: 50,
            k_factor: MAX_K_FACTOR,
            ..Default::default()
        };
        let mut r = PairwiseRanking::with_rng(entities(2), config, seeded_rng(5)).unwrap();
        while let Some(change) = r.choose_side(Side::Left) {
            assert!(change.winner_after - change.winner_before <= 400);
            assert!(change.loser_before - change.loser_after <= 400);
        }
        assert!(r.finished());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut list = entities(3);
        list.push(RankingEntity::new("p1", "Person 1 again"));
        let config = RankingConfig::default();
        let err = PairwiseRanking::with_rng(list, config, seeded_rng(1)).unwrap_err();
        assert_eq!(err, EngineError::DuplicateCandidate("p1".into()));
    }

    #[test]
    fn starts_at_round_one_with_initial_ratings() {
        let r = ranking(5, 7);
        assert_eq!(r.round(), 1);
        assert!(!r.finished());
        assert!(r.candidates().iter().all(|c| c.rating == 1500));
        let ids: HashSet<&str> = r.candidates().iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn first_comparison_from_equal_ratings() {
        let mut r = ranking(4, 3);
        let (left, right) = r.current_pair().unwrap();
        let (winner, loser) = (left.id().to_string(), right.id().to_string());

        let change = r.choose(&winner).unwrap();
        assert_eq!(change.winner_before, 1500);
        assert_eq!(change.winner_after, 1516);
        assert_eq!(change.loser_after, 1484);

        let rating_of = |id: &str| r.candidates().iter().find(|c| c.id() == id).unwrap().rating;
        assert_eq!(rating_of(&winner), 1516);
        assert_eq!(rating_of(&loser), 1484);
        assert_eq!(r.round(), 2);
    }

    #[test]
    fn only_the_pair_is_updated() {
        let mut r = ranking(6, 11);
        for _ in 0..5 {
            let before: Vec<(String, i32)> = r
                .candidates()
                .iter()
                .map(|c| (c.id().to_string(), c.rating))
                .collect();
            let change = r.choose_side(Side::Right).unwrap();
            for (id, rating) in before {
                if id != change.winner_id && id != change.loser_id {
                    let now = r.candidates().iter().find(|c| c.id() == id).unwrap().rating;
                    assert_eq!(now, rating, "{id} changed outside its pair");
                }
            }
            assert!(change.winner_after >= change.winner_before);
            assert!(change.loser_after <= change.loser_before);
            assert!(change.winner_after - change.winner_before <= 32);
            assert!(change.loser_before - change.loser_after <= 32);
        }
    }

    #[test]
    fn choice_outside_the_pair_is_ignored() {
        let mut r = ranking(5, 2);
        let outsider = r.candidates()[4].id().to_string();
        assert!(r.choose(&outsider).is_none());
        assert!(r.choose("nobody").is_none());
        assert_eq!(r.round(), 1);
        assert!(r.candidates().iter().all(|c| c.rating == 1500));
    }

    #[test]
    fn finishes_after_max_rounds_with_a_stable_champion() {
        let mut r = ranking(5, 42);
        for round in 1..=10 {
            assert_eq!(r.round(), round);
            assert!(r.choose_side(Side::Left).is_some());
        }
        assert!(r.finished());
        assert_eq!(r.round(), 11);
        assert!(r.current_pair().is_none());
        assert!(r.choose_side(Side::Left).is_none());
        assert_eq!(r.progress_percent(), 100.0);

        let champion = r.champion().unwrap().id().to_string();
        for _ in 0..3 {
            assert_eq!(r.champion().unwrap().id(), champion);
        }
        let top = r.standings()[0].rating;
        assert_eq!(r.champion().unwrap().rating, top);
    }

    #[test]
    fn champion_ties_go_to_the_first_in_order() {
        let r = ranking(4, 9);
        assert_eq!(r.champion().unwrap().id(), r.candidates()[0].id());
    }

    #[test]
    fn rating_total_drifts_at_most_one_point_per_round() {
        let mut r = ranking(3, 5);
        let mut total: i32 = r.candidates().iter().map(|c| c.rating).sum();
        while !r.finished() {
            r.choose_side(Side::Left);
            let now: i32 = r.candidates().iter().map(|c| c.rating).sum();
            assert!((now - total).abs() <= 1);
            total = now;
        }
    }

    #[test]
    fn every_candidate_gets_offered_across_seeds() {
        let mut offered = HashSet::new();
        for seed in 0..50 {
            let r = ranking(6, seed);
            let (a, b) = r.current_pair().unwrap();
            offered.insert(a.id().to_string());
            offered.insert(b.id().to_string());
        }
        assert_eq!(offered.len(), 6);
    }

    #[test]
    fn odd_sized_lists_are_supported() {
        let mut r = ranking(3, 8);
        while !r.finished() {
            let (left, right) = r.current_pair().unwrap();
            assert_ne!(left.id(), right.id());
            r.choose_side(Side::Right);
        }
    }

    #[test]
    fn progress_tracks_rounds() {
        let mut r = ranking(4, 1);
        assert!((r.progress_percent() - 10.0).abs() < f64::EPSILON);
        r.choose_side(Side::Left);
        assert!((r.progress_percent() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_discards_ratings() {
        let mut r = ranking(4, 21);
        for _ in 0..4 {
            r.dispatch(RankingEvent::ChooseSide(Side::Left));
        }
        r.dispatch(RankingEvent::Reset);
        let once: Vec<i32> = r.candidates().iter().map(|c| c.rating).collect();
        r.reset();
        let twice: Vec<i32> = r.candidates().iter().map(|c| c.rating).collect();
        assert_eq!(once, twice);
        assert!(once.iter().all(|&rating| rating == 1500));
        assert_eq!(r.round(), 1);
        assert!(!r.state().finished);
    }
}
