//! The selection API shared by every quiz engine.
//!
//! A presentation layer mounts one engine, renders `state()`, and feeds user
//! actions back through `dispatch()`. Derived views (score, progress,
//! champion, match) are computed from state on demand and never stored.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source used when the caller does not inject one.
pub type DefaultRng = StdRng;

/// A fresh non-deterministic random source.
pub fn entropy_rng() -> DefaultRng {
    StdRng::from_entropy()
}

/// A reproducible random source for seeded sessions.
pub fn seeded_rng(seed: u64) -> DefaultRng {
    StdRng::seed_from_u64(seed)
}

/// State machine contract implemented by the trait, ranking and trivia engines.
pub trait QuizEngine {
    /// User action accepted by this engine.
    type Event;
    /// Owned snapshot of the engine state.
    type State;

    /// Snapshot of the current state.
    fn state(&self) -> Self::State;

    /// Apply one user action. Never fails: invalid actions are ignored.
    fn dispatch(&mut self, event: Self::Event);

    /// How far through the session the user is, in percent.
    fn progress_percent(&self) -> f64;

    /// Whether the session reached its result.
    fn is_finished(&self) -> bool;

    /// Return to the initial state, discarding all answers.
    fn reset(&mut self);
}

/// Dispatch a sequence of events in order.
pub fn replay<E, I>(engine: &mut E, events: I)
where
    E: QuizEngine,
    I: IntoIterator<Item = E::Event>,
{
    for event in events {
        engine.dispatch(event);
    }
}
