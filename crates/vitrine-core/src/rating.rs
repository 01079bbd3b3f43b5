//! Elo rating math for pairwise comparisons.
//!
//! Expected score uses the logistic curve on a 400-point scale:
//!
//! E = 1 / (1 + 10^((R_opponent - R_self) / 400))
//!
//! and each rating moves by `K * (actual - expected)`, rounded to the
//! nearest integer.

/// Rating every candidate starts from.
pub const INITIAL_RATING: i32 = 1500;

/// Default K-factor: the largest move a single comparison can cause.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Largest K-factor a session accepts.
pub const MAX_K_FACTOR: f64 = 400.0;

/// Probability that a player rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((f64::from(opponent) - f64::from(rating)) / 400.0))
}

/// Apply one comparison and return the new `(winner, loser)` ratings.
pub fn elo_update(winner: i32, loser: i32, k_factor: f64) -> (i32, i32) {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = expected_score(loser, winner);

    let new_winner = f64::from(winner) + k_factor * (1.0 - expected_winner);
    let new_loser = f64::from(loser) + k_factor * (0.0 - expected_loser);

    (new_winner.round() as i32, new_loser.round() as i32)
}
