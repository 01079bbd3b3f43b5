//! vitrine-core: quiz engines, data model, and scoring.
//!
//! This crate defines the data model, data loading, and the three quiz
//! engines (trait quiz, pairwise ranking, trivia) that the `vitrine`
//! command-line front end mounts.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod preferences;
pub mod ranking;
pub mod rating;
pub mod report;
pub mod statistics;
pub mod trait_quiz;
pub mod trivia;

pub use engine::QuizEngine;
pub use error::{DataError, EngineError};
