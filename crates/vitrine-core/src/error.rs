//! Error types for data validation and engine construction.
//!
//! Runtime transitions never fail: ignored input is logged and dropped.
//! These errors only surface where malformed data or an unusable
//! configuration would otherwise produce wrong results.

use thiserror::Error;

/// Data-shape violations that must be rejected before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A trivia question does not have exactly one correct option.
    #[error("question {question} has {count} correct options, expected exactly one")]
    CorrectOptionCount { question: usize, count: usize },

    /// A question has no options to choose from.
    #[error("question {question} has no options")]
    NoOptions { question: usize },

    /// A letter outside the A-E axis alphabet.
    #[error("unknown axis letter: {0}")]
    UnknownAxis(String),

    /// A content kind name that is not recognised.
    #[error("unknown content kind: {0}")]
    UnknownContentKind(String),
}

/// Errors raised when an engine cannot be initialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Pairwise ranking needs at least two candidates to form a pair.
    #[error("pairwise ranking needs at least 2 candidates, found {found}")]
    NotEnoughCandidates { found: usize },

    /// Two candidates share an id, so a choice by id would be ambiguous.
    #[error("duplicate candidate id: {0}")]
    DuplicateCandidate(String),

    /// The engine configuration is unusable.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// The underlying data failed validation.
    #[error(transparent)]
    Data(#[from] DataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = DataError::CorrectOptionCount {
            question: 2,
            count: 0,
        };
        assert_eq!(
            err.to_string(),
            "question 2 has 0 correct options, expected exactly one"
        );

        let err = EngineError::NotEnoughCandidates { found: 1 };
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn data_errors_convert_into_engine_errors() {
        let err: EngineError = DataError::NoOptions { question: 0 }.into();
        assert_eq!(err, EngineError::Data(DataError::NoOptions { question: 0 }));
        assert_eq!(err.to_string(), "question 0 has no options");
    }
}
