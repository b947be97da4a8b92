//! Drill error types.
//!
//! Every condition the core can report is a distinct variant so a front-end
//! can branch on it without string matching.

use thiserror::Error;

/// Errors raised by question generation and session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// The operator is not one of `+ - * /`, or is not enabled for the session.
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// A division question would have a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Pinned division operands that do not divide evenly.
    #[error("{first} is not evenly divisible by {second}")]
    InexactDivision { first: i64, second: i64 },

    /// The operator filter left nothing to ask.
    #[error("no valid operators supplied (valid operators are + - * /)")]
    NoValidOperators,

    /// Unique mode has no question that satisfies the pinned values.
    #[error("no questions match the pinned operator and operands")]
    EmptyQuestionPool,

    /// An answer was submitted while no question is active.
    #[error("no active question to answer")]
    NoActiveQuestion,

    /// The current question has an answer that has not been scored yet.
    #[error("the current question must be scored before asking another")]
    QuestionPending,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DrillError {
    /// Returns `true` if generating again with fresh random operands may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DrillError::DivisionByZero)
    }
}

pub type Result<T, E = DrillError> = std::result::Result<T, E>;
