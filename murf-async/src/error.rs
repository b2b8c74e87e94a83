//! The [`error`](self) module contains the error types of this crate.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Main error type of `murf-async`.
#[derive(Error, Debug)]
pub enum Error {
    /// An observed value did not match the expected one.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// An expectation was called more often than allowed.
    #[error("Unexpected call to `{label}`: called {calls} time(s), expected {expected}")]
    UnexpectedCall {
        /// Label of the expectation.
        label: String,
        /// Number of calls including the unexpected one.
        calls: usize,
        /// Human readable representation of the allowed number of calls.
        expected: String,
    },

    /// The expectation handle does not belong to the mock control it was used with.
    #[error("Expectation handle does not belong to this mock control")]
    UnknownExpectation,

    /// A deferred value was settled a second time.
    #[error("Deferred was already {0}")]
    AlreadySettled(&'static str),

    /// Rejection reason for deferred values that use [`Error`] as error type.
    #[error("Deferred was rejected: {0}")]
    Rejected(String),
}

impl Error {
    /// Create a [`Rejected`](Error::Rejected) error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Returns `true` if this error was raised by a failing assertion.
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }
}

/// Raised by the [`assert`](crate::assert) helpers if the observed data does
/// not match the expectation.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    /// Create a new [`AssertionError`] with the passed `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the message of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Returned by [`MockControl::verify_all`](crate::MockControl::verify_all),
/// lists every expectation that was not fulfilled.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{} expectation(s) of the mock control were not fulfilled:{}", .problems.len(), ProblemList(.problems))]
pub struct VerificationError {
    problems: Vec<Problem>,
}

impl VerificationError {
    pub(crate) fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// Get the list of problems that were found during verification.
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Returns `true` if the expectation with the passed `label` was reported.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.problems.iter().any(|p| p.label == label)
    }
}

/// A single unfulfilled expectation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Problem {
    /// Label of the expectation.
    pub label: String,

    /// What went wrong.
    pub kind: ProblemKind,
}

/// Reason why an expectation is reported by [`VerificationError`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProblemKind {
    /// The expectation was called less often than expected.
    NotSatisfied {
        /// Number of received calls.
        calls: usize,
        /// Human readable representation of the expected number of calls.
        expected: String,
    },

    /// At least one call of the expectation failed.
    Failed(Vec<String>),
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            ProblemKind::NotSatisfied { calls, expected } => write!(
                f,
                "`{}`: not satisfied, called {calls} time(s), expected {expected}",
                self.label
            ),
            ProblemKind::Failed(failures) => {
                write!(f, "`{}`: failed", self.label)?;

                for failure in failures {
                    write!(f, "\n    {failure}")?;
                }

                Ok(())
            }
        }
    }
}

struct ProblemList<'a>(&'a [Problem]);

impl Display for ProblemList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for problem in self.0 {
            write!(f, "\n- {problem}")?;
        }

        Ok(())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
