use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::{Problem, ProblemKind};
use crate::times::{Times, TimesRange};

/// Bookkeeping of a single expectation registered at a
/// [`MockControl`](super::MockControl).
#[derive(Debug)]
pub(crate) struct Expectation {
    pub label: String,
    pub times: Times,
    pub failures: Vec<String>,
}

impl Expectation {
    pub(crate) fn new(label: String, range: TimesRange) -> Self {
        Self {
            label,
            times: Times::new(range),
            failures: Vec::new(),
        }
    }

    /// Returns the problem of this expectation, or `None` if it was fulfilled.
    pub(crate) fn problem(&self) -> Option<Problem> {
        let kind = if !self.failures.is_empty() {
            ProblemKind::Failed(self.failures.clone())
        } else if !self.times.is_ready() {
            ProblemKind::NotSatisfied {
                calls: self.times.count(),
                expected: self.times.range().to_string(),
            }
        } else {
            return None;
        };

        Some(Problem {
            label: self.label.clone(),
            kind,
        })
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "`{}` (called {} time(s), expected {})",
            self.label,
            self.times.count(),
            self.times.range()
        )
    }
}
