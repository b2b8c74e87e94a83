//! The [`times`](self) module contains the types that define how often an
//! expectation of a [`MockControl`](crate::MockControl) needs to be called.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{
    Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

/// Call counter of a single expectation together with the range of calls
/// that is expected.
#[derive(Default, Debug)]
pub struct Times {
    count: usize,
    range: TimesRange,
}

impl Times {
    /// Create a new [`Times`] instance from the passed `range`.
    pub fn new<R: Into<TimesRange>>(range: R) -> Self {
        Self {
            count: 0,
            range: range.into(),
        }
    }

    /// Number of calls that were recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Expected range of calls.
    #[must_use]
    pub fn range(&self) -> &TimesRange {
        &self.range
    }

    /// Increment the call count and return the new value.
    pub fn increment(&mut self) -> usize {
        self.count += 1;

        self.count
    }

    /// Return `true` if lower bound of the range is fulfilled.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match &self.range.lower {
            Bound::Unbounded => true,
            Bound::Included(x) => *x <= self.count,
            Bound::Excluded(x) => *x < self.count,
        }
    }

    /// Return `true` if upper bound of the range is reached, so any further
    /// call would be unexpected.
    #[must_use]
    pub fn is_done(&self) -> bool {
        match &self.range.upper {
            Bound::Unbounded => false,
            Bound::Included(x) => self.count >= *x,
            Bound::Excluded(x) => self.count + 1 >= *x,
        }
    }
}

/// Defines the range of expected calls with a lower and a upper limit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TimesRange {
    lower: Bound<usize>,
    upper: Bound<usize>,
}

impl TimesRange {
    fn min(&self) -> usize {
        match self.lower {
            Bound::Unbounded => 0,
            Bound::Included(x) => x,
            Bound::Excluded(x) => x + 1,
        }
    }

    fn max(&self) -> Option<usize> {
        match self.upper {
            Bound::Unbounded => None,
            Bound::Included(x) => Some(x),
            Bound::Excluded(x) => Some(x.saturating_sub(1)),
        }
    }
}

impl Default for TimesRange {
    fn default() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }
}

impl Display for TimesRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.min(), self.max()) {
            (0, None) => write!(f, "any number of calls"),
            (min, None) => write!(f, "at least {min} call(s)"),
            (0, Some(max)) => write!(f, "at most {max} call(s)"),
            (min, Some(max)) if min == max => write!(f, "exactly {min} call(s)"),
            (min, Some(max)) => write!(f, "between {min} and {max} calls"),
        }
    }
}

impl From<usize> for TimesRange {
    fn from(value: usize) -> Self {
        Self {
            lower: Bound::Included(value),
            upper: Bound::Included(value),
        }
    }
}

macro_rules! impl_from_range_bounds {
    ($x:ty) => {
        impl From<$x> for TimesRange {
            fn from(value: $x) -> Self {
                Self {
                    lower: value.start_bound().cloned(),
                    upper: value.end_bound().cloned(),
                }
            }
        }
    };
}

impl_from_range_bounds!(Range<usize>);
impl_from_range_bounds!(RangeFrom<usize>);
impl_from_range_bounds!(RangeFull);
impl_from_range_bounds!(RangeInclusive<usize>);
impl_from_range_bounds!(RangeTo<usize>);
impl_from_range_bounds!(RangeToInclusive<usize>);
