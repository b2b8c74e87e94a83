//! The [`control`](self) module implements the generic [`MockControl`] that
//! records expectations and verifies that all of them were fulfilled.

mod expectation;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::panicking;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::error::{self, Error, VerificationError};
use crate::times::TimesRange;

use expectation::Expectation;

/// Recorder of expected calls.
///
/// Expectations are registered using [`create_expectation`](Self::create_expectation)
/// and satisfied by [`record_call`](Self::record_call). Calling
/// [`verify_all`](Self::verify_all) (or [`checkpoint`](Self::checkpoint))
/// reports every expectation that was not called often enough or that received
/// a failing call.
///
/// Cloning the control returns a new handle to the same set of expectations.
#[must_use]
#[derive(Default, Debug, Clone)]
pub struct MockControl {
    inner: Arc<Mutex<Inner>>,
}

/// Identifies a single expectation of a [`MockControl`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ExpectationHandle {
    control_id: usize,
    index: usize,
}

impl MockControl {
    /// Create a new mock control without any expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new expectation with the passed `label` that needs to be
    /// called `times` times.
    #[must_use]
    pub fn create_expectation<R>(&self, label: impl Into<String>, times: R) -> ExpectationHandle
    where
        R: Into<TimesRange>,
    {
        let label = label.into();
        let times = times.into();

        debug!(%label, %times, "create expectation");

        let mut inner = self.inner.lock();
        let index = inner.expectations.len();
        inner.expectations.push(Expectation::new(label, times));

        ExpectationHandle {
            control_id: inner.id,
            index,
        }
    }

    /// Record a call of the expectation identified by `handle`.
    ///
    /// If the expectation already received the maximum number of calls, the
    /// call is unexpected and `validate` is not executed. Otherwise the call is
    /// counted and `validate` is executed. `validate` is executed without any
    /// lock held, so it may record calls on the same control.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedCall`] for calls beyond the expected number
    /// of calls, [`Error::UnknownExpectation`] if `handle` belongs to a different
    /// control, or the error returned by `validate`. Unexpected calls and
    /// validation errors are recorded as failures of the expectation, as long
    /// as the expectation still exists after `validate` returned.
    pub fn record_call<F, E>(&self, handle: ExpectationHandle, validate: F) -> error::Result<()>
    where
        F: FnOnce() -> Result<(), E>,
        E: Into<Error>,
    {
        let label = {
            let mut inner = self.inner.lock();
            let ex = inner.get_mut(handle)?;

            if ex.times.is_done() {
                let calls = ex.times.increment();
                let err = Error::UnexpectedCall {
                    label: ex.label.clone(),
                    calls,
                    expected: ex.times.range().to_string(),
                };

                warn!(expectation = %ex, "unexpected call");
                ex.failures.push(err.to_string());

                return Err(err);
            }

            ex.times.increment();
            ex.label.clone()
        };

        debug!(%label, "record call");

        if let Err(err) = validate() {
            let err = err.into();

            warn!(%label, error = %err, "call failed");
            if let Ok(ex) = self.inner.lock().get_mut(handle) {
                ex.failures.push(err.to_string());
            }

            return Err(err);
        }

        Ok(())
    }

    /// Number of calls that were recorded for the expectation identified by `handle`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownExpectation`] if `handle` belongs to a different control.
    pub fn calls(&self, handle: ExpectationHandle) -> error::Result<usize> {
        Ok(self.inner.lock().get_mut(handle)?.times.count())
    }

    /// Check all expectations of this control.
    ///
    /// # Errors
    /// Returns a [`VerificationError`] listing every expectation that was
    /// called less often than expected or that received a failing call.
    pub fn verify_all(&self) -> Result<(), VerificationError> {
        let problems = self
            .inner
            .lock()
            .expectations
            .iter()
            .filter_map(Expectation::problem)
            .collect::<Vec<_>>();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(VerificationError::new(problems))
        }
    }

    /// Same as [`verify_all`](Self::verify_all) but panics if the verification
    /// failed.
    ///
    /// # Panics
    /// Panics if at least one expectation was not fulfilled.
    pub fn checkpoint(&self) {
        if let Err(err) = self.verify_all() {
            error!("{err}");

            panic!("{err}");
        }
    }

    /// Remove all expectations from this control.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();

        debug!(count = inner.expectations.len(), "reset expectations");

        inner.expectations.clear();
        inner.id = next_control_id();
    }

    /// Returns a guard that calls [`checkpoint`](Self::checkpoint) when it is
    /// dropped.
    pub fn verify_on_drop(&self) -> VerifyOnDrop {
        VerifyOnDrop {
            control: self.clone(),
            check_on_drop: true,
        }
    }
}

/// Guard returned by [`MockControl::verify_on_drop`].
///
/// The check is skipped if the current thread is already panicking.
#[must_use]
#[derive(Debug)]
pub struct VerifyOnDrop {
    control: MockControl,
    check_on_drop: bool,
}

impl VerifyOnDrop {
    /// Drop the guard without verifying the control.
    pub fn release(mut self) {
        self.check_on_drop = false;
    }
}

impl Drop for VerifyOnDrop {
    fn drop(&mut self) {
        if self.check_on_drop && !panicking() {
            self.control.checkpoint();
        }
    }
}

#[derive(Debug)]
struct Inner {
    id: usize,
    expectations: Vec<Expectation>,
}

impl Inner {
    fn get_mut(&mut self, handle: ExpectationHandle) -> error::Result<&mut Expectation> {
        if handle.control_id != self.id {
            return Err(Error::UnknownExpectation);
        }

        self.expectations
            .get_mut(handle.index)
            .ok_or(Error::UnknownExpectation)
    }
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            id: next_control_id(),
            expectations: Vec::new(),
        }
    }
}

fn next_control_id() -> usize {
    CONTROL_ID.fetch_add(1, Ordering::Relaxed)
}

static CONTROL_ID: AtomicUsize = AtomicUsize::new(0);
