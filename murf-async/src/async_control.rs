//! The [`async_control`](self) module implements [`AsyncMockControl`], the
//! extension of [`MockControl`] for asynchronous callbacks and deferred values.

use std::fmt::Debug;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::action::OnetimeAction;
use crate::assert::{assert_arguments, assert_equals, Arguments};
use crate::control::{ExpectationHandle, MockControl};
use crate::deferred::Deferred;
use crate::error::Error;
use crate::operand::Operand;

/// Label of the expectations created by [`AsyncMockControl::assert_deferred_error`].
pub const DEFERRED_ERROR_LABEL: &str = "deferred error";

/// Registers expectations for asynchronous callbacks and deferred values at
/// the wrapped [`MockControl`].
///
/// Every expectation created by this type expects exactly one call. Use
/// [`MockControl::verify_all`] of the wrapped control to check that all of
/// them were fulfilled.
#[must_use]
#[derive(Debug, Clone)]
pub struct AsyncMockControl {
    control: MockControl,
}

impl AsyncMockControl {
    /// Create a new [`AsyncMockControl`] that registers its expectations at
    /// the passed `control`.
    pub fn new(control: MockControl) -> Self {
        Self { control }
    }

    /// Get the wrapped mock control.
    pub fn control(&self) -> &MockControl {
        &self.control
    }

    /// Create a callback that is expected to be called exactly once.
    ///
    /// The call is validated by executing `verify` with the arguments of the
    /// call. An error returned by `verify` is recorded as failure of the
    /// expectation and returned from the callback.
    pub fn create_callback_mock<A, F, E>(
        &self,
        label: impl Into<String>,
        verify: F,
    ) -> impl Fn(A) -> Result<(), Error> + Clone + Send + Sync + 'static
    where
        A: 'static,
        F: FnOnce(A) -> Result<(), E> + Send + 'static,
        E: Into<Error> + 'static,
    {
        let control = self.control.clone();
        let handle = control.create_expectation(label, 1);
        let verify = Arc::new(OnetimeAction::new(verify));

        move |args: A| {
            control.record_call(handle, || verify.exec(args).unwrap_or(Ok(())))
        }
    }

    /// Create a callback that is expected to be called exactly once with
    /// arguments equal to `expected`.
    ///
    /// Argument count and values are compared when the callback is called.
    /// See also the [`async_assert_equals!`](crate::async_assert_equals) macro.
    pub fn async_assert_equals<A>(
        &self,
        label: impl Into<String>,
        expected: A,
    ) -> impl Fn(A) -> Result<(), Error> + Clone + Send + Sync + 'static
    where
        A: Arguments + Send + 'static,
    {
        self.create_callback_mock(label, move |actual: A| {
            assert_arguments(&expected, &actual)
        })
    }

    /// Expect `deferred` to be rejected.
    ///
    /// `trigger` is executed immediately and is responsible for settling the
    /// deferred. Resolving the deferred with a value leaves the expectation
    /// unsatisfied.
    pub fn assert_deferred_error<T, E, F>(&self, deferred: &Deferred<T, E>, trigger: F)
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce(),
    {
        let control = self.control.clone();
        let handle = control.create_expectation(DEFERRED_ERROR_LABEL, 1);

        deferred.on_reject(move |_| {
            if let Err(err) = control.record_call(handle, || Ok::<_, Error>(())) {
                warn!(error = %err, "unable to record rejection");
            }
        });

        trigger();
    }

    /// Expect the values of `expected` and `actual` to be equal once both are
    /// resolved.
    ///
    /// Each operand is either a literal ([`Operand::Literal`]) or a
    /// [`Deferred`]. The comparison is executed exactly once, as soon as the
    /// second operand is resolved, independent of the order. If one of the
    /// deferred operands is never resolved (or rejected) the expectation is
    /// not satisfied.
    ///
    /// A failing comparison is recorded at the mock control and rejects the
    /// deferred that triggered it. The deferred is rejected with the comparison
    /// error converted into `E`, so deferred values with a custom error type
    /// need to implement `From<Error>` for it.
    pub fn assert_deferred_equals<T, E>(
        &self,
        label: impl Into<String>,
        expected: impl Into<Operand<T, E>>,
        actual: impl Into<Operand<T, E>>,
    ) where
        T: PartialEq + Debug + Clone + Send + Sync + 'static,
        E: From<Error> + Send + 'static,
    {
        let label = label.into();
        let handle = self.control.create_expectation(label.clone(), 1);
        let join = Arc::new(Join::new(self.control.clone(), handle));

        // Literals first, so the comparison is triggered by a deferred whenever
        // one is involved.
        let mut operands = [
            (Side::Expected, expected.into()),
            (Side::Actual, actual.into()),
        ];
        operands.sort_by_key(|(_, operand)| !operand.is_literal());

        for (side, operand) in operands {
            let join = join.clone();
            let ret = operand.resolve_into(move |value| join.offer(side, value).map_err(E::from));

            if ret.is_err() {
                debug!(%label, "literal operands are not equal");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Expected,
    Actual,
}

/// Joins the values of two operands and compares them once both are known.
struct Join<T> {
    control: MockControl,
    handle: ExpectationHandle,
    expected: OnceCell<T>,
    actual: OnceCell<T>,
    fired: OnceCell<()>,
}

impl<T> Join<T>
where
    T: PartialEq + Debug,
{
    fn new(control: MockControl, handle: ExpectationHandle) -> Self {
        Self {
            control,
            handle,
            expected: OnceCell::new(),
            actual: OnceCell::new(),
            fired: OnceCell::new(),
        }
    }

    fn offer(&self, side: Side, value: T) -> Result<(), Error> {
        let slot = match side {
            Side::Expected => &self.expected,
            Side::Actual => &self.actual,
        };

        if slot.set(value).is_err() {
            warn!(?side, "operand was resolved twice");

            return Ok(());
        }

        let (Some(expected), Some(actual)) = (self.expected.get(), self.actual.get()) else {
            return Ok(());
        };

        if self.fired.set(()).is_err() {
            return Ok(());
        }

        self.control
            .record_call(self.handle, || assert_equals(expected, actual))
    }
}
