//! Expectations for asynchronous callbacks and deferred values.
//!
//! A [`MockControl`] records expectations and verifies that all of them were
//! fulfilled. The [`AsyncMockControl`] registers expectations for callbacks
//! that are expected to be called exactly once, and for [`Deferred`] values
//! that are expected to be rejected or to resolve to an expected value.
//!
//! ```
//! use murf_async::{AsyncMockControl, Deferred, MockControl, Operand};
//!
//! let control = MockControl::new();
//! let async_control = AsyncMockControl::new(control.clone());
//!
//! let callback = murf_async::async_assert_equals!(async_control, "callback", 1, "foo");
//!
//! let actual = Deferred::<usize>::new();
//! async_control.assert_deferred_equals("deferred", Operand::<usize>::Literal(12), &actual);
//!
//! callback((1, "foo")).unwrap();
//! actual.resolve(12).unwrap();
//!
//! control.verify_all().unwrap();
//! ```

pub mod action;
pub mod assert;
pub mod async_control;
pub mod control;
pub mod deferred;
pub mod error;
pub mod operand;
pub mod times;

pub use assert::{assert_arguments, assert_equals, Arguments};
pub use async_control::AsyncMockControl;
pub use control::{ExpectationHandle, MockControl, VerifyOnDrop};
pub use deferred::{Deferred, Status};
pub use error::{AssertionError, Error, Problem, ProblemKind, VerificationError};
pub use operand::Operand;
pub use times::{Times, TimesRange};

/// Create a callback that expects to be called once with the passed
/// arguments, see [`AsyncMockControl::async_assert_equals`].
///
/// The callback receives its arguments as a tuple.
///
/// ```
/// use murf_async::{async_assert_equals, AsyncMockControl, MockControl};
///
/// let async_control = AsyncMockControl::new(MockControl::new());
///
/// let callback = async_assert_equals!(async_control, "should have args", 1, 2, 3);
/// assert!(callback((1, 2, 4)).is_err());
/// ```
#[macro_export]
macro_rules! async_assert_equals {
    ($control:expr, $label:expr $( , $arg:expr )* $(,)?) => {
        $control.async_assert_equals($label, ( $( $arg, )* ))
    };
}
