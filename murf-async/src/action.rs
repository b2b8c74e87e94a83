//! The [`action`](self) module contains helpers to store the validation
//! action of a forwarding callback.

use parking_lot::Mutex;

/// Action that can only be executed once.
///
/// This is similar to [`FnOnce`] of the standard library, but the action can
/// be shared between clones of the same callback. Any further execution
/// returns `None`.
#[derive(Debug)]
pub struct OnetimeAction<X>(Mutex<Option<X>>);

impl<X> OnetimeAction<X> {
    /// Create a new [`OnetimeAction`] instance.
    pub fn new(inner: X) -> Self {
        Self(Mutex::new(Some(inner)))
    }

    /// Execute the action with the passed arguments.
    ///
    /// Returns `None` if the action was already executed.
    pub fn exec<T, R>(&self, args: T) -> Option<R>
    where
        X: FnOnce(T) -> R,
    {
        let action = self.0.lock().take()?;

        Some(action(args))
    }

    /// Returns `true` if the action was already executed.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        self.0.lock().is_none()
    }
}
