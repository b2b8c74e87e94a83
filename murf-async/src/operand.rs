//! The [`operand`](self) module contains the [`Operand`] type that unifies
//! plain values and [`Deferred`] values.

use crate::deferred::Deferred;
use crate::error::Error;

/// Operand of [`AsyncMockControl::assert_deferred_equals`](crate::AsyncMockControl::assert_deferred_equals).
///
/// A literal is treated as a value that is already resolved.
#[derive(Debug, Clone)]
pub enum Operand<T, E = Error> {
    /// A plain value.
    Literal(T),

    /// A value that is resolved in the future.
    Pending(Deferred<T, E>),
}

impl<T, E> Operand<T, E> {
    /// Returns `true` if this operand is a [`Literal`](Operand::Literal).
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl<T, E> Operand<T, E>
where
    T: Clone + Send + 'static,
    E: Send + 'static,
{
    /// Pass the value of this operand to `sink` as soon as it is available.
    ///
    /// A literal is passed immediately and the result of `sink` is returned.
    /// A deferred operand passes its value from a resolution observer and the
    /// result of `sink` is returned to the deferred. A deferred that is
    /// rejected never calls `sink`.
    ///
    /// # Errors
    /// Returns the error of `sink` if it was executed immediately.
    pub fn resolve_into<F>(self, sink: F) -> Result<(), E>
    where
        F: FnOnce(T) -> Result<(), E> + Send + 'static,
    {
        match self {
            Self::Literal(value) => sink(value),
            Self::Pending(deferred) => {
                deferred.on_resolve(move |value| sink(value.clone()));

                Ok(())
            }
        }
    }
}

impl<T, E> From<Deferred<T, E>> for Operand<T, E> {
    fn from(value: Deferred<T, E>) -> Self {
        Self::Pending(value)
    }
}

impl<T, E> From<&Deferred<T, E>> for Operand<T, E> {
    fn from(value: &Deferred<T, E>) -> Self {
        Self::Pending(value.clone())
    }
}
