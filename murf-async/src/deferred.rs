//! The [`deferred`](self) module implements [`Deferred`], a single assignment
//! value that is resolved or rejected at some point in the future and
//! notifies the observers attached to it.

use std::collections::VecDeque;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{self, Error};

/// A value that is settled exactly once: it is either resolved with a value
/// `T` or rejected with an error `E`.
///
/// Observers are executed in the order they were attached. Observers that are
/// attached after the deferred was settled are executed immediately.
///
/// A resolution observer may fail by returning `Err(e)`. In that case the
/// deferred is rejected with `e` for all following observers: the remaining
/// resolution observers are skipped and the remaining rejection observers
/// receive `e`.
///
/// Cloning a deferred returns a new handle to the same value.
pub struct Deferred<T, E = Error> {
    inner: Arc<Mutex<State<T, E>>>,
}

/// Current state of a [`Deferred`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    /// The deferred was not settled yet.
    Pending,

    /// The deferred was resolved with a value.
    Resolved,

    /// The deferred was rejected with an error.
    Rejected,
}

impl<T, E> Deferred<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a new pending deferred.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                status: Status::Pending,
                outcome: None,
                observers: VecDeque::new(),
                firing: false,
            })),
        }
    }

    /// Create a deferred that is already resolved with `value`.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        let ret = Self::new();
        ret.settle(Outcome::Resolved(value));

        ret
    }

    /// Create a deferred that is already rejected with `error`.
    #[must_use]
    pub fn rejected(error: E) -> Self {
        let ret = Self::new();
        ret.settle(Outcome::Rejected(error));

        ret
    }

    /// Resolve the deferred with `value` and execute the attached observers.
    ///
    /// # Errors
    /// Returns [`Error::AlreadySettled`] if the deferred was already resolved
    /// or rejected.
    pub fn resolve(&self, value: T) -> error::Result<()> {
        self.try_settle(Outcome::Resolved(value))
    }

    /// Reject the deferred with `error` and execute the attached observers.
    ///
    /// # Errors
    /// Returns [`Error::AlreadySettled`] if the deferred was already resolved
    /// or rejected.
    pub fn reject(&self, error: E) -> error::Result<()> {
        self.try_settle(Outcome::Rejected(error))
    }

    /// Attach an observer that is executed once the deferred is resolved.
    pub fn on_resolve<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&T) -> Result<(), E> + Send + 'static,
    {
        self.attach(Observer::Resolve(Box::new(f)))
    }

    /// Attach an observer that is executed once the deferred is rejected.
    pub fn on_reject<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.attach(Observer::Reject(Box::new(f)))
    }

    /// Get the current status of the deferred.
    #[must_use]
    pub fn status(&self) -> Status {
        self.inner.lock().status
    }

    /// Returns `true` if the deferred was not settled yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status() == Status::Pending
    }

    /// Returns `true` if the deferred is resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status() == Status::Resolved
    }

    /// Returns `true` if the deferred is rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.status() == Status::Rejected
    }

    fn try_settle(&self, outcome: Outcome<T, E>) -> error::Result<()> {
        {
            let mut state = self.inner.lock();
            match state.status {
                Status::Pending => (),
                Status::Resolved => return Err(Error::AlreadySettled("resolved")),
                Status::Rejected => return Err(Error::AlreadySettled("rejected")),
            }

            state.status = outcome.status();
            state.outcome = Some(outcome);

            trace!(status = ?state.status, observers = state.observers.len(), "deferred settled");
        }

        self.fire();

        Ok(())
    }

    fn settle(&self, outcome: Outcome<T, E>) {
        let mut state = self.inner.lock();
        state.status = outcome.status();
        state.outcome = Some(outcome);
    }

    fn attach(&self, observer: Observer<T, E>) -> &Self {
        self.inner.lock().observers.push_back(observer);
        self.fire();

        self
    }

    /// Execute all pending observers if the deferred is settled.
    ///
    /// The outcome is moved out of the state while the observers are executed,
    /// so no lock is held while user code runs. Observers that are attached
    /// from inside another observer are picked up by the same loop. If an
    /// observer panics, the [`Firing`] guard puts the outcome back.
    fn fire(&self) {
        let mut firing = {
            let mut state = self.inner.lock();
            if state.firing {
                return;
            }

            let Some(outcome) = state.outcome.take() else {
                return;
            };

            state.firing = true;

            Firing {
                inner: &self.inner,
                outcome: Some(outcome),
            }
        };

        loop {
            let observer = {
                let mut state = self.inner.lock();
                match state.observers.pop_front() {
                    Some(observer) => observer,
                    None => {
                        state.outcome = firing.outcome.take();
                        state.firing = false;

                        return;
                    }
                }
            };

            let Some(outcome) = firing.outcome.as_ref() else {
                return;
            };

            let failed = match (observer, outcome) {
                (Observer::Resolve(f), Outcome::Resolved(value)) => f(value).err(),
                (Observer::Reject(f), Outcome::Rejected(error)) => {
                    f(error);

                    None
                }
                (_, _) => None,
            };

            if let Some(error) = failed {
                trace!("resolve observer failed, deferred is rejected");

                self.inner.lock().status = Status::Rejected;
                firing.outcome = Some(Outcome::Rejected(error));
            }
        }
    }
}

/// Owns the outcome of a [`Deferred`] while its observers are executed and
/// restores it to the state when dropped early.
struct Firing<'a, T, E> {
    inner: &'a Mutex<State<T, E>>,
    outcome: Option<Outcome<T, E>>,
}

impl<T, E> Drop for Firing<'_, T, E> {
    fn drop(&mut self) {
        if let Some(outcome) = self.outcome.take() {
            let mut state = self.inner.lock();
            state.status = outcome.status();
            state.outcome = Some(outcome);
            state.firing = false;
        }
    }
}

impl<T, E> Default for Deferred<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let state = self.inner.lock();

        f.debug_struct("Deferred")
            .field("status", &state.status)
            .field("observers", &state.observers.len())
            .finish()
    }
}

struct State<T, E> {
    status: Status,
    outcome: Option<Outcome<T, E>>,
    observers: VecDeque<Observer<T, E>>,
    firing: bool,
}

enum Outcome<T, E> {
    Resolved(T),
    Rejected(E),
}

impl<T, E> Outcome<T, E> {
    fn status(&self) -> Status {
        match self {
            Self::Resolved(_) => Status::Resolved,
            Self::Rejected(_) => Status::Rejected,
        }
    }
}

type ResolveObserver<T, E> = Box<dyn FnOnce(&T) -> Result<(), E> + Send>;
type RejectObserver<E> = Box<dyn FnOnce(&E) + Send>;

enum Observer<T, E> {
    Resolve(ResolveObserver<T, E>),
    Reject(RejectObserver<E>),
}
