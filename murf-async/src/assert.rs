//! The [`assert`](self) module contains assertion helpers that report a
//! mismatch as [`AssertionError`] instead of panicking, so the error can be
//! propagated through callbacks and deferred values.

use std::fmt::Debug;

use crate::error::AssertionError;

/// Assert that `expected` and `actual` are structurally equal.
///
/// # Errors
/// Returns an [`AssertionError`] describing both values if they differ.
pub fn assert_equals<T>(expected: &T, actual: &T) -> Result<(), AssertionError>
where
    T: PartialEq + Debug + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionError::new(format!(
            "Expected {expected:?} but was {actual:?}"
        )))
    }
}

/// Assert that the argument pack `actual` equals `expected` position by
/// position.
///
/// # Errors
/// Returns an [`AssertionError`] if the number of arguments differs or if
/// at least one argument does not match.
pub fn assert_arguments<A>(expected: &A, actual: &A) -> Result<(), AssertionError>
where
    A: Arguments + ?Sized,
{
    let expected_len = expected.len();
    let actual_len = actual.len();
    if expected_len != actual_len {
        return Err(AssertionError::new(format!(
            "Expected {expected_len} argument(s) but got {actual_len}"
        )));
    }

    let mismatches = expected.mismatches(actual);
    if mismatches.is_empty() {
        return Ok(());
    }

    let msg = mismatches
        .iter()
        .map(|m| {
            format!(
                "argument {}: expected {} but was {}",
                m.index, m.expected, m.actual
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(AssertionError::new(msg))
}

/// A single positional mismatch found by [`Arguments::mismatches`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mismatch {
    /// Zero based position of the argument.
    pub index: usize,

    /// Debug representation of the expected value.
    pub expected: String,

    /// Debug representation of the received value.
    pub actual: String,
}

impl Mismatch {
    fn new<T: Debug + ?Sized>(index: usize, expected: &T, actual: &T) -> Self {
        Self {
            index,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// A pack of arguments that is passed to a forwarding callback.
///
/// The pack is either
/// - a unit `()` for no arguments
/// - a tuple `(T1, T2, ...)` where the number of arguments is fixed by the type
/// - a [`Vec<T>`] or an array `[T; N]` of arguments of the same type
pub trait Arguments {
    /// Number of arguments in this pack.
    fn len(&self) -> usize;

    /// Returns `true` if the pack does not contain any argument.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compare the pack with `actual` position by position and return all
    /// positions that differ. Only positions available in both packs are
    /// compared.
    fn mismatches(&self, actual: &Self) -> Vec<Mismatch>;
}

impl Arguments for () {
    fn len(&self) -> usize {
        0
    }

    fn mismatches(&self, _actual: &Self) -> Vec<Mismatch> {
        Vec::new()
    }
}

impl<T> Arguments for [T]
where
    T: PartialEq + Debug,
{
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn mismatches(&self, actual: &Self) -> Vec<Mismatch> {
        self.iter()
            .zip(actual)
            .enumerate()
            .filter(|(_, (e, a))| e != a)
            .map(|(i, (e, a))| Mismatch::new(i, e, a))
            .collect()
    }
}

impl<T> Arguments for Vec<T>
where
    T: PartialEq + Debug,
{
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn mismatches(&self, actual: &Self) -> Vec<Mismatch> {
        self.as_slice().mismatches(actual.as_slice())
    }
}

impl<T, const N: usize> Arguments for [T; N]
where
    T: PartialEq + Debug,
{
    fn len(&self) -> usize {
        N
    }

    fn mismatches(&self, actual: &Self) -> Vec<Mismatch> {
        self.as_slice().mismatches(actual.as_slice())
    }
}

macro_rules! impl_arguments {
    ($len:literal => ($( $index:tt: $type:ident ),+)) => {
        impl<$( $type ),+> Arguments for ($( $type, )+)
        where
            $(
                $type: PartialEq + Debug,
            )+
        {
            fn len(&self) -> usize {
                $len
            }

            fn mismatches(&self, actual: &Self) -> Vec<Mismatch> {
                let mut ret = Vec::new();

                $(
                    if self.$index != actual.$index {
                        ret.push(Mismatch::new($index, &self.$index, &actual.$index));
                    }
                )+

                ret
            }
        }
    };
}

impl_arguments!(1 => (0: T0));
impl_arguments!(2 => (0: T0, 1: T1));
impl_arguments!(3 => (0: T0, 1: T1, 2: T2));
impl_arguments!(4 => (0: T0, 1: T1, 2: T2, 3: T3));
impl_arguments!(5 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4));
impl_arguments!(6 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5));
impl_arguments!(7 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6));
impl_arguments!(8 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7));
impl_arguments!(9 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7, 8: T8));
impl_arguments!(10 => (0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7, 8: T8, 9: T9));
