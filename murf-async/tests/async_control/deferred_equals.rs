use std::panic::{catch_unwind, AssertUnwindSafe};

use murf_async::{Deferred, Error, Operand, ProblemKind};

use super::controls;

#[test]
fn failure_actual_deferred_never_resolves() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();

    async_control.assert_deferred_equals("doesn't resolve", Operand::<usize>::Literal(12), &actual);

    assert!(control.verify_all().is_err());
}

#[test]
fn failure_actual_deferred_never_resolves_both() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();
    expected.resolve(12).unwrap();

    async_control.assert_deferred_equals("doesn't resolve", &expected, &actual);

    assert!(control.verify_all().is_err());
}

#[test]
fn failure_expected_deferred_never_resolves() {
    let (control, async_control) = controls();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("doesn't resolve", &expected, Operand::<usize>::Literal(12));

    assert!(control.verify_all().is_err());
}

#[test]
fn failure_expected_deferred_never_resolves_both() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();
    actual.resolve(12).unwrap();

    async_control.assert_deferred_equals("doesn't resolve", &expected, &actual);

    assert!(control.verify_all().is_err());
}

#[test]
fn failure_wrong_value_actual_deferred() {
    let (_control, async_control) = controls();
    let (control2, async_control2) = controls();
    let actual = Deferred::<usize>::new();

    async_control.assert_deferred_equals("doesn't resolve", Operand::<usize>::Literal(12), &actual);
    async_control2.assert_deferred_error(&actual, || actual.resolve(13).unwrap());

    control2.verify_all().unwrap();
}

#[test]
fn failure_wrong_value_expected_deferred() {
    let (_control, async_control) = controls();
    let (control2, async_control2) = controls();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("doesn't resolve", &expected, Operand::<usize>::Literal(12));
    async_control2.assert_deferred_error(&expected, || expected.resolve(13).unwrap());

    control2.verify_all().unwrap();
}

#[test]
fn failure_wrong_value_both_deferred() {
    let (control, async_control) = controls();
    let (control2, async_control2) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("different values", &expected, &actual);
    expected.resolve(12).unwrap();
    async_control2.assert_deferred_error(&actual, || actual.resolve(13).unwrap());

    let err = control.verify_all().unwrap_err();
    assert_eq!(
        ProblemKind::Failed(vec!["Expected 12 but was 13".into()]),
        err.problems()[0].kind
    );
    control2.verify_all().unwrap();
}

#[test]
fn failure_neither_deferred_ever_resolves() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("doesn't resolve", &expected, &actual);

    let err = control.verify_all().unwrap_err();
    assert!(matches!(
        err.problems()[0].kind,
        ProblemKind::NotSatisfied { calls: 0, .. }
    ));
}

#[test]
fn failure_rejected_operand_withholds_satisfaction() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();

    async_control.assert_deferred_equals("rejected", Operand::<usize>::Literal(12), &actual);
    actual.reject(Error::rejected("FAIL")).unwrap();

    let err = control.verify_all().unwrap_err();
    assert!(matches!(
        err.problems()[0].kind,
        ProblemKind::NotSatisfied { .. }
    ));
}

#[test]
fn success_actual_deferred() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();

    async_control.assert_deferred_equals("should succeed", Operand::<usize>::Literal(12), &actual);
    actual.resolve(12).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_expected_deferred() {
    let (control, async_control) = controls();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("should succeed", &expected, Operand::<usize>::Literal(12));
    expected.resolve(12).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_both_deferred() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("should succeed", &expected, &actual);
    expected.resolve(12).unwrap();
    actual.resolve(12).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_both_deferred_reverse_order() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    let expected = Deferred::<usize>::new();

    async_control.assert_deferred_equals("should succeed", &expected, &actual);
    actual.resolve(12).unwrap();
    expected.resolve(12).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_both_resolved_before() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::resolved(12);
    let expected = Deferred::<usize>::resolved(12);

    async_control.assert_deferred_equals("should succeed", &expected, &actual);

    control.verify_all().unwrap();
}

#[test]
fn success_structured_values() {
    #[derive(Debug, Clone, PartialEq)]
    struct Response {
        status: u16,
        body: Vec<String>,
    }

    let (control, async_control) = controls();
    let actual = Deferred::<Response>::new();

    async_control.assert_deferred_equals(
        "should succeed",
        Operand::<Response>::Literal(Response {
            status: 200,
            body: vec!["foo".into()],
        }),
        &actual,
    );
    actual
        .resolve(Response {
            status: 200,
            body: vec!["foo".into()],
        })
        .unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_after_panicking_observer() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize>::new();
    actual.on_resolve(|_| panic!("observer failed"));

    let ret = catch_unwind(AssertUnwindSafe(|| actual.resolve(12)));
    assert!(ret.is_err());

    async_control.assert_deferred_equals("late", Operand::<usize>::Literal(12), &actual);

    control.verify_all().unwrap();
}

#[derive(Debug)]
enum BackendError {
    Check(String),
}

impl From<Error> for BackendError {
    fn from(err: Error) -> Self {
        Self::Check(err.to_string())
    }
}

#[test]
fn success_custom_error_type() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize, BackendError>::new();

    async_control.assert_deferred_equals(
        "custom error",
        Operand::<usize, BackendError>::Literal(12),
        &actual,
    );
    actual.resolve(12).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn failure_wrong_value_custom_error_type() {
    let (control, async_control) = controls();
    let actual = Deferred::<usize, BackendError>::new();

    async_control.assert_deferred_equals(
        "custom error",
        Operand::<usize, BackendError>::Literal(12),
        &actual,
    );
    actual.on_reject(|err| {
        assert!(matches!(err, BackendError::Check(msg) if msg == "Expected 12 but was 13"));
    });
    actual.resolve(13).unwrap();

    assert!(actual.is_rejected());
    assert!(control.verify_all().unwrap_err().contains("custom error"));
}
