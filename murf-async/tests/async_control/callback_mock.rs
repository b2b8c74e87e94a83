use std::collections::HashMap;

use murf_async::{assert_equals, Error};

use super::controls;

#[test]
fn failure_never_called() {
    let (control, async_control) = controls();

    let _callback =
        async_control.create_callback_mock("failingCallbackMock", |()| Ok::<_, Error>(()));

    let err = control.verify_all().unwrap_err();
    assert!(err.contains("failingCallbackMock"));
}

#[test]
fn success() {
    let (control, async_control) = controls();

    let callback =
        async_control.create_callback_mock("succeedingCallbackMock", |()| Ok::<_, Error>(()));
    callback(()).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_with_arg() {
    let (control, async_control) = controls();

    let callback = async_control.create_callback_mock(
        "succeedingCallbackMockWithArg",
        async_control.create_callback_mock("metaCallbackMock", |val: usize| {
            assert_equals(&10, &val)
        }),
    );
    callback(10).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn success_with_args() {
    let (control, async_control) = controls();

    let callback = async_control.create_callback_mock(
        "succeedingCallbackMockWithArgs",
        async_control.create_callback_mock(
            "metaCallbackMock",
            |(val1, val2, val3): (usize, &'static str, HashMap<&'static str, &'static str>)| {
                assert_equals(&10, &val1)?;
                assert_equals("foo", val2)?;
                assert_equals(&HashMap::from([("foo", "bar")]), &val3)?;

                Ok::<_, Error>(())
            },
        ),
    );
    callback((10, "foo", HashMap::from([("foo", "bar")]))).unwrap();

    control.verify_all().unwrap();
}

#[test]
fn failing_verify_is_returned_and_recorded() {
    let (control, async_control) = controls();

    let callback =
        async_control.create_callback_mock("wrong value", |val: usize| assert_equals(&10, &val));

    let err = callback(11).unwrap_err();
    assert!(err.is_assertion());

    let err = control.verify_all().unwrap_err();
    assert!(err.contains("wrong value"));
}

#[test]
fn failing_meta_callback_fails_both() {
    let (control, async_control) = controls();

    let callback = async_control.create_callback_mock(
        "outer",
        async_control.create_callback_mock("meta", |val: usize| assert_equals(&10, &val)),
    );
    assert!(callback(12).is_err());

    let err = control.verify_all().unwrap_err();
    assert!(err.contains("outer"));
    assert!(err.contains("meta"));
}

#[test]
fn failure_called_twice() {
    let (control, async_control) = controls();

    let callback = async_control.create_callback_mock("called twice", |()| Ok::<_, Error>(()));
    callback(()).unwrap();

    let err = callback(()).unwrap_err();
    assert!(matches!(err, Error::UnexpectedCall { calls: 2, .. }));
    assert!(control.verify_all().is_err());
}

#[test]
#[should_panic(expected = "`never called`")]
fn checkpoint_panics_if_never_called() {
    let (control, async_control) = controls();

    let _callback = async_control.create_callback_mock("never called", |()| Ok::<_, Error>(()));

    control.checkpoint();
}
