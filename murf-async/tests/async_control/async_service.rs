use futures::channel::oneshot::{channel, Receiver};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use murf_async::{async_assert_equals, Deferred, Error, Operand};

use super::controls;

/// Doubles the value received from the backend and reports it to `callback`.
async fn lookup<C>(backend: Receiver<usize>, callback: C)
where
    C: Fn((usize,)) -> Result<(), Error>,
{
    if let Ok(value) = backend.await {
        let _ = callback((value * 2,));
    }
}

/// Same as [`lookup`] but reports the result through a deferred.
async fn lookup_deferred(backend: Receiver<usize>, result: Deferred<usize>) {
    let ret = match backend.await {
        Ok(value) => result.resolve(value * 2),
        Err(_) => result.reject(Error::rejected("backend is gone")),
    };

    ret.unwrap();
}

#[test]
fn callback_is_fired_by_task() {
    let (control, async_control) = controls();
    let mut pool = LocalPool::new();
    let (sender, receiver) = channel();

    let callback = async_assert_equals!(async_control, "lookup result", 42usize);
    pool.spawner()
        .spawn_local(lookup(receiver, callback))
        .unwrap();

    pool.run_until_stalled();
    assert!(control.verify_all().is_err());

    sender.send(21).unwrap();
    pool.run_until_stalled();

    control.verify_all().unwrap();
}

#[test]
fn callback_with_wrong_value_fails_verification() {
    let (control, async_control) = controls();
    let mut pool = LocalPool::new();
    let (sender, receiver) = channel();

    let callback = async_assert_equals!(async_control, "lookup result", 42usize);
    pool.spawner()
        .spawn_local(lookup(receiver, callback))
        .unwrap();

    sender.send(20).unwrap();
    pool.run_until_stalled();

    let err = control.verify_all().unwrap_err();
    assert!(err.contains("lookup result"));
}

#[test]
fn deferred_is_resolved_by_task() {
    let (control, async_control) = controls();
    let mut pool = LocalPool::new();
    let (sender, receiver) = channel();
    let actual = Deferred::<usize>::new();

    async_control.assert_deferred_equals("lookup", Operand::<usize>::Literal(42), &actual);
    pool.spawner()
        .spawn_local(lookup_deferred(receiver, actual.clone()))
        .unwrap();

    pool.run_until_stalled();
    assert!(actual.is_pending());

    sender.send(21).unwrap();
    pool.run_until_stalled();

    control.verify_all().unwrap();
}

#[test]
fn dropped_backend_rejects_deferred() {
    let (control, async_control) = controls();
    let mut pool = LocalPool::new();
    let (sender, receiver) = channel::<usize>();
    let actual = Deferred::<usize>::new();

    pool.spawner()
        .spawn_local(lookup_deferred(receiver, actual.clone()))
        .unwrap();
    async_control.assert_deferred_error(&actual, || drop(sender));
    assert!(control.verify_all().is_err());

    pool.run_until_stalled();

    control.verify_all().unwrap();
}
