//! Uniform async invocation for sync and async callbacks.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};

type SyncFn<A, R> = dyn Fn(A) -> R + Send + Sync;
type AsyncFn<A, R> = dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync;

enum Inner<A, R> {
    Sync(Box<SyncFn<A, R>>),
    Async(Box<AsyncFn<A, R>>),
}

/// A callback that is always awaited, whether it was written sync or async.
///
/// Several arguments are passed as a tuple. Errors are part of `R` and are
/// handed back to the caller untouched.
pub struct Callback<A, R> {
    inner: Arc<Inner<A, R>>,
}

impl<A, R> Clone for Callback<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("is_async", &self.is_async())
            .finish()
    }
}

impl<A, R> Callback<A, R> {
    /// Whether the wrapped function returns a future.
    #[must_use]
    pub fn is_async(&self) -> bool {
        matches!(self.inner.as_ref(), Inner::Async(_))
    }
}

impl<A, R> Callback<A, R>
where
    R: Send + 'static,
{
    /// Adapts a plain function. It runs inline when called and the returned
    /// future is already complete.
    pub fn from_sync<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner::Sync(Box::new(f))),
        }
    }

    /// Adapts a function returning a future.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner::Async(Box::new(move |args| f(args).boxed()))),
        }
    }

    /// Invokes the callback.
    pub fn call(&self, args: A) -> BoxFuture<'static, R> {
        match self.inner.as_ref() {
            Inner::Sync(f) => future::ready(f(args)).boxed(),
            Inner::Async(f) => f(args),
        }
    }

}

/// Adapts a synchronous function; see [`Callback::from_sync`].
pub fn ensure_async<A, R, F>(f: F) -> Callback<A, R>
where
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Callback::from_sync(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[test]
    fn test_sync_runs_inline_without_suspension() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let adapted = ensure_async(move |x: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            x + 1
        });

        let fut = adapted.call(4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut fut = task::spawn(fut);
        assert_ready_eq!(fut.poll(), 5);
        assert!(!adapted.is_async());
    }

    #[test]
    fn test_async_suspends_until_done() {
        let (tx, rx) = tokio::sync::oneshot::channel::<i32>();
        let rx = Arc::new(parking_lot::Mutex::new(Some(rx)));
        let adapted = Callback::from_async(move |x: i32| {
            let rx = rx.lock().take();
            async move {
                let offset = match rx {
                    Some(rx) => rx.await.unwrap_or_default(),
                    None => 0,
                };
                x + offset
            }
        });

        let mut fut = task::spawn(adapted.call(4));
        assert_pending!(fut.poll());

        tx.send(10).unwrap();
        assert!(fut.is_woken());
        assert_ready_eq!(fut.poll(), 14);
        assert!(adapted.is_async());
    }

    #[tokio::test]
    async fn test_tuple_arguments() {
        let adapted = Callback::from_sync(|(a, b): (i32, &'static str)| format!("{b}{a}"));
        assert_eq!(adapted.call((7, "#")).await, "#7");
    }

    #[tokio::test]
    async fn test_errors_propagate_unchanged() {
        let sync: Callback<u8, Result<u8, String>> =
            Callback::from_sync(|x: u8| if x > 1 { Ok(x) } else { Err(format!("too small: {x}")) });
        let asynchronous: Callback<u8, Result<u8, String>> =
            Callback::from_async(|x: u8| async move { Err(format!("rejected {x}")) });

        assert_eq!(sync.call(0).await, Err("too small: 0".to_string()));
        assert_eq!(sync.call(3).await, Ok(3));
        assert_eq!(asynchronous.call(5).await, Err("rejected 5".to_string()));
    }

    #[test]
    fn test_debug_reports_flavor() {
        let sync = Callback::from_sync(|x: u8| x);
        let asynchronous = Callback::from_async(|x: u8| async move { x });

        assert_eq!(format!("{sync:?}"), "Callback { is_async: false }");
        assert_eq!(format!("{asynchronous:?}"), "Callback { is_async: true }");
    }

    #[tokio::test]
    async fn test_clones_share_function() {
        let adapted = Callback::from_async(|x: u64| async move { x * 2 });
        let cloned = adapted.clone();

        assert_eq!(adapted.call(2).await, 4);
        assert_eq!(cloned.call(3).await, 6);
    }
}
