//! Trailing-edge debounce.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};

use crate::runtime;

struct DebounceInner<A> {
    callback: Rc<dyn Fn(A)>,
    delay: Duration,
    pending: RefCell<Option<AbortHandle>>,
}

/// A wrapped callback that runs at most once per quiet period of `delay`.
///
/// Every [`Debounced::call`] aborts the previously scheduled, not yet fired
/// invocation and schedules a new one carrying the latest arguments.
pub struct Debounced<A> {
    inner: Rc<DebounceInner<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> Debounced<A> {
    pub fn call(&self, args: A) {
        self.cancel();

        let callback = self.inner.callback.clone();
        let delay = self.inner.delay;
        let (task, handle) = abortable(async move {
            runtime::sleep(delay).await;
            callback(args);
        });
        *self.inner.pending.borrow_mut() = Some(handle);

        runtime::spawn_detached(async move {
            let _ = task.await;
        });
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.inner.pending.borrow_mut().take() {
            handle.abort();
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

/// Wrap `callback` so that bursts of calls collapse into one trailing call.
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounced<A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        inner: Rc::new(DebounceInner {
            callback: Rc::new(callback),
            delay,
            pending: RefCell::new(None),
        }),
    }
}
