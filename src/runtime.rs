//! Event-loop shim: detached local tasks and one-shot timers.
//!
//! In the browser these map onto `spawn_local` and `setTimeout`. Natively they
//! map onto tokio's local task set, so callers must be running inside a
//! `tokio::task::LocalSet` (the probe binary and the tests do).

use std::future::Future;
use std::time::Duration;

/// Run a future to completion in the background on the current thread.
///
/// Nothing is returned: there is no way to cancel or await the task.
#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    // JoinHandle is dropped on purpose: the task keeps running detached.
    drop(tokio::task::spawn_local(future));
}

/// Resolve after `duration` has elapsed.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen::JsValue;

    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        });
        // Without a window there is no timer queue; resolve immediately.
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
