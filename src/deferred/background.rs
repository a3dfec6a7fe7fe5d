//! # Background executor for work nobody awaits
//!
//! Detached listener work and siblings left behind by a rejected `all` must run
//! to completion. Inside a tokio runtime they are spawned onto it; outside one
//! they go to a small runtime built on first use and kept for the life of the
//! process.
//!
//! ## Rules
//! - The ambient runtime always wins over the background one.
//! - The background runtime is built at most once; if building fails, pending
//!   work is polled once in the caller and dropped.

use std::future::Future;
use std::sync::OnceLock;
use std::task::{Context, Poll};

use futures::task::noop_waker;
use tokio::runtime::{Builder, Handle, Runtime};

use super::factory::Deferred;

static BACKGROUND: OnceLock<Option<Runtime>> = OnceLock::new();

/// Handle of the ambient runtime, or of the background runtime otherwise.
pub(crate) fn handle() -> Option<Handle> {
    if let Ok(rt) = Handle::try_current() {
        return Some(rt);
    }
    BACKGROUND
        .get_or_init(build)
        .as_ref()
        .map(|rt| rt.handle().clone())
}

fn build() -> Option<Runtime> {
    match Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("relay-emitter-bg")
        .enable_all()
        .build()
    {
        Ok(rt) => {
            tracing::debug!("background runtime started");
            Some(rt)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to build background runtime");
            None
        }
    }
}

/// Drives `pending` to completion without anyone awaiting it.
///
/// The first poll happens in the caller, inside the runtime context, so work
/// that is already done never leaves the calling thread.
pub(crate) fn run_detached(mut pending: Deferred) {
    let Some(rt) = handle() else {
        if !poll_once(&mut pending) {
            tracing::warn!("detached listener still pending; dropped (no runtime)");
        }
        return;
    };

    let _guard = rt.enter();
    if poll_once(&mut pending) {
        return;
    }
    rt.spawn(async move {
        if let Err(err) = pending.await {
            tracing::debug!(error = %err, "detached listener rejected");
        }
    });
}

/// Polls once with a no-op waker; true when the work settled.
fn poll_once(pending: &mut Deferred) -> bool {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    match pending.as_mut().poll(&mut cx) {
        Poll::Ready(Ok(())) => true,
        Poll::Ready(Err(err)) => {
            tracing::debug!(error = %err, "detached listener rejected");
            true
        }
        Poll::Pending => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    fn wait_for(flag: &AtomicBool) -> bool {
        for _ in 0..200 {
            if flag.load(Ordering::SeqCst) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn settled_work_runs_in_the_caller() {
        let ran = Arc::new(AtomicBool::new(false));
        let r = Arc::clone(&ran);
        run_detached(Box::pin(async move {
            r.store(true, Ordering::SeqCst);
            Ok(())
        }));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn pending_work_finishes_without_ambient_runtime() {
        let done = Arc::new(AtomicBool::new(false));
        let d = Arc::clone(&done);
        run_detached(Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            d.store(true, Ordering::SeqCst);
            Ok(())
        }));
        assert!(!done.load(Ordering::SeqCst));
        assert!(wait_for(&done));
    }

    #[test]
    fn background_runtime_is_built_once() {
        assert!(handle().is_some());
        let first = BACKGROUND.get().and_then(Option::as_ref).map(|rt| rt as *const Runtime);
        assert!(handle().is_some());
        let second = BACKGROUND.get().and_then(Option::as_ref).map(|rt| rt as *const Runtime);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
