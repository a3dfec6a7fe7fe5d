//! # Tokio-backed deferred factory (default)
//!
//! [`TokioDeferred`] hands every pending input to the current tokio runtime, so
//! listener work keeps running to completion even after the combined deferred
//! has already rejected or was dropped by the caller.
//!
//! ## Diagram
//! ```text
//!    all([d1, d2, dN])
//!        │                      (one task per input)
//!        ├──────► spawn(d1) ──► JoinHandle 1 ─┐
//!        ├──────► spawn(d2) ──► JoinHandle 2 ─┼──► try_join_all ──► first Err wins
//!        └──────► spawn(dN) ──► JoinHandle N ─┘     (dropping a JoinHandle never aborts the task)
//! ```
//!
//! ## Rules
//! - Inputs start running when `all` is called, not when the result is awaited.
//! - A panic inside spawned work surfaces as [`ListenerError::Panicked`].
//! - Outside a runtime the work goes to a background runtime built on first use.
//! - Only when that runtime cannot be built does the factory degrade to
//!   [`InlineDeferred`].

use futures::future::try_join_all;
use tokio::task::JoinError;

use super::background;
use super::factory::{Deferred, DeferredFactory};
use super::inline::InlineDeferred;
use crate::error::ListenerError;

/// Deferred factory that spawns onto the ambient tokio runtime, or onto the
/// background runtime when called outside one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDeferred;

impl DeferredFactory for TokioDeferred {
    fn all(&self, pending: Vec<Deferred>) -> Deferred {
        let Some(rt) = background::handle() else {
            tracing::trace!("no tokio runtime; combining inline");
            return InlineDeferred.all(pending);
        };

        let joins: Vec<_> = pending.into_iter().map(|fut| rt.spawn(fut)).collect();

        Box::pin(async move {
            try_join_all(joins.into_iter().map(|join| async move {
                match join.await {
                    Ok(result) => result,
                    Err(err) => Err(join_error(err)),
                }
            }))
            .await
            .map(|_| ())
        })
    }

    fn detach(&self, pending: Deferred) {
        let Some(rt) = background::handle() else {
            return background::run_detached(pending);
        };
        rt.spawn(async move {
            if let Err(err) = pending.await {
                tracing::debug!(error = %err, "detached listener rejected");
            }
        });
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}

/// Maps a failed join to a listener error.
fn join_error(err: JoinError) -> ListenerError {
    if !err.is_panic() {
        return ListenerError::Aborted;
    }
    let panic = err.into_panic();
    let info = if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    };
    ListenerError::Panicked { info }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn rejection_does_not_cancel_siblings() {
        let finished = Arc::new(AtomicBool::new(false));
        let f = Arc::clone(&finished);

        let slow: Deferred = Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            f.store(true, Ordering::SeqCst);
            Ok(())
        });
        let failing: Deferred = Box::pin(async { Err(ListenerError::fail("boom")) });

        let res = TokioDeferred.all(vec![slow, failing]).await;
        assert_eq!(res, Err(ListenerError::fail("boom")));
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    #[allow(unreachable_code)]
    async fn panic_is_reported() {
        let boom: Deferred = Box::pin(async {
            panic!("listener exploded");
            Ok(())
        });
        let res = TokioDeferred.all(vec![boom]).await;
        assert_eq!(
            res,
            Err(ListenerError::Panicked {
                info: "listener exploded".into()
            })
        );
    }

    #[tokio::test]
    async fn detach_spawns_work() {
        let ran = Arc::new(AtomicBool::new(false));
        let r = Arc::clone(&ran);
        TokioDeferred.detach(Box::pin(async move {
            tokio::task::yield_now().await;
            r.store(true, Ordering::SeqCst);
            Ok(())
        }));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn outside_runtime_siblings_still_finish() {
        let finished = Arc::new(AtomicBool::new(false));
        let f = Arc::clone(&finished);
        let slow: Deferred = Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            f.store(true, Ordering::SeqCst);
            Ok(())
        });
        let failing: Deferred = Box::pin(async { Err(ListenerError::fail("early")) });

        let res = futures::executor::block_on(TokioDeferred.all(vec![failing, slow]));
        assert_eq!(res, Err(ListenerError::fail("early")));

        let mut done = false;
        for _ in 0..200 {
            done = finished.load(Ordering::SeqCst);
            if done {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(done);
    }

    #[test]
    fn outside_runtime_detach_finishes() {
        let ran = Arc::new(AtomicBool::new(false));
        let r = Arc::clone(&ran);
        TokioDeferred.detach(Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            r.store(true, Ordering::SeqCst);
            Ok(())
        }));

        let mut done = false;
        for _ in 0..200 {
            done = ran.load(Ordering::SeqCst);
            if done {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(done);
    }
}
