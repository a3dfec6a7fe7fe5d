//! Deferred factory that combines inputs in the awaiting task.

use std::future::Future;
use std::task::Poll;

use futures::future::{join_all, poll_fn};

use super::background;
use super::factory::{Deferred, DeferredFactory};

/// Deferred factory that polls every input from inside the combined future.
///
/// On the first rejection the combined future settles with that error and
/// the inputs still outstanding are handed to the background executor, so
/// their work runs to completion. `detach` goes the same way.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineDeferred;

impl DeferredFactory for InlineDeferred {
    fn all(&self, pending: Vec<Deferred>) -> Deferred {
        Box::pin(async move {
            let mut slots: Vec<Option<Deferred>> = pending.into_iter().map(Some).collect();
            let rejected = poll_fn(|cx| {
                let mut outstanding = false;
                for slot in slots.iter_mut() {
                    let Some(fut) = slot else { continue };
                    match fut.as_mut().poll(cx) {
                        Poll::Ready(Ok(())) => *slot = None,
                        Poll::Ready(Err(err)) => {
                            *slot = None;
                            return Poll::Ready(Some(err));
                        }
                        Poll::Pending => outstanding = true,
                    }
                }
                if outstanding {
                    Poll::Pending
                } else {
                    Poll::Ready(None)
                }
            })
            .await;

            let Some(err) = rejected else {
                return Ok(());
            };
            let rest: Vec<Deferred> = slots.into_iter().flatten().collect();
            if !rest.is_empty() {
                tracing::trace!(outstanding = rest.len(), "rejected; detaching siblings");
                background::run_detached(Box::pin(async move {
                    for result in join_all(rest).await {
                        if let Err(err) = result {
                            tracing::debug!(error = %err, "detached listener rejected");
                        }
                    }
                    Ok(())
                }));
            }
            Err(err)
        })
    }

    fn detach(&self, pending: Deferred) {
        background::run_detached(pending);
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}
