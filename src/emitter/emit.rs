//! # Emission engine.
//!
//! ## Dispatch order
//! ```text
//! emit(type, payload)                       synchronous, stops at first Err
//!   ├─► any-listeners   (type, payload)     registration order
//!   └─► type-listeners  (payload)           registration order
//!
//! emit_async(type, payload, Parallel)       everything invoked up front
//!   ├─► type-listeners  ─┐
//!   └─► any-listeners   ─┴─► factory.all(..) ─► first rejection wins
//!
//! emit_async(type, payload, Series)         one at a time, lazily
//!   type-listener 1 ─► ... ─► type-listener N ─► any-listener 1 ─► ... ─► done
//!                     (stops at the first rejection; later listeners never run)
//! ```
//!
//! `emit` calls any-listeners first while `emit_async` stages type-listeners
//! first. Piping runs through `emit`, so forwarded events reach the target
//! before local type-listeners run.
//!
//! Every pass works on snapshots taken when the pass starts; the state lock is
//! released before the first listener runs.

use std::sync::Arc;

use super::Emitter;
use crate::deferred::{Deferred, DeferredFactory};
use crate::error::ListenerError;
use crate::listeners::Outcome;

/// Ordering mode of [`Emitter::emit_async`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmitMode {
    /// Invoke every listener immediately; settle when all settle.
    #[default]
    Parallel,
    /// Invoke each listener only after the previous one settled.
    Series,
}

impl From<bool> for EmitMode {
    /// `true` selects [`EmitMode::Series`].
    fn from(series: bool) -> Self {
        if series {
            EmitMode::Series
        } else {
            EmitMode::Parallel
        }
    }
}

impl<P> Emitter<P>
where
    P: Send + Sync + 'static,
{
    /// Delivers `payload` synchronously.
    ///
    /// Any-listeners run first, then the listeners of `event`. The first
    /// listener returning an error aborts the pass and the error is returned.
    /// Pending outcomes are handed to the deferred factory's `detach` and not
    /// awaited.
    pub fn emit(&self, event: &str, payload: &P) -> Result<(), ListenerError> {
        let (any, typed) = {
            let state = self.inner.state.lock();
            (state.any.snapshot(), state.registry.snapshot(event))
        };
        tracing::trace!(
            emitter = self.name(),
            event,
            any = any.len(),
            typed = typed.len(),
            "emit"
        );

        for listener in &any {
            self.settle_now(listener.call(event, payload))?;
        }
        for listener in &typed {
            self.settle_now(listener.call(payload))?;
        }
        Ok(())
    }

    /// Delivers `payload` through the deferred protocol.
    ///
    /// - [`EmitMode::Parallel`]: listeners of `event` and then any-listeners are
    ///   invoked before this method returns; the returned deferred resolves when
    ///   all of them resolve and rejects with the first rejection.
    /// - [`EmitMode::Series`]: nothing runs until the returned deferred is
    ///   polled; listeners of `event` and then any-listeners are invoked one at
    ///   a time, stopping at the first rejection.
    ///
    /// The set of listeners is fixed when this method is called.
    pub fn emit_async(
        &self,
        event: impl Into<String>,
        payload: P,
        mode: impl Into<EmitMode>,
    ) -> Deferred {
        let event = event.into();
        let mode = mode.into();
        let factory = self.inner.config.deferred_or_global();
        let (typed, any) = {
            let state = self.inner.state.lock();
            (state.registry.snapshot(&event), state.any.snapshot())
        };
        tracing::trace!(
            emitter = self.name(),
            event = %event,
            mode = ?mode,
            any = any.len(),
            typed = typed.len(),
            factory = factory.name(),
            "emit_async"
        );

        match mode {
            EmitMode::Parallel => {
                let mut pending = Vec::with_capacity(typed.len() + any.len());
                for listener in &typed {
                    pending.push(listener.call(&payload).into_deferred(&*factory));
                }
                for listener in &any {
                    pending.push(listener.call(&event, &payload).into_deferred(&*factory));
                }
                factory.all(pending)
            }
            EmitMode::Series => Box::pin(async move {
                for listener in typed {
                    listener.call(&payload).into_deferred(&*factory).await?;
                }
                for listener in any {
                    listener.call(&event, &payload).into_deferred(&*factory).await?;
                }
                Ok(())
            }),
        }
    }

    /// Shorthand for `emit_async(event, payload, EmitMode::Parallel)`.
    pub fn emit_parallel(&self, event: impl Into<String>, payload: P) -> Deferred {
        self.emit_async(event, payload, EmitMode::Parallel)
    }

    /// Shorthand for `emit_async(event, payload, EmitMode::Series)`.
    pub fn emit_series(&self, event: impl Into<String>, payload: P) -> Deferred {
        self.emit_async(event, payload, EmitMode::Series)
    }

    fn settle_now(&self, outcome: Outcome) -> Result<(), ListenerError> {
        match outcome {
            Outcome::Ready(result) => result,
            Outcome::Pending(deferred) => {
                let factory: Arc<dyn DeferredFactory> = self.inner.config.deferred_or_global();
                factory.detach(deferred);
                Ok(())
            }
        }
    }
}
