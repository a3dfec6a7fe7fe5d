//! # Deferred-value factory contract
//!
//! [`DeferredFactory`] is the combinator set `emit_async` is built on:
//! - [`settled`](DeferredFactory::settled) lifts a synchronous result into a deferred;
//! - [`all`](DeferredFactory::all) combines deferreds with "all must succeed" semantics;
//! - [`detach`](DeferredFactory::detach) takes ownership of pending work nobody awaits
//!   (used by the synchronous `emit`).
//!
//! Implementations are shared process-wide (see [`set_deferred_factory`](crate::set_deferred_factory))
//! or per emitter (see [`EmitterBuilder::deferred`](crate::EmitterBuilder::deferred)).

use futures::future::{self, BoxFuture};

use crate::error::ListenerError;

/// Asynchronous completion handle produced by listeners and by `emit_async`.
pub type Deferred = BoxFuture<'static, Result<(), ListenerError>>;

/// Construction and combinator functions for deferred values.
pub trait DeferredFactory: Send + Sync + 'static {
    /// Lifts an already-available result into a deferred.
    fn settled(&self, result: Result<(), ListenerError>) -> Deferred {
        Box::pin(future::ready(result))
    }

    /// Combines `pending` into one deferred.
    ///
    /// The combined value resolves once every input resolves and rejects with
    /// the first rejection observed.
    fn all(&self, pending: Vec<Deferred>) -> Deferred;

    /// Takes ownership of pending work whose result nobody will observe.
    fn detach(&self, pending: Deferred);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
