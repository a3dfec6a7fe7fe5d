//! Deferred values: the asynchronous-completion layer under `emit_async`.
//!
//! ## Contents
//! - [`Deferred`], [`DeferredFactory`] the handle type and the combinator contract
//! - [`TokioDeferred`] default factory, spawns pending work onto the tokio runtime
//! - [`InlineDeferred`] combines in the awaiting task, built on `futures` combinators
//! - `background` runs work nobody awaits, on the ambient or a lazily built runtime
//! - [`set_deferred_factory`], [`reset_deferred_factory`], [`deferred_factory`]
//!   the process-wide slot

mod background;
mod factory;
mod global;
mod inline;
mod runtime;

pub use factory::{Deferred, DeferredFactory};
pub use global::{deferred_factory, reset_deferred_factory, set_deferred_factory};
pub use inline::InlineDeferred;
pub use runtime::TokioDeferred;
