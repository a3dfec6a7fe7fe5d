//! # Process-wide deferred factory
//!
//! One slot shared by every [`Emitter`](crate::Emitter) that does not carry its
//! own override. Lifecycle:
//! - unset at startup, which means [`TokioDeferred`];
//! - [`set_deferred_factory`] replaces it for all future `emit_async` calls;
//! - [`reset_deferred_factory`] restores the default (handy in tests).
//!
//! `emit_async` reads the slot once per call; calls already in flight keep the
//! factory they started with.

use std::sync::Arc;

use parking_lot::{RwLock, const_rwlock};

use super::factory::DeferredFactory;
use super::runtime::TokioDeferred;

static FACTORY: RwLock<Option<Arc<dyn DeferredFactory>>> = const_rwlock(None);

/// Replaces the process-wide deferred factory.
pub fn set_deferred_factory(factory: Arc<dyn DeferredFactory>) {
    tracing::debug!(factory = factory.name(), "deferred factory replaced");
    *FACTORY.write() = Some(factory);
}

/// Restores the default process-wide deferred factory ([`TokioDeferred`]).
pub fn reset_deferred_factory() {
    *FACTORY.write() = None;
}

/// Returns the current process-wide deferred factory.
pub fn deferred_factory() -> Arc<dyn DeferredFactory> {
    FACTORY
        .read()
        .clone()
        .unwrap_or_else(|| Arc::new(TokioDeferred))
}
