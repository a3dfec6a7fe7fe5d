//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the per-instance settings of an
//! [`Emitter`](crate::Emitter).
//!
//! ## Sentinel values
//! - `name = None` → logged as `"emitter"`
//! - `deferred = None` → the process-wide factory (see [`deferred_factory`])

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::deferred::{DeferredFactory, deferred_factory};

/// Per-emitter configuration.
///
/// ## Field semantics
/// - `name`: label used in log fields only
/// - `deferred`: factory override for this emitter's `emit_async` calls
#[derive(Clone, Default)]
pub struct EmitterConfig {
    /// Label attached to this emitter's log records.
    pub name: Option<Cow<'static, str>>,

    /// Instance-level deferred factory.
    ///
    /// When set, it takes precedence over the process-wide factory for this
    /// emitter only.
    pub deferred: Option<Arc<dyn DeferredFactory>>,
}

impl EmitterConfig {
    /// Returns the name, or `"emitter"` when unset.
    #[inline]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("emitter")
    }

    /// Resolves the factory to use right now.
    pub fn deferred_or_global(&self) -> Arc<dyn DeferredFactory> {
        match &self.deferred {
            Some(factory) => Arc::clone(factory),
            None => deferred_factory(),
        }
    }
}

impl fmt::Debug for EmitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterConfig")
            .field("name", &self.name)
            .field("deferred", &self.deferred.as_ref().map(|d| d.name()))
            .finish()
    }
}
