use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{Emitter, EmitterConfig};
use crate::deferred::DeferredFactory;

/// Builder for constructing an [`Emitter`] with non-default settings.
///
/// ```rust
/// use std::sync::Arc;
/// use relay_emitter::{Emitter, InlineDeferred};
///
/// let emitter: Emitter<String> = Emitter::builder()
///     .name("audit")
///     .deferred(Arc::new(InlineDeferred))
///     .build();
/// assert_eq!(emitter.name(), "audit");
/// ```
pub struct EmitterBuilder<P> {
    cfg: EmitterConfig,
    _payload: PhantomData<fn() -> P>,
}

impl<P> EmitterBuilder<P>
where
    P: Send + Sync + 'static,
{
    /// Creates a builder starting from `cfg`.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            _payload: PhantomData,
        }
    }

    /// Sets the label used in log records.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name = Some(name.into());
        self
    }

    /// Pins this emitter to its own deferred factory.
    pub fn deferred(mut self, factory: Arc<dyn DeferredFactory>) -> Self {
        self.cfg.deferred = Some(factory);
        self
    }

    /// Builds an empty emitter.
    pub fn build(self) -> Emitter<P> {
        Emitter::with_config(self.cfg)
    }
}

impl<P> Default for EmitterBuilder<P>
where
    P: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl<P> fmt::Debug for EmitterBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterBuilder").field("cfg", &self.cfg).finish()
    }
}
