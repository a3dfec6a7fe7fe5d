//! # Piping: forwarding every emission to another emitter.
//!
//! `source.pipe(&target, "ns")` registers a catch-all listener on `source`
//! that re-emits each `(type, payload)` on `target` as `("ns:type", payload)`.
//! Without a namespace (or with an empty one) the type is forwarded unchanged.
//!
//! ## Rules
//! - At most one pipe per target instance; a second `pipe` fails with
//!   [`EmitterError::AlreadyPiped`].
//! - The target is held weakly: once every handle to it is dropped, its record
//!   and forwarding listener are pruned on the next emission or pipe call.
//! - Forwarding uses the target's synchronous `emit`; a failure in the target's
//!   listeners comes back out of the source's `emit`.
//! - Piping an emitter into itself (directly or through a cycle) re-emits
//!   forever; avoid it.

use std::sync::{Arc, Weak};

use super::Emitter;
use super::emitter::{Inner, State};
use crate::error::EmitterError;
use crate::listeners::{AnyListener, Outcome};
use crate::registry::Slot;

/// Separator between namespace and event type.
const NAMESPACE_SEPARATOR: char = ':';

/// One forwarding relationship.
pub(super) struct PipeRecord<P> {
    target: Weak<Inner<P>>,
    namespace: Option<String>,
    forwarder: AnyListener<P>,
}

impl<P> PipeRecord<P> {
    fn targets(&self, target: &Weak<Inner<P>>) -> bool {
        Weak::ptr_eq(&self.target, target)
    }

    fn is_dangling(&self) -> bool {
        self.target.strong_count() == 0
    }
}

/// Drops records whose target is gone, with their forwarding listeners.
fn prune_dangling<P>(state: &mut State<P>) -> usize {
    let State { any, pipes, .. } = state;
    let before = pipes.len();
    pipes.retain(|record| {
        if record.is_dangling() {
            any.remove_listener(&record.forwarder);
            return false;
        }
        true
    });
    before - pipes.len()
}

impl<P> Emitter<P>
where
    P: Send + Sync + 'static,
{
    /// Forwards every emission of `self` to `target`, optionally prefixed.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use parking_lot::Mutex;
    /// use relay_emitter::{AnyListener, Emitter};
    ///
    /// let source: Emitter<i32> = Emitter::new();
    /// let target: Emitter<i32> = Emitter::new();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    ///
    /// let s = Arc::clone(&seen);
    /// target.on_any(AnyListener::new(move |event: &str, n: &i32| {
    ///     s.lock().push(format!("{event}={n}"));
    /// }));
    ///
    /// source.pipe(&target, "orders").unwrap();
    /// source.emit("created", &1).unwrap();
    /// assert_eq!(*seen.lock(), vec!["orders:created=1".to_string()]);
    ///
    /// assert!(source.pipe(&target, None).is_err());
    /// ```
    pub fn pipe<'a>(
        &self,
        target: &Emitter<P>,
        namespace: impl Into<Option<&'a str>>,
    ) -> Result<(), EmitterError> {
        let namespace = namespace
            .into()
            .filter(|ns| !ns.is_empty())
            .map(str::to_owned);
        let target_ref = Arc::downgrade(&target.inner);

        let mut state = self.inner.state.lock();
        prune_dangling(&mut state);
        if state.pipes.iter().any(|record| record.targets(&target_ref)) {
            return Err(EmitterError::AlreadyPiped);
        }

        let forwarder = forwarder(
            Arc::downgrade(&self.inner),
            Weak::clone(&target_ref),
            namespace.clone(),
        );
        state.any.push(Slot::new(forwarder.clone()));
        state.pipes.push(PipeRecord {
            target: target_ref,
            namespace,
            forwarder,
        });
        let pipes = state.pipes.len();
        drop(state);

        tracing::debug!(
            emitter = self.name(),
            target = target.name(),
            pipes,
            "piped"
        );
        Ok(())
    }

    /// Stops forwarding to `target`.
    ///
    /// Fails with [`EmitterError::NotPiped`] when `self` has no pipes at all and
    /// with [`EmitterError::NotPipedTo`] when none leads to `target`.
    pub fn unpipe(&self, target: &Emitter<P>) -> Result<(), EmitterError> {
        let target_ref = Arc::downgrade(&target.inner);

        let mut state = self.inner.state.lock();
        prune_dangling(&mut state);
        if state.pipes.is_empty() {
            return Err(EmitterError::NotPiped);
        }
        let Some(index) = state
            .pipes
            .iter()
            .position(|record| record.targets(&target_ref))
        else {
            return Err(EmitterError::NotPipedTo);
        };

        let record = state.pipes.remove(index);
        state.any.remove_listener(&record.forwarder);
        drop(state);

        tracing::debug!(
            emitter = self.name(),
            target = target.name(),
            namespace = record.namespace.as_deref(),
            "unpiped"
        );
        Ok(())
    }

    /// True if `self` currently forwards to `target`.
    pub fn is_piped_to(&self, target: &Emitter<P>) -> bool {
        let target_ref = Arc::downgrade(&target.inner);
        let mut state = self.inner.state.lock();
        prune_dangling(&mut state);
        state.pipes.iter().any(|record| record.targets(&target_ref))
    }

    /// Number of pipes whose target is still alive.
    pub fn pipe_count(&self) -> usize {
        let mut state = self.inner.state.lock();
        prune_dangling(&mut state);
        state.pipes.len()
    }
}

/// Builds the catch-all listener that re-emits on `target`.
///
/// When `target` is gone the listener prunes dangling records from `source`.
fn forwarder<P>(
    source: Weak<Inner<P>>,
    target: Weak<Inner<P>>,
    namespace: Option<String>,
) -> AnyListener<P>
where
    P: Send + Sync + 'static,
{
    AnyListener::new(move |event: &str, payload: &P| {
        let Some(inner) = target.upgrade() else {
            if let Some(source) = source.upgrade() {
                let pruned = prune_dangling(&mut source.state.lock());
                tracing::debug!(pruned, "pipe target dropped");
            }
            return Outcome::ok();
        };
        let target = Emitter { inner };
        let result = match &namespace {
            Some(ns) => target.emit(&format!("{ns}{NAMESPACE_SEPARATOR}{event}"), payload),
            None => target.emit(event, payload),
        };
        Outcome::Ready(result)
    })
}
