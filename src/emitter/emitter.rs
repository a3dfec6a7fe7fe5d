//! # Emitter handle, registration and removal.
//!
//! [`Emitter`] is a cheap-to-clone handle to one shared instance. Its state
//! (typed registry, catch-all list, pipe records) sits behind a single mutex
//! that is only held for bookkeeping, never while a listener runs. That keeps
//! re-entrant calls (a listener calling `on`/`off` on its own emitter) safe.
//!
//! ## Rules
//! - Registration order is dispatch order.
//! - Registering the same listener twice creates two independent slots.
//! - Removal takes the first slot that holds the listener or wraps it (`once`).
//! - Removing something that is not registered is a silent no-op.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::builder::EmitterBuilder;
use super::config::EmitterConfig;
use super::pipe::PipeRecord;
use crate::listeners::{AnyListener, Listener};
use crate::registry::{AnyRegistry, Slot, SlotId, TypedRegistry};

/// Mutable bookkeeping of one emitter.
pub(super) struct State<P> {
    pub(super) registry: TypedRegistry<P>,
    pub(super) any: AnyRegistry<P>,
    pub(super) pipes: Vec<PipeRecord<P>>,
}

impl<P> Default for State<P> {
    fn default() -> Self {
        Self {
            registry: TypedRegistry::default(),
            any: AnyRegistry::default(),
            pipes: Vec::new(),
        }
    }
}

pub(super) struct Inner<P> {
    pub(super) state: Mutex<State<P>>,
    pub(super) config: EmitterConfig,
}

/// In-process event emitter.
///
/// Clones share the same listeners; use [`Emitter::same`] to test whether two
/// handles refer to the same instance.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use relay_emitter::{AnyListener, Emitter, Listener};
///
/// let emitter: Emitter<&'static str> = Emitter::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let h = Arc::clone(&hits);
/// emitter.once("ready", Listener::new(move |_: &&str| {
///     h.fetch_add(1, Ordering::SeqCst);
/// }));
/// emitter.on_any(AnyListener::new(|event: &str, msg: &&str| {
///     println!("{event}: {msg}");
/// }));
///
/// emitter.emit("ready", &"first").unwrap();
/// emitter.emit("ready", &"second").unwrap();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct Emitter<P> {
    pub(super) inner: Arc<Inner<P>>,
}

/// Alias kept for callers used to the `EventEmitter` naming.
pub type EventEmitter<P> = Emitter<P>;

impl<P> Clone for Emitter<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> Emitter<P>
where
    P: Send + Sync + 'static,
{
    /// Creates an empty emitter with default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an empty emitter with the given configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                config,
            }),
        }
    }

    /// Returns a builder for a configured emitter.
    pub fn builder() -> EmitterBuilder<P> {
        EmitterBuilder::default()
    }

    /// Label used in log records.
    pub fn name(&self) -> &str {
        self.inner.config.name_or_default()
    }

    /// Configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.inner.config
    }

    /// True if both handles refer to the same emitter instance.
    #[inline]
    pub fn same(&self, other: &Emitter<P>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Appends `listener` to the listeners of `event`.
    pub fn on(&self, event: impl Into<String>, listener: Listener<P>) {
        let event = event.into();
        tracing::trace!(emitter = self.name(), event = %event, "listener added");
        self.inner
            .state
            .lock()
            .registry
            .push(event, Slot::new(listener));
    }

    /// Alias of [`Emitter::on`].
    pub fn add_listener(&self, event: impl Into<String>, listener: Listener<P>) {
        self.on(event, listener);
    }

    /// Registers `listener` for the next emission of `event` only.
    ///
    /// The registration can still be removed with `off(event, &listener)`.
    pub fn once(&self, event: impl Into<String>, listener: Listener<P>) {
        let event = event.into();
        let id = SlotId::next();
        let weak = Arc::downgrade(&self.inner);
        let key = event.clone();
        let original = listener.clone();

        let wrapper = Listener::new(move |payload: &P| {
            if let Some(inner) = weak.upgrade() {
                inner.state.lock().registry.remove_slot(&key, id);
            }
            original.call(payload)
        });

        tracing::trace!(emitter = self.name(), event = %event, "once listener added");
        self.inner
            .state
            .lock()
            .registry
            .push(event, Slot::wrapping(id, wrapper, listener));
    }

    /// Appends `listener` to the catch-all list.
    pub fn on_any(&self, listener: AnyListener<P>) {
        tracing::trace!(emitter = self.name(), "any listener added");
        self.inner.state.lock().any.push(Slot::new(listener));
    }

    /// Registers a catch-all listener for the next emission only.
    pub fn once_any(&self, listener: AnyListener<P>) {
        let id = SlotId::next();
        let weak = Arc::downgrade(&self.inner);
        let original = listener.clone();

        let wrapper = AnyListener::new(move |event: &str, payload: &P| {
            if let Some(inner) = weak.upgrade() {
                inner.state.lock().any.remove_slot(id);
            }
            original.call(event, payload)
        });

        tracing::trace!(emitter = self.name(), "once any listener added");
        self.inner
            .state
            .lock()
            .any
            .push(Slot::wrapping(id, wrapper, listener));
    }

    // ---------------------------
    // Removal
    // ---------------------------

    /// Removes the first registration of `listener` for `event`.
    ///
    /// Matches both plain registrations and `once` registrations of `listener`.
    pub fn off(&self, event: &str, listener: &Listener<P>) {
        let removed = self
            .inner
            .state
            .lock()
            .registry
            .remove_listener(event, listener);
        tracing::trace!(emitter = self.name(), event, removed, "listener removal");
    }

    /// Alias of [`Emitter::off`].
    pub fn remove_listener(&self, event: &str, listener: &Listener<P>) {
        self.off(event, listener);
    }

    /// Removes the first catch-all registration of `listener`.
    pub fn off_any(&self, listener: &AnyListener<P>) {
        let removed = self.inner.state.lock().any.remove_listener(listener);
        tracing::trace!(emitter = self.name(), removed, "any listener removal");
    }

    /// Bulk removal.
    ///
    /// - `off_all(None)`: drops every listener, every catch-all listener and
    ///   every pipe; the emitter is back to its initial state.
    /// - `off_all("event")`: drops only the listeners of `event`.
    pub fn off_all<'a>(&self, event: impl Into<Option<&'a str>>) {
        let mut state = self.inner.state.lock();
        match event.into() {
            None => {
                state.registry.clear();
                state.any.clear();
                state.pipes.clear();
                drop(state);
                tracing::debug!(emitter = self.name(), "all listeners and pipes removed");
            }
            Some(event) => {
                let removed = state.registry.clear_event(event);
                drop(state);
                tracing::debug!(emitter = self.name(), event, removed, "listeners removed");
            }
        }
    }

    /// Alias of [`Emitter::off_all`].
    pub fn remove_all_listeners<'a>(&self, event: impl Into<Option<&'a str>>) {
        self.off_all(event);
    }

    // ---------------------------
    // Introspection
    // ---------------------------

    /// Listeners currently registered for `event`, in dispatch order.
    ///
    /// Once-registrations show up as their wrapper.
    pub fn listeners(&self, event: &str) -> Vec<Listener<P>> {
        self.inner.state.lock().registry.snapshot(event)
    }

    /// Catch-all listeners currently registered, in dispatch order.
    pub fn listeners_any(&self) -> Vec<AnyListener<P>> {
        self.inner.state.lock().any.snapshot()
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.state.lock().registry.len(event)
    }

    /// Number of event types that have at least one listener.
    pub fn event_count(&self) -> usize {
        self.inner.state.lock().registry.event_count()
    }

    /// Event types that have at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        self.inner.state.lock().registry.events()
    }
}

impl<P> Default for Emitter<P>
where
    P: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Emitter")
            .field("name", &self.inner.config.name_or_default())
            .field("event_count", &state.registry.event_count())
            .field(
                "any_listeners",
                &state.any.is_present().then(|| state.any.len()),
            )
            .field("pipes", &state.pipes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex as PlMutex;

    use super::*;
    use crate::listeners::Outcome;

    fn counter() -> (Arc<AtomicUsize>, Listener<u32>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let listener = Listener::new(move |_: &u32| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (hits, listener)
    }

    #[test]
    fn on_then_emit_invokes_once_with_payload() {
        let emitter: Emitter<u32> = Emitter::new();
        let seen = Arc::new(PlMutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        emitter.on("stuff", Listener::new(move |n: &u32| s.lock().push(*n)));

        emitter.emit("stuff", &7).unwrap();
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn event_count_tracks_types() {
        let emitter: Emitter<u32> = Emitter::new();
        let (_, l) = counter();
        emitter.on("stuff", l.clone());
        emitter.on("stuff", l.clone());
        emitter.on("stuff_2", l);

        assert_eq!(emitter.event_count(), 2);
        assert_eq!(emitter.listener_count("stuff"), 2);
        assert_eq!(emitter.event_names(), vec!["stuff", "stuff_2"]);
    }

    #[test]
    fn once_fires_a_single_time_and_cleans_up() {
        let emitter: Emitter<u32> = Emitter::new();
        let (hits, l) = counter();
        emitter.once("stuff", l);

        emitter.emit("stuff", &1).unwrap();
        emitter.emit("stuff", &2).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.event_count(), 0);
        assert!(emitter.listeners("stuff").is_empty());
    }

    #[test]
    fn once_can_be_removed_with_original() {
        let emitter: Emitter<u32> = Emitter::new();
        let (hits, l) = counter();
        emitter.once("stuff", l.clone());
        emitter.off("stuff", &l);

        emitter.emit("stuff", &1).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.event_count(), 0);
    }

    #[test]
    fn off_is_idempotent() {
        let emitter: Emitter<u32> = Emitter::new();
        let (_, kept) = counter();
        let (_, stranger) = counter();
        emitter.on("a", kept.clone());

        emitter.off("a", &stranger);
        emitter.off("missing", &kept);
        emitter.off("a", &kept);
        emitter.off("a", &kept);

        assert_eq!(emitter.listener_count("a"), 0);
        assert_eq!(emitter.event_count(), 0);
    }

    #[test]
    fn duplicate_registration_fires_twice_and_removes_one_slot() {
        let emitter: Emitter<u32> = Emitter::new();
        let (hits, l) = counter();
        emitter.on("a", l.clone());
        emitter.add_listener("a", l.clone());

        emitter.emit("a", &0).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        emitter.remove_listener("a", &l);
        emitter.emit("a", &0).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn any_listener_receives_type_and_payload() {
        let emitter: Emitter<u32> = Emitter::new();
        let seen = Arc::new(PlMutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        emitter.on_any(AnyListener::new(move |event: &str, n: &u32| {
            s.lock().push((event.to_string(), *n));
        }));

        emitter.emit("x", &1).unwrap();
        emitter.emit("y", &2).unwrap();
        assert_eq!(
            *seen.lock(),
            vec![("x".to_string(), 1), ("y".to_string(), 2)]
        );
    }

    #[test]
    fn off_any_removes_one_and_keeps_the_rest() {
        let emitter: Emitter<u32> = Emitter::new();
        let one_hits = Arc::new(AtomicUsize::new(0));
        let two_hits = Arc::new(AtomicUsize::new(0));
        let (o, t) = (Arc::clone(&one_hits), Arc::clone(&two_hits));
        let one = AnyListener::new(move |_: &str, _: &u32| {
            o.fetch_add(1, Ordering::SeqCst);
        });
        let two = AnyListener::new(move |_: &str, _: &u32| {
            t.fetch_add(1, Ordering::SeqCst);
        });
        emitter.on_any(one.clone());
        emitter.on_any(two);
        emitter.off_any(&one);

        emitter.emit("stuff", &0).unwrap();
        assert_eq!(one_hits.load(Ordering::SeqCst), 0);
        assert_eq!(two_hits.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listeners_any().len(), 1);
    }

    #[test]
    fn once_any_fires_once_and_empties_list() {
        let emitter: Emitter<u32> = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let listener = AnyListener::new(move |_: &str, _: &u32| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        emitter.once_any(listener.clone());

        emitter.emit("a", &0).unwrap();
        emitter.emit("b", &0).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(emitter.listeners_any().is_empty());

        emitter.once_any(listener.clone());
        emitter.off_any(&listener);
        assert!(emitter.listeners_any().is_empty());
    }

    #[test]
    fn off_all_with_type_leaves_others() {
        let emitter: Emitter<u32> = Emitter::new();
        let (a_hits, a) = counter();
        let (b_hits, b) = counter();
        emitter.on("a", a.clone());
        emitter.on("a", a);
        emitter.on("b", b);
        emitter.on_any(AnyListener::new(|_: &str, _: &u32| ()));

        emitter.off_all("a");
        emitter.emit("a", &0).unwrap();
        emitter.emit("b", &0).unwrap();

        assert_eq!(a_hits.load(Ordering::SeqCst), 0);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.event_count(), 1);
        assert_eq!(emitter.listeners_any().len(), 1);
    }

    #[test]
    fn off_all_resets_everything() {
        let emitter: Emitter<u32> = Emitter::new();
        let (hits, l) = counter();
        emitter.on("a", l);
        emitter.on_any(AnyListener::new(|_: &str, _: &u32| Outcome::ok()));

        emitter.remove_all_listeners(None);
        emitter.emit("a", &0).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.event_count(), 0);
        assert!(emitter.listeners_any().is_empty());
    }

    #[test]
    fn listeners_reflect_current_contents() {
        let emitter: Emitter<u32> = Emitter::new();
        let (_, l) = counter();
        assert!(emitter.listeners("a").is_empty());

        emitter.on("a", l.clone());
        let listed = emitter.listeners("a");
        assert_eq!(listed.len(), 1);
        assert!(listed[0].same(&l));
    }

    #[test]
    fn clones_share_state() {
        let emitter: Emitter<u32> = Emitter::builder().name("shared").build();
        let other = emitter.clone();
        let (hits, l) = counter();
        other.on("a", l);

        emitter.emit("a", &0).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(emitter.same(&other));
        assert!(!emitter.same(&Emitter::new()));
        assert_eq!(other.name(), "shared");
    }

    #[test]
    fn reentrant_registration_does_not_affect_current_pass() {
        let emitter: Emitter<u32> = Emitter::new();
        let (late_hits, late) = counter();
        let handle = emitter.clone();
        emitter.on(
            "a",
            Listener::new(move |_: &u32| handle.on("a", late.clone())),
        );

        emitter.emit("a", &0).unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.listener_count("a"), 2);

        emitter.emit("a", &0).unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_removal_does_not_skip_snapshot() {
        let emitter: Emitter<u32> = Emitter::new();
        let (second_hits, second) = counter();
        let handle = emitter.clone();
        let victim = second.clone();
        emitter.on("a", Listener::new(move |_: &u32| handle.off("a", &victim)));
        emitter.on("a", second);

        emitter.emit("a", &0).unwrap();
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);

        emitter.emit("a", &0).unwrap();
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_counts() {
        let emitter: Emitter<u32> = Emitter::builder().name("dbg").build();
        let (_, l) = counter();
        emitter.on("a", l);
        let out = format!("{emitter:?}");
        assert!(out.contains("dbg"));
        assert!(out.contains("event_count: 1"));
        assert!(out.contains("any_listeners: None"));
    }
}
