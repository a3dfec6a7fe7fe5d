//! Registry slot: one registration of one listener.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::listeners::SameListener;

/// Global sequence for slot ids.
static SLOT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique id of a registration, used by once-wrappers to remove themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(u64);

impl SlotId {
    pub(crate) fn next() -> Self {
        SlotId(SLOT_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// A registered callable plus, for once-registrations, the listener it wraps.
#[derive(Debug, Clone)]
pub(crate) struct Slot<L> {
    pub(crate) id: SlotId,
    pub(crate) callable: L,
    pub(crate) original: Option<L>,
}

impl<L: SameListener> Slot<L> {
    /// Plain registration.
    pub(crate) fn new(callable: L) -> Self {
        Self {
            id: SlotId::next(),
            callable,
            original: None,
        }
    }

    /// Once-registration: `callable` wraps `original`.
    pub(crate) fn wrapping(id: SlotId, callable: L, original: L) -> Self {
        Self {
            id,
            callable,
            original: Some(original),
        }
    }

    /// True if this slot holds `listener` directly or wraps it.
    pub(crate) fn matches(&self, listener: &L) -> bool {
        self.callable.same(listener)
            || self
                .original
                .as_ref()
                .is_some_and(|original| original.same(listener))
    }
}
