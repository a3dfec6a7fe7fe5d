//! # Catch-all listener list.
//!
//! Same bookkeeping as [`TypedRegistry`](super::TypedRegistry) for a single
//! unscoped sequence. The list is `None` whenever it would be empty.

use super::slot::{Slot, SlotId};
use crate::listeners::AnyListener;

pub(crate) struct AnyRegistry<P> {
    slots: Option<Vec<Slot<AnyListener<P>>>>,
}

impl<P> Default for AnyRegistry<P> {
    fn default() -> Self {
        Self { slots: None }
    }
}

impl<P> AnyRegistry<P> {
    pub(crate) fn push(&mut self, slot: Slot<AnyListener<P>>) {
        self.slots.get_or_insert_with(Vec::new).push(slot);
    }

    /// Removes the first slot holding or wrapping `listener`.
    pub(crate) fn remove_listener(&mut self, listener: &AnyListener<P>) -> bool {
        self.remove_first(|slot| slot.matches(listener))
    }

    pub(crate) fn remove_slot(&mut self, id: SlotId) -> bool {
        self.remove_first(|slot| slot.id == id)
    }

    fn remove_first(&mut self, pred: impl Fn(&Slot<AnyListener<P>>) -> bool) -> bool {
        let Some(seq) = self.slots.as_mut() else {
            return false;
        };
        let Some(index) = seq.iter().position(pred) else {
            return false;
        };
        seq.remove(index);

        if seq.is_empty() {
            self.slots = None;
        }
        true
    }

    pub(crate) fn clear(&mut self) {
        self.slots = None;
    }

    pub(crate) fn snapshot(&self) -> Vec<AnyListener<P>> {
        self.slots
            .as_ref()
            .map(|seq| seq.iter().map(|slot| slot.callable.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.as_ref().map_or(0, Vec::len)
    }

    /// True if the list exists (at least one any-listener).
    pub(crate) fn is_present(&self) -> bool {
        self.slots.is_some()
    }
}
