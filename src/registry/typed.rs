//! # Per-event-type listener registry.
//!
//! Maps an event type to its ordered slots. Keys exist only while their
//! sequence is non-empty, and `event_count` tracks the number of keys. When the
//! last key goes away the map is replaced by a fresh one.

use std::collections::HashMap;

use super::slot::{Slot, SlotId};
use crate::listeners::Listener;

pub(crate) struct TypedRegistry<P> {
    slots: HashMap<String, Vec<Slot<Listener<P>>>>,
    event_count: usize,
}

impl<P> Default for TypedRegistry<P> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            event_count: 0,
        }
    }
}

impl<P> TypedRegistry<P> {
    /// Appends a slot, creating the sequence for `event` if needed.
    pub(crate) fn push(&mut self, event: String, slot: Slot<Listener<P>>) {
        let seq = self.slots.entry(event).or_insert_with(|| {
            self.event_count += 1;
            Vec::new()
        });
        seq.push(slot);
    }

    /// Removes the first slot holding or wrapping `listener`.
    pub(crate) fn remove_listener(&mut self, event: &str, listener: &Listener<P>) -> bool {
        self.remove_first(event, |slot| slot.matches(listener))
    }

    /// Removes the slot with the given id.
    pub(crate) fn remove_slot(&mut self, event: &str, id: SlotId) -> bool {
        self.remove_first(event, |slot| slot.id == id)
    }

    fn remove_first(&mut self, event: &str, pred: impl Fn(&Slot<Listener<P>>) -> bool) -> bool {
        let Some(seq) = self.slots.get_mut(event) else {
            return false;
        };
        let Some(index) = seq.iter().position(pred) else {
            return false;
        };
        seq.remove(index);

        if seq.is_empty() {
            self.event_count -= 1;
            if self.event_count == 0 {
                self.slots = HashMap::new();
            } else {
                self.slots.remove(event);
            }
        }
        true
    }

    /// Drops the whole sequence for `event`; returns how many slots it held.
    pub(crate) fn clear_event(&mut self, event: &str) -> usize {
        match self.slots.remove(event) {
            Some(seq) => {
                self.event_count -= 1;
                seq.len()
            }
            None => 0,
        }
    }

    /// Resets to the empty initial state.
    pub(crate) fn clear(&mut self) {
        self.slots = HashMap::new();
        self.event_count = 0;
    }

    /// Callables registered for `event`, in registration order.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<Listener<P>> {
        self.slots
            .get(event)
            .map(|seq| seq.iter().map(|slot| slot.callable.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn len(&self, event: &str) -> usize {
        self.slots.get(event).map_or(0, Vec::len)
    }

    pub(crate) fn event_count(&self) -> usize {
        self.event_count
    }

    /// Registered event types, sorted.
    pub(crate) fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
