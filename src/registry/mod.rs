//! Listener bookkeeping: per-type registry and the catch-all list.
//!
//! Both containers store [`Slot`]s (callable + optional wrapped original) in
//! registration order and hand out snapshots of the callables for dispatch, so
//! listeners may register or remove listeners while being invoked.

mod any;
mod slot;
mod typed;

pub(crate) use any::AnyRegistry;
pub(crate) use slot::{Slot, SlotId};
pub(crate) use typed::TypedRegistry;
