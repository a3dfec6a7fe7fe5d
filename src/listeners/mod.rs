//! # Listener handles for the emitter.
//!
//! This module provides the callables the emitter stores and invokes:
//! - [`Listener`] - bound to one event type, called with the payload;
//! - [`AnyListener`] - bound to every event, called with the type and the payload;
//! - [`Outcome`] - what a listener returns (settled result or pending work);
//! - [`Handle`] - trait for struct-based asynchronous listeners.
//!
//! ## Identity
//! Listeners are compared by pointer identity of their shared callable, never by
//! value. Keep a clone of the handle you registered if you plan to remove it.

mod handle;
mod listener;
#[cfg(feature = "logging")]
mod log;

pub use handle::Handle;
pub use listener::{AnyListener, Listener, Outcome};
#[cfg(feature = "logging")]
pub use log::LogWriter;

pub(crate) use listener::SameListener;
