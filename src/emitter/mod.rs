//! The emitter: registries, emission engine and pipes behind one handle.
//!
//! Internal modules:
//! - [`emitter`]: handle type, registration, removal and introspection;
//! - [`emit`]: synchronous and deferred dispatch;
//! - [`pipe`]: forwarding relationships between emitters;
//! - [`config`] / [`builder`]: per-instance settings.

mod builder;
mod config;
mod emit;
#[allow(clippy::module_inception)]
mod emitter;
mod pipe;

pub use builder::EmitterBuilder;
pub use config::EmitterConfig;
pub use emit::EmitMode;
pub use emitter::{Emitter, EventEmitter};
