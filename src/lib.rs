//! # relay-emitter
//!
//! **relay-emitter** is an in-process event emitter for Rust.
//!
//! Callers register listeners for named event types or for every event, then
//! deliver payloads either synchronously or through deferred values (futures)
//! in parallel or in series. Emitters can forward everything they see to other
//! emitters under an optional namespace.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   on / once / off           on_any / once_any / off_any        pipe / unpipe
//!        │                              │                             │
//!        ▼                              ▼                             ▼
//! ┌────────────────┐          ┌───────────────────┐          ┌────────────────┐
//! │ TypedRegistry  │          │   AnyRegistry     │◄─────────│  PipeRecords   │
//! │ type → [slots] │          │ [slots] or absent │ forwarder│ (weak targets) │
//! └───────┬────────┘          └─────────┬─────────┘          └────────────────┘
//!         │        snapshot             │ snapshot
//!         └──────────────┬──────────────┘
//!                        ▼
//!              ┌────────────────────┐        ┌─────────────────────────┐
//!              │  Emission engine   │───────►│ DeferredFactory         │
//!              │ emit / emit_async  │        │ (instance or global)    │
//!              └────────────────────┘        │ TokioDeferred (default) │
//!                                            │ InlineDeferred          │
//!                                            └─────────────────────────┘
//! ```
//!
//! ### Dispatch
//! ```text
//! emit(type, p)                   any-listeners(type, p) ─► type-listeners(p)
//! emit_async(type, p, Parallel)   type-listeners(p) + any-listeners(type, p) ─► all(..)
//! emit_async(type, p, Series)     type-listeners(p) ─► any-listeners(type, p), one by one
//! ```
//!
//! ## Features
//! | Area                  | Description                                              | Key types / functions                       |
//! |-----------------------|----------------------------------------------------------|---------------------------------------------|
//! | **Emitter**           | Registration, removal, sync + deferred dispatch, piping  | [`Emitter`], [`EmitMode`]                   |
//! | **Listeners**         | Identity-compared callables and their outcomes           | [`Listener`], [`AnyListener`], [`Outcome`]  |
//! | **Handles**           | Struct-based async listeners                             | [`Handle`]                                  |
//! | **Deferred values**   | Swappable combinators used by `emit_async`               | [`DeferredFactory`], [`set_deferred_factory`] |
//! | **Errors**            | Typed errors for pipes and listeners                     | [`EmitterError`], [`ListenerError`]         |
//! | **Configuration**     | Per-emitter name and factory override                    | [`EmitterConfig`], [`EmitterBuilder`]       |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a catch-all listener that records every
//!   emission via `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use relay_emitter::{AnyListener, Emitter, EmitMode, Listener, Outcome};
//!
//! #[derive(Debug, Clone)]
//! struct Order {
//!     id: u64,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orders: Emitter<Order> = Emitter::builder().name("orders").build();
//!     let audit: Emitter<Order> = Emitter::new();
//!
//!     orders.on("created", Listener::new(|order: &Order| {
//!         println!("created #{}", order.id);
//!     }));
//!     orders.on("created", Listener::new(|order: &Order| {
//!         let id = order.id;
//!         Outcome::pending(async move {
//!             tokio::time::sleep(Duration::from_millis(5)).await;
//!             println!("persisted #{id}");
//!             Ok(())
//!         })
//!     }));
//!
//!     audit.on_any(AnyListener::new(|event: &str, order: &Order| {
//!         println!("audit {event} #{}", order.id);
//!     }));
//!     orders.pipe(&audit, "orders")?;
//!
//!     orders.emit("created", &Order { id: 1 })?;
//!     orders.emit_async("created", Order { id: 2 }, EmitMode::Series).await?;
//!     Ok(())
//! }
//! ```
mod deferred;
mod emitter;
mod error;
mod listeners;
mod registry;

// ---- Public re-exports ----

pub use deferred::{
    Deferred, DeferredFactory, InlineDeferred, TokioDeferred, deferred_factory,
    reset_deferred_factory, set_deferred_factory,
};
pub use emitter::{EmitMode, Emitter, EmitterBuilder, EmitterConfig, EventEmitter};
pub use error::{EmitterError, ListenerError};
pub use listeners::{AnyListener, Handle, Listener, Outcome};

// Optional: expose a catch-all listener that logs every emission.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
