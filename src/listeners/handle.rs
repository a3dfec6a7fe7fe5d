//! # Struct-based listeners
//!
//! [`Handle`] is the extension point for listeners that carry their own state
//! and want to run asynchronous work without building an [`Outcome`] by hand.
//! [`Listener::from_handle`] adapts a handle into a regular [`Listener`]; every
//! invocation clones the payload into a pending outcome, so the handle's
//! `on_event` runs when the emitter awaits it.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use relay_emitter::{Emitter, EmitMode, Handle, Listener, ListenerError};
//!
//! #[derive(Default)]
//! struct Totals {
//!     sum: AtomicU64,
//! }
//!
//! #[async_trait]
//! impl Handle<u64> for Totals {
//!     async fn on_event(&self, amount: &u64) -> Result<(), ListenerError> {
//!         self.sum.fetch_add(*amount, Ordering::Relaxed);
//!         Ok(())
//!     }
//!     fn name(&self) -> &'static str { "totals" }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let totals = Arc::new(Totals::default());
//! let emitter: Emitter<u64> = Emitter::new();
//! emitter.on("deposit", Listener::from_handle(Arc::clone(&totals)));
//!
//! emitter.emit_async("deposit", 40, EmitMode::Series).await.unwrap();
//! assert_eq!(totals.sum.load(Ordering::Relaxed), 40);
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::{Listener, Outcome};

/// Contract for struct-based listeners.
#[async_trait]
pub trait Handle<P>: Send + Sync + 'static
where
    P: Send + Sync + 'static,
{
    /// Handle a single emission.
    async fn on_event(&self, payload: &P) -> Result<(), ListenerError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<P> Listener<P>
where
    P: Clone + Send + Sync + 'static,
{
    /// Adapts a [`Handle`] into a listener.
    ///
    /// Each call returns a pending outcome owning a clone of the payload. Under
    /// a synchronous [`emit`](crate::Emitter::emit) that work is detached.
    pub fn from_handle<H>(handle: Arc<H>) -> Self
    where
        H: Handle<P>,
    {
        Listener::new(move |payload: &P| {
            let handle = Arc::clone(&handle);
            let payload = payload.clone();
            Outcome::pending(async move {
                let result = handle.on_event(&payload).await;
                if let Err(err) = &result {
                    tracing::trace!(handle = handle.name(), error = %err, "handle rejected");
                }
                result
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Handle<String> for Recorder {
        async fn on_event(&self, payload: &String) -> Result<(), ListenerError> {
            if payload == "bad" {
                return Err(ListenerError::fail("bad payload"));
            }
            self.seen.lock().push(payload.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn handle_runs_when_awaited() {
        let rec = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let listener = Listener::from_handle(Arc::clone(&rec));

        let outcome = listener.call(&"hello".to_string());
        assert!(outcome.is_pending());
        assert!(rec.seen.lock().is_empty());

        match outcome {
            Outcome::Pending(fut) => fut.await.unwrap(),
            Outcome::Ready(_) => unreachable!(),
        }
        assert_eq!(*rec.seen.lock(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn handle_error_surfaces() {
        let rec = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let listener = Listener::from_handle(rec);

        let Outcome::Pending(fut) = listener.call(&"bad".to_string()) else {
            panic!("expected pending outcome");
        };
        assert_eq!(fut.await, Err(ListenerError::fail("bad payload")));
    }

    #[test]
    fn default_name_is_type_name() {
        let rec = Recorder {
            seen: Mutex::new(Vec::new()),
        };
        assert!(Handle::<String>::name(&rec).ends_with("Recorder"));
    }
}
