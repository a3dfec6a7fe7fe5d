//! # Listener handles and their outcomes
//!
//! A listener is a shared callable wrapped in an [`Arc`]. Two handles are the
//! *same* listener when they point at the same allocation; that identity is what
//! [`Emitter::off`](crate::Emitter::off) and
//! [`Emitter::off_any`](crate::Emitter::off_any) match on.
//!
//! - [`Listener`]: registered against one event type, called with `(payload)`.
//! - [`AnyListener`]: registered against every event, called with `(type, payload)`.
//!
//! Both return an [`Outcome`]: either an already-settled result or a pending
//! [`Deferred`] that the emitter awaits in `emit_async`.
//!
//! ## Example
//! ```rust
//! use relay_emitter::{Emitter, Listener, ListenerError, Outcome};
//!
//! let emitter: Emitter<u32> = Emitter::new();
//! let double = Listener::new(|n: &u32| println!("{}", n * 2));
//! let checked = Listener::new(|n: &u32| {
//!     if *n > 10 {
//!         Outcome::err(ListenerError::fail("too large"))
//!     } else {
//!         Outcome::ok()
//!     }
//! });
//!
//! emitter.on("number", double.clone());
//! emitter.on("number", checked);
//! assert!(emitter.emit("number", &3).is_ok());
//! assert!(emitter.emit("number", &30).is_err());
//!
//! emitter.off("number", &double);
//! assert_eq!(emitter.listeners("number").len(), 1);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::deferred::{Deferred, DeferredFactory};
use crate::error::ListenerError;

/// Result of invoking a listener.
pub enum Outcome {
    /// Listener finished synchronously.
    Ready(Result<(), ListenerError>),
    /// Listener started asynchronous work that settles later.
    Pending(Deferred),
}

impl Outcome {
    /// Successful, already-settled outcome.
    #[inline]
    pub fn ok() -> Self {
        Outcome::Ready(Ok(()))
    }

    /// Failed, already-settled outcome.
    #[inline]
    pub fn err(error: ListenerError) -> Self {
        Outcome::Ready(Err(error))
    }

    /// Wraps a future into a pending outcome.
    #[inline]
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = Result<(), ListenerError>> + Send + 'static,
    {
        Outcome::Pending(Box::pin(fut))
    }

    /// True if the outcome is still pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Converts the outcome into a deferred using `factory` for settled values.
    pub(crate) fn into_deferred(self, factory: &dyn DeferredFactory) -> Deferred {
        match self {
            Outcome::Ready(result) => factory.settled(result),
            Outcome::Pending(deferred) => deferred,
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::ok()
    }
}

impl From<Result<(), ListenerError>> for Outcome {
    fn from(result: Result<(), ListenerError>) -> Self {
        Outcome::Ready(result)
    }
}

impl From<Deferred> for Outcome {
    fn from(deferred: Deferred) -> Self {
        Outcome::Pending(deferred)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Identity comparison shared by both listener kinds.
pub(crate) trait SameListener {
    fn same(&self, other: &Self) -> bool;
}

type ListenerFn<P> = dyn Fn(&P) -> Outcome + Send + Sync;
type AnyListenerFn<P> = dyn Fn(&str, &P) -> Outcome + Send + Sync;

/// Listener for a single event type.
///
/// Cloning is cheap and preserves identity: a clone can be used to remove the
/// registration made with the original.
pub struct Listener<P> {
    f: Arc<ListenerFn<P>>,
}

impl<P> Listener<P> {
    /// Creates a listener from a closure.
    ///
    /// The closure may return `()`, `Result<(), ListenerError>`, a [`Deferred`]
    /// or an [`Outcome`].
    pub fn new<F, O>(f: F) -> Self
    where
        P: 'static,
        F: Fn(&P) -> O + Send + Sync + 'static,
        O: Into<Outcome> + 'static,
    {
        Self {
            f: Arc::new(move |payload: &P| f(payload).into()),
        }
    }

    /// Invokes the listener.
    #[inline]
    pub fn call(&self, payload: &P) -> Outcome {
        (self.f)(payload)
    }

    /// True if both handles refer to the same listener.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<P> SameListener for Listener<P> {
    fn same(&self, other: &Self) -> bool {
        Listener::same(self, other)
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

/// Listener invoked for every event, receiving the event type alongside the payload.
pub struct AnyListener<P> {
    f: Arc<AnyListenerFn<P>>,
}

impl<P> AnyListener<P> {
    /// Creates an any-listener from a closure.
    pub fn new<F, O>(f: F) -> Self
    where
        P: 'static,
        F: Fn(&str, &P) -> O + Send + Sync + 'static,
        O: Into<Outcome> + 'static,
    {
        Self {
            f: Arc::new(move |event: &str, payload: &P| f(event, payload).into()),
        }
    }

    /// Invokes the listener.
    #[inline]
    pub fn call(&self, event: &str, payload: &P) -> Outcome {
        (self.f)(event, payload)
    }

    /// True if both handles refer to the same listener.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<P> SameListener for AnyListener<P> {
    fn same(&self, other: &Self) -> bool {
        AnyListener::same(self, other)
    }
}

impl<P> Clone for AnyListener<P> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<P> fmt::Debug for AnyListener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyListener")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn clones_share_identity() {
        let a = Listener::new(|_: &u8| ());
        let b = a.clone();
        let c = Listener::new(|_: &u8| ());

        assert!(a.same(&b));
        assert!(!a.same(&c));
    }

    #[test]
    fn closure_return_types_convert() {
        let unit = Listener::new(|_: &u8| ());
        let failing = Listener::new(|_: &u8| -> Result<(), ListenerError> {
            Err(ListenerError::fail("nope"))
        });
        let pending = Listener::new(|_: &u8| Outcome::pending(async { Ok(()) }));

        assert!(matches!(unit.call(&0), Outcome::Ready(Ok(()))));
        assert!(matches!(failing.call(&0), Outcome::Ready(Err(_))));
        assert!(pending.call(&0).is_pending());
    }

    #[test]
    fn any_listener_receives_event_type() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let any = AnyListener::new(move |event: &str, payload: &usize| {
            assert_eq!(event, "tick");
            h.fetch_add(*payload, Ordering::SeqCst);
        });

        let _ = any.call("tick", &3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
