//! # LogWriter — emission recorder
//!
//! A minimal catch-all listener that records every emission through
//! `tracing::info!`. Attach it with [`Emitter::on_any`](crate::Emitter::on_any)
//! to see what flows through an emitter; install any `tracing` subscriber to
//! print the records.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO relay_emitter::listeners::log: emitted emitter="orders" event="created" payload=Order { id: 7 }
//! INFO relay_emitter::listeners::log: emitted emitter="orders" event="shipped" payload=Order { id: 7 }
//! ```

use std::borrow::Cow;
use std::fmt::Debug;

use crate::listeners::AnyListener;

/// Emission writer.
#[derive(Debug, Clone)]
pub struct LogWriter {
    label: Cow<'static, str>,
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("emitter")
    }
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagging every record with `label`.
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Label attached to every record.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Turns the writer into an any-listener.
    pub fn into_listener<P>(self) -> AnyListener<P>
    where
        P: Debug + Send + Sync + 'static,
    {
        AnyListener::new(move |event: &str, payload: &P| {
            tracing::info!(emitter = %self.label, event, payload = ?payload, "emitted");
        })
    }
}
