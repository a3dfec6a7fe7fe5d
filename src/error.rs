//! Error types used by the emitter and by listeners.
//!
//! This module defines two error enums:
//!
//! - [`EmitterError`] — errors raised by the emitter itself (pipe management).
//! - [`ListenerError`] — failures reported by listeners, surfaced by `emit` and `emit_async`.
//!
//! Both types provide `as_label` for logs and `as_message` for human-readable output.

use thiserror::Error;

/// # Errors produced by emitter bookkeeping.
///
/// Registration, removal and emission with no listeners never fail; only the
/// forwarding relationships managed by [`Emitter::pipe`](crate::Emitter::pipe)
/// and [`Emitter::unpipe`](crate::Emitter::unpipe) can be rejected.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// A pipe to the same target emitter already exists.
    #[error("already piped to the same emitter")]
    AlreadyPiped,

    /// The emitter has no pipes at all.
    #[error("not piped to any other emitter")]
    NotPiped,

    /// The emitter has pipes, but none to the given target.
    #[error("not piped to the given emitter")]
    NotPipedTo,
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use relay_emitter::EmitterError;
    ///
    /// assert_eq!(EmitterError::AlreadyPiped.as_label(), "emitter_already_piped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::AlreadyPiped => "emitter_already_piped",
            EmitterError::NotPiped => "emitter_not_piped",
            EmitterError::NotPipedTo => "emitter_not_piped_to_target",
        }
    }
}

/// # Errors produced by listeners.
///
/// A listener reports failure by returning one of these (directly, or as the
/// output of its pending outcome). The emitter never inspects the variant; it
/// only propagates the first failure it observes.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener rejected with a message.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Spawned listener work panicked.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// Spawned listener work was cancelled before it settled (runtime shutdown).
    #[error("listener aborted")]
    Aborted,
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`].
    ///
    /// ```
    /// use relay_emitter::ListenerError;
    ///
    /// let err = ListenerError::fail("boom");
    /// assert_eq!(err.to_string(), "listener failed: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
            ListenerError::Aborted => "listener_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
            ListenerError::Aborted => "aborted".to_string(),
        }
    }
}
