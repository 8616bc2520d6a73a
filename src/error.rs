//! Error types used by the componentry runtime.
//!
//! The crate exposes a single [`Error`] enum. Lookup failures (unknown
//! component id, unknown config parameter, unknown mediator type) are
//! propagated synchronously to the caller; there is no retry machinery.
//!
//! Note that an unknown *skin* name is deliberately not an error: decoration
//! with a missing skin is a no-op that returns the original behavior, so a
//! page keeps rendering even when a skin script is absent.

use thiserror::Error;

use crate::components::ComponentId;

/// # Errors produced by the componentry runtime.
///
/// Provides [`as_label`](Error::as_label) for short stable labels suitable
/// for logs and metrics.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// No component with the given id is currently registered.
    #[error("component {id} is not registered")]
    ComponentNotFound {
        /// The id that was looked up.
        id: ComponentId,
    },

    /// The named configuration parameter does not exist.
    #[error("config param '{name}' does not exist")]
    ConfigParamNotFound {
        /// The parameter name that was requested.
        name: String,
    },

    /// A mediator ref named a mediator type with no registered factory.
    #[error("mediator type '{type_name}' is not registered")]
    MediatorTypeNotFound {
        /// The unknown type tag.
        type_name: String,
    },

    /// A mediator ref could not be parsed (`id` or `type-id` expected).
    #[error("mediator ref '{spec}' is malformed")]
    MalformedMediatorRef {
        /// The offending ref string.
        spec: String,
    },

    /// A component handler failed while processing a notification.
    ///
    /// Propagation is fail-fast: the error escapes `notify` and aborts
    /// further peer notification for that broadcast.
    #[error("handler '{event}' failed: {reason}")]
    Handler {
        /// The event name that was being dispatched.
        event: String,
        /// The underlying failure message.
        reason: String,
    },

    /// The owning registry has been dropped; the context facade is dangling.
    #[error("application registry has been dropped")]
    RegistryGone,

    /// The configuration store was built from an unusable value.
    #[error("configuration error: {reason}")]
    Config {
        /// The underlying failure message.
        reason: String,
    },
}

impl Error {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use componentry::Error;
    ///
    /// let err = Error::ConfigParamNotFound { name: "theme".into() };
    /// assert_eq!(err.as_label(), "config_param_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::ComponentNotFound { .. } => "component_not_found",
            Error::ConfigParamNotFound { .. } => "config_param_not_found",
            Error::MediatorTypeNotFound { .. } => "mediator_type_not_found",
            Error::MalformedMediatorRef { .. } => "malformed_mediator_ref",
            Error::Handler { .. } => "handler_failed",
            Error::RegistryGone => "registry_gone",
            Error::Config { .. } => "config_error",
        }
    }

    /// Shorthand for an [`Error::Handler`] value.
    ///
    /// Intended for user handlers that need to abort a broadcast:
    /// ```
    /// use componentry::Error;
    ///
    /// let err = Error::handler("onSlideChange", "gallery not hydrated");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn handler(event: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Handler {
            event: event.into(),
            reason: reason.into(),
        }
    }
}
