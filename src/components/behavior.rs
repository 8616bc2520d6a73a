//! # Component behavior trait.
//!
//! [`Behavior`] is the extension point for concrete components: lifecycle
//! hooks plus a single string-keyed handler entry for mediator
//! notifications. Every method has a default, so a behavior only overrides
//! what it cares about — a component with no start hook proceeds straight to
//! the after-phase, and a component with no handler for an event simply is
//! not notified in any observable way.
//!
//! ## Veto / defer protocol
//! A handler for an `"on*"` event receives the broadcast payload and a
//! completion [`Continuation`]. Returning [`Reply::Veto`] tells the mediator
//! that the origin's default action must not run yet; the vetoing handler
//! now *owns* the completion and is obliged to resolve it later. Returning
//! [`Reply::Proceed`] (or [`Reply::Unhandled`]) leaves the decision to the
//! other members.
//!
//! ## Example
//! ```
//! use componentry::{Behavior, Context, Continuation, Error, Payload, Reply};
//!
//! struct Thumbnails;
//!
//! impl Behavior for Thumbnails {
//!     fn handle(
//!         &self,
//!         _cx: &Context,
//!         event: &str,
//!         payload: &Payload,
//!         _completion: Option<&Continuation>,
//!     ) -> Result<Reply, Error> {
//!         match event {
//!             "onSlideChange" => {
//!                 let _index = payload.get("index");
//!                 // highlight the matching thumbnail...
//!                 Ok(Reply::Proceed)
//!             }
//!             _ => Ok(Reply::Unhandled),
//!         }
//!     }
//! }
//! ```

use crate::components::Continuation;
use crate::core::Context;
use crate::error::Error;

/// Broadcast payload: an arbitrary JSON value shared by all peers.
pub type Payload = serde_json::Value;

/// Outcome of dispatching one event to one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The component implements no handler for this event.
    Unhandled,
    /// The handler ran and does not object to the default action.
    Proceed,
    /// The handler ran and defers the default action; it now owns the
    /// completion continuation and must resolve it later.
    Veto,
}

impl Reply {
    /// Returns true for [`Reply::Veto`].
    #[inline]
    pub fn is_veto(&self) -> bool {
        matches!(self, Reply::Veto)
    }
}

/// # Concrete component behavior.
///
/// Implemented by component authors and registered with the builder as a
/// factory per component type. One behavior instance backs exactly one
/// component; shared state between peers goes through mediators, never
/// through direct references.
pub trait Behavior: 'static {
    /// Start hook. The default proceeds immediately.
    ///
    /// An implementation that needs to finish asynchronous setup keeps a
    /// clone of `ready` and resolves it once done; the after-phase (and the
    /// whole-application readiness barrier) waits for it.
    fn on_start(&self, _cx: &Context, ready: &Continuation) {
        ready.resolve();
    }

    /// After hook, invoked once the readiness barrier releases — that is,
    /// once every registered component has finished its start hook.
    fn after_start(&self, _cx: &Context) {}

    /// Stop hook, invoked before the component's region resources are
    /// released. The default does nothing.
    fn on_stop(&self, _cx: &Context) {}

    /// String-keyed notification handler.
    ///
    /// `event` is the full event name (`"onSlideChange"`,
    /// `"afterSlideChange"`, ...). `completion` is present for `"on*"`
    /// notifications only. Return [`Reply::Unhandled`] for events this
    /// behavior does not care about; errors abort the broadcast fail-fast.
    fn handle(
        &self,
        _cx: &Context,
        _event: &str,
        _payload: &Payload,
        _completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        Ok(Reply::Unhandled)
    }
}
