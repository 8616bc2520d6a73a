//! # Mediator trait.
//!
//! [`Mediate`] is the extension point for mediator types. The default
//! implementation is [`Broadcast`](crate::mediators::Broadcast); custom
//! types registered with the builder can specialize `notify` (for example a
//! master/slave mediator that routes events asymmetrically) while keeping
//! the membership contract.
//!
//! ## Rules
//! - Membership must contain only currently attached components; removal is
//!   exact and immediate.
//! - `notify` must snapshot membership before dispatching, so a handler may
//!   safely mutate the set mid-notification (for example by unregistering
//!   its own component).
//! - A veto never short-circuits notification of the remaining members; a
//!   handler error does (fail-fast, documented trade-off).

use crate::components::{ComponentId, ComponentRef, Continuation, Payload};
use crate::core::Context;
use crate::error::Error;
use crate::mediators::MediatorId;

/// # Named hub broadcasting state changes among member components.
pub trait Mediate: 'static {
    /// Returns this mediator's identifier.
    fn id(&self) -> &MediatorId;

    /// Adds a member, keyed by component id.
    fn register_component(&self, component: &ComponentRef);

    /// Removes the member with the given id, if present.
    fn unregister_component(&self, id: ComponentId);

    /// Notifies every member other than `origin` about a state change.
    ///
    /// Returns `Ok(true)` when the origin's default action may proceed, and
    /// `Ok(false)` when at least one member vetoed — in which case the
    /// vetoing member has taken ownership of `completion` and will resolve
    /// it later. Errors from a member handler escape immediately and abort
    /// notification of the remaining members.
    fn notify(
        &self,
        cx: &Context,
        origin: ComponentId,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<bool, Error>;
}
