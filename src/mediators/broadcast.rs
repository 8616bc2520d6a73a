//! # Broadcast - the default mediator.
//!
//! Notifies every member except the origin, in registration order, and
//! aggregates veto replies. Members are held weakly: the strong reference
//! lives in the registry's component table, so a component dropped by the
//! registry can never be notified again even if a stale membership entry
//! survives.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::components::{Component, ComponentId, ComponentRef, Continuation, Payload};
use crate::core::Context;
use crate::error::Error;
use crate::mediators::{Mediate, MediatorId};

/// Generic broadcast mediator with veto aggregation.
pub struct Broadcast {
    id: MediatorId,
    members: RefCell<IndexMap<ComponentId, Weak<Component>>>,
}

impl Broadcast {
    /// Creates an empty broadcast mediator with the given identifier.
    pub fn new(id: MediatorId) -> Self {
        Self {
            id,
            members: RefCell::new(IndexMap::new()),
        }
    }

    /// Returns the number of live members.
    pub fn len(&self) -> usize {
        self.members
            .borrow()
            .values()
            .filter(|member| member.strong_count() > 0)
            .count()
    }

    /// Returns true when no live member remains.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Mediate for Broadcast {
    fn id(&self) -> &MediatorId {
        &self.id
    }

    fn register_component(&self, component: &ComponentRef) {
        self.members
            .borrow_mut()
            .insert(component.id(), Rc::downgrade(component));
    }

    fn unregister_component(&self, id: ComponentId) {
        self.members.borrow_mut().shift_remove(&id);
    }

    fn notify(
        &self,
        cx: &Context,
        origin: ComponentId,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<bool, Error> {
        // Snapshot before dispatching: a handler may mutate the membership
        // (or the registry) while this call is on the stack.
        let members: Vec<ComponentRef> = self
            .members
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .collect();

        let mut proceed = true;
        for member in members {
            if member.id() == origin {
                continue;
            }
            let reply = member.dispatch(cx, event, payload, completion)?;
            trace!(
                mediator = %self.id,
                member = %member.id(),
                event,
                reply = ?reply,
                "notified"
            );
            if reply.is_veto() {
                proceed = false;
            }
        }
        Ok(proceed)
    }
}
