//! # Component - lifecycle unit and broadcast origin.
//!
//! A [`Component`] is created by the registry at registration time and owns:
//! - its [`ComponentId`] (unique for as long as it stays registered),
//! - the opaque document [`Region`](crate::discovery::Region) it is bound to,
//! - its lifecycle state,
//! - its attached mediators, in attachment order,
//! - its (possibly decorated) [`Behavior`].
//!
//! ## Lifecycle
//! ```text
//! register_component() ──► Registered ──start()──► Started ──stop()──► Stopped
//!
//! start():
//!   ├─► behavior.on_start(cx, ready)        (default: resolve immediately)
//!   └─► ready resolved ──► cx.ready(..)     (join the readiness barrier)
//!         └─► barrier releases ──► behavior.after_start(cx)
//! ```
//! There is no restart transition; a stopped component stays registered (and
//! keeps its mediator links) until it is explicitly unregistered.
//!
//! ## Broadcast
//! [`Component::fire`] turns a state change into per-mediator notifications:
//! an `"on*"` phase carrying a completion continuation, then an `"after*"`
//! phase once the default action has had its chance to run. Any peer may veto
//! the `"on*"` phase; the vetoing peer then owns the completion and resolves
//! it later, from ordinary control flow.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, error, warn};

use crate::components::{Behavior, Continuation, Payload, Reply};
use crate::core::Context;
use crate::discovery::Region;
use crate::error::Error;
use crate::mediators::{Mediate, MediatorId};

/// Opaque component identifier.
///
/// Issued from a monotonically increasing per-registry counter, so an id is
/// never reused while its component is registered (nor, in practice, after).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Component lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created and held by the registry; hooks have not run.
    Registered,
    /// The start transition has run (its hook may still be in flight).
    Started,
    /// Region resources released; still registered until unregistration.
    Stopped,
}

/// Shared handle to a component.
///
/// This is what the registry table, mediator memberships, and user code all
/// hold; cloning is cheap.
pub type ComponentRef = Rc<Component>;

/// Lifecycle-managed unit attached to one document region.
pub struct Component {
    id: ComponentId,
    type_name: String,
    region: Rc<dyn Region>,
    state: Cell<Lifecycle>,
    mediators: RefCell<IndexMap<MediatorId, Rc<dyn Mediate>>>,
    behavior: Rc<dyn Behavior>,
    cx: Context,
}

impl Component {
    pub(crate) fn new(
        id: ComponentId,
        type_name: String,
        region: Rc<dyn Region>,
        behavior: Rc<dyn Behavior>,
        cx: Context,
    ) -> Self {
        Self {
            id,
            type_name,
            region,
            state: Cell::new(Lifecycle::Registered),
            mediators: RefCell::new(IndexMap::new()),
            behavior,
            cx,
        }
    }

    /// Returns the component's id.
    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the component's type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> Lifecycle {
        self.state.get()
    }

    /// Returns the per-application context facade.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.cx
    }

    /// Runs the start transition: Registered → Started.
    ///
    /// Invokes the behavior's start hook with a single-shot continuation;
    /// resolution joins the readiness barrier, and barrier release invokes
    /// the after hook. Starting a component that is not in `Registered`
    /// state is a logged no-op (there is no restart transition).
    pub(crate) fn start(self: &Rc<Self>) {
        if self.state.get() != Lifecycle::Registered {
            debug!(id = %self.id, state = ?self.state.get(), "start skipped");
            return;
        }
        self.state.set(Lifecycle::Started);
        debug!(id = %self.id, type_name = %self.type_name, "component started");

        let me = Rc::clone(self);
        let ready = Continuation::new(move || {
            let after = Rc::clone(&me);
            let outcome = me.cx.ready(Box::new(move || {
                after.behavior.after_start(&after.cx);
            }));
            if let Err(err) = outcome {
                warn!(id = %me.id, error = %err, "after hook dropped");
            }
        });
        self.behavior.on_start(&self.cx, &ready);
    }

    /// Runs the stop transition: releases region-scoped resources.
    ///
    /// The behavior's stop hook runs first, then the region collaborator
    /// tears down its bindings. Registry and mediator state are deliberately
    /// untouched; the component stays registered until explicitly
    /// unregistered.
    pub(crate) fn stop(&self) {
        if self.state.get() == Lifecycle::Stopped {
            debug!(id = %self.id, "stop skipped, already stopped");
            return;
        }
        self.behavior.on_stop(&self.cx);
        self.region.release();
        self.state.set(Lifecycle::Stopped);
        debug!(id = %self.id, type_name = %self.type_name, "component stopped");
    }

    /// Broadcasts a state change through every attached mediator.
    ///
    /// For each mediator, in attachment order:
    /// 1. notify `"on" + Capitalize(state)` with the payload and a
    ///    completion continuation;
    /// 2. if no member vetoed, resolve the completion immediately and
    ///    synchronously — it runs the default action (at most once per
    ///    `fire`, across all mediators) and then notifies
    ///    `"after" + Capitalize(state)`;
    /// 3. if a member vetoed, the completion is *not* resolved here; the
    ///    vetoing peer owns that obligation.
    ///
    /// With no attached mediators the default action runs immediately and no
    /// notification is performed. A handler error aborts the broadcast
    /// fail-fast and is returned to the caller.
    pub fn fire(
        self: &Rc<Self>,
        state: &str,
        payload: Payload,
        default_action: Option<Box<dyn FnOnce()>>,
    ) -> Result<(), Error> {
        let mediators: Vec<Rc<dyn Mediate>> = self.mediators.borrow().values().cloned().collect();

        if mediators.is_empty() {
            if let Some(action) = default_action {
                action();
            }
            return Ok(());
        }

        let on_event = format!("on{}", capitalize(state));
        let after_event = format!("after{}", capitalize(state));

        // One shot across every mediator's completion.
        let action = Rc::new(RefCell::new(default_action));

        for mediator in mediators {
            let completion = {
                let action = Rc::clone(&action);
                let mediator = Rc::clone(&mediator);
                let cx = self.cx.clone();
                let after_event = after_event.clone();
                let payload = payload.clone();
                let origin = self.id;
                Continuation::new(move || {
                    let pending = action.borrow_mut().take();
                    if let Some(pending) = pending {
                        pending();
                    }
                    // No caller remains once a deferred completion resolves;
                    // an after-phase failure can only be reported here.
                    if let Err(err) = mediator.notify(&cx, origin, &after_event, &payload, None) {
                        error!(
                            mediator = %mediator.id(),
                            event = %after_event,
                            error = %err,
                            "after notification failed"
                        );
                    }
                })
            };

            let proceed = mediator.notify(&self.cx, self.id, &on_event, &payload, Some(&completion))?;
            if proceed {
                completion.resolve();
            }
        }

        Ok(())
    }

    /// Attaches a mediator, keyed by its identifier. Attachment order is
    /// preserved and is the notification order used by [`Component::fire`].
    pub fn attach_mediator(&self, mediator: Rc<dyn Mediate>) {
        self.mediators
            .borrow_mut()
            .insert(mediator.id().clone(), mediator);
    }

    /// Detaches the mediator with the given identifier, if attached.
    pub fn detach_mediator(&self, id: &MediatorId) {
        self.mediators.borrow_mut().shift_remove(id);
    }

    /// Returns the attached mediators, in attachment order.
    pub(crate) fn attached_mediators(&self) -> Vec<Rc<dyn Mediate>> {
        self.mediators.borrow().values().cloned().collect()
    }

    /// Clears the attached-mediator map.
    pub(crate) fn detach_all_mediators(&self) {
        self.mediators.borrow_mut().clear();
    }

    /// Dispatches one notification into the behavior chain.
    pub(crate) fn dispatch(
        &self,
        cx: &Context,
        event: &str,
        payload: &Payload,
        completion: Option<&Continuation>,
    ) -> Result<Reply, Error> {
        self.behavior.handle(cx, event, payload, completion)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("state", &self.state.get())
            .field("mediators", &self.mediators.borrow().len())
            .finish()
    }
}

/// Uppercases the first character of a state name (`slideChange` →
/// `SlideChange`), so that `fire("slideChange", ..)` dispatches
/// `onSlideChange` / `afterSlideChange`.
fn capitalize(state: &str) -> String {
    let mut chars = state.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
