//! # Context facade.
//!
//! The context is the only way a component reaches the registry, mediators,
//! the readiness barrier, or configuration. One facade serves the whole
//! application; it is injected into every component at registration time.
//!
//! The facade holds the registry weakly. Components own a context, the
//! registry owns the components; a strong back-reference would leak the
//! whole application. Calls made after the registry has been dropped fail
//! with [`Error::RegistryGone`](crate::Error::RegistryGone).

use std::rc::{Rc, Weak};

use crate::components::{ComponentId, ComponentRef};
use crate::core::registry::RegistryInner;
use crate::core::Config;
use crate::discovery::Region;
use crate::error::Error;
use crate::mediators::MediatorId;

/// Per-application facade injected into every component.
#[derive(Clone)]
pub struct Context {
    registry: Weak<RegistryInner>,
}

impl Context {
    pub(crate) fn from_inner(registry: Weak<RegistryInner>) -> Self {
        Self { registry }
    }

    fn registry(&self) -> Result<Rc<RegistryInner>, Error> {
        self.registry.upgrade().ok_or(Error::RegistryGone)
    }

    /// Discovers, registers, and starts all components under `root`,
    /// returning the new components.
    pub fn add_components(&self, root: &Rc<dyn Region>) -> Result<Vec<ComponentRef>, Error> {
        self.registry()?.add_components(root)
    }

    /// Stops and unregisters the given components.
    pub fn remove_components(&self, components: &[ComponentRef]) -> Result<(), Error> {
        let registry = self.registry()?;
        registry.stop(components);
        registry.unregister(components);
        Ok(())
    }

    /// Subscribes a component to a mediator ref.
    ///
    /// A no-op for an empty ref; otherwise delegates to the registry's
    /// mediator-link registration.
    pub fn subscribe(&self, spec: &str, component: &ComponentRef) -> Result<(), Error> {
        if spec.is_empty() {
            return Ok(());
        }
        self.registry()?.register_mediator_link(spec, component)
    }

    /// Unsubscribes a component from a mediator. Mirrors
    /// [`subscribe`](Context::subscribe); a no-op when no such mediator is
    /// live.
    pub fn unsubscribe(&self, id: &MediatorId, component: &ComponentRef) -> Result<(), Error> {
        self.registry()?.unregister_mediator_link(id, component);
        Ok(())
    }

    /// Looks up a registered component by id.
    pub fn lookup_component(&self, id: ComponentId) -> Result<ComponentRef, Error> {
        self.registry()?.lookup_component(id)
    }

    /// Returns the application configuration store.
    pub fn config(&self) -> Result<Config, Error> {
        Ok(self.registry()?.config())
    }

    /// Returns the configuration parameter with the given literal name.
    pub fn config_param(&self, name: &str) -> Result<serde_json::Value, Error> {
        self.registry()?.config().param(name)
    }

    /// Signals that the calling component is fully initialized and queues
    /// `callback` for the after-phase. The barrier releases every queued
    /// callback once all registered components have signaled.
    pub fn ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), Error> {
        self.registry()?.ready(callback);
        Ok(())
    }
}
