//! # Component registry - per-application orchestrator.
//!
//! Owns the component table and the mediator table for one application
//! instance and implements registration, lifecycle transitions, and
//! mediator linking.
//!
//! ## Architecture
//! ```text
//! Discover::scan(root) ──► ComponentDescriptor*
//!          │
//!          ▼
//! Registry.register_component(descriptor)
//!   ├─► catalog.component(type) ──► base behavior      (unknown → None)
//!   ├─► catalog.skin(type, name) ──► decorate(..)      (unknown → no-op)
//!   ├─► components.insert(id → component)
//!   └─► register_mediator_link(ref, component)*        (unknown type → Err)
//!
//! Registry.start(..) ──► component.start() ──► barrier ──► after hooks
//! Registry.stop(..)  ──► component.stop()             (tables untouched)
//! Registry.unregister(..) ──► every mediator pruned, then table entry
//! ```
//!
//! ## Rules
//! - The registry holds the only strong component references besides user
//!   code; mediators hold members weakly.
//! - Component ids come from a monotonic counter and are never reused.
//! - `unregister_all` clears both tables directly instead of iterating.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::debug;

use crate::components::{decorate, Component, ComponentId, ComponentRef};
use crate::core::barrier::ReadyBarrier;
use crate::core::builder::{Catalog, RegistryBuilder};
use crate::core::{Config, Context};
use crate::discovery::{ComponentDescriptor, Discover, Region};
use crate::error::Error;
use crate::mediators::{Broadcast, Mediate, MediatorId, MediatorRef};

/// Owner of all components and mediators for one application instance.
///
/// Constructed once per application via [`Registry::builder`]; cloning the
/// handle is cheap and shares the same instance.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

pub(crate) struct RegistryInner {
    me: Weak<RegistryInner>,
    catalog: Catalog,
    config: Config,
    discovery: Box<dyn Discover>,
    components: RefCell<IndexMap<ComponentId, ComponentRef>>,
    mediators: RefCell<IndexMap<MediatorId, Rc<dyn Mediate>>>,
    barrier: ReadyBarrier,
    next_id: Cell<u64>,
}

impl Registry {
    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(
        catalog: Catalog,
        config: Config,
        discovery: Box<dyn Discover>,
    ) -> Self {
        let inner = Rc::new_cyclic(|me| RegistryInner {
            me: me.clone(),
            catalog,
            config,
            discovery,
            components: RefCell::new(IndexMap::new()),
            mediators: RefCell::new(IndexMap::new()),
            barrier: ReadyBarrier::new(),
            next_id: Cell::new(0),
        });
        Self { inner }
    }

    /// Returns the per-application context facade injected into components.
    pub fn context(&self) -> Context {
        self.inner.context()
    }

    /// Creates, decorates, and links one component from its descriptor.
    ///
    /// Returns `Ok(None)` when the descriptor's type has no registered
    /// factory — a soft failure mirroring markup that names a type with no
    /// implementation. A malformed or unknown-type mediator ref fails the
    /// whole registration; the half-built component is rolled back first.
    pub fn register_component(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<Option<ComponentRef>, Error> {
        self.inner.register_component(descriptor)
    }

    /// Discovers, registers, and starts all components under `root`.
    pub fn add_components(&self, root: &Rc<dyn Region>) -> Result<Vec<ComponentRef>, Error> {
        self.inner.add_components(root)
    }

    /// Starts the given components.
    pub fn start(&self, components: &[ComponentRef]) {
        for component in components {
            component.start();
        }
    }

    /// Starts every registered component.
    pub fn start_all(&self) {
        self.start(&self.inner.all_components());
    }

    /// Stops the given components. They stay registered (and keep their
    /// mediator links) until explicitly unregistered.
    pub fn stop(&self, components: &[ComponentRef]) {
        for component in components {
            component.stop();
        }
    }

    /// Stops every registered component.
    pub fn stop_all(&self) {
        self.stop(&self.inner.all_components());
    }

    /// Unregisters the given components: each is removed from every mediator
    /// it belongs to, then from the component table.
    pub fn unregister(&self, components: &[ComponentRef]) {
        for component in components {
            self.inner.unregister_one(component);
        }
    }

    /// Drops all components and all mediators at once.
    pub fn unregister_all(&self) {
        self.inner.unregister_all();
    }

    /// Parses a mediator ref and bidirectionally links component↔mediator,
    /// instantiating the mediator on first use.
    pub fn register_mediator_link(
        &self,
        spec: &str,
        component: &ComponentRef,
    ) -> Result<(), Error> {
        self.inner.register_mediator_link(spec, component)
    }

    /// Removes the component↔mediator link in both directions. A no-op when
    /// no mediator with that identifier is live.
    pub fn unregister_mediator_link(&self, id: &MediatorId, component: &ComponentRef) {
        self.inner.unregister_mediator_link(id, component);
    }

    /// Looks up a registered component by id.
    pub fn lookup_component(&self, id: ComponentId) -> Result<ComponentRef, Error> {
        self.inner.lookup_component(id)
    }

    /// Number of currently registered components.
    pub fn len(&self) -> usize {
        self.inner.components.borrow().len()
    }

    /// Returns true when no component is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.components.borrow().is_empty()
    }

    /// Number of currently live mediators.
    pub fn mediator_count(&self) -> usize {
        self.inner.mediators.borrow().len()
    }
}

impl RegistryInner {
    pub(crate) fn context(&self) -> Context {
        Context::from_inner(self.me.clone())
    }

    pub(crate) fn register_component(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<Option<ComponentRef>, Error> {
        let ComponentDescriptor {
            type_name,
            skins,
            mediator_refs,
            region,
        } = descriptor;

        let factory = match self.catalog.component(&type_name) {
            Some(factory) => factory,
            None => {
                debug!(type_name = %type_name, "unknown component type, skipping");
                return Ok(None);
            }
        };

        let mut behavior = factory(Rc::clone(&region));
        for skin_name in &skins {
            match self.catalog.skin(&type_name, skin_name) {
                Some(skin_factory) => {
                    behavior = decorate(behavior, skin_factory());
                }
                None => {
                    debug!(type_name = %type_name, skin = %skin_name, "unknown skin, skipping");
                }
            }
        }

        let id = ComponentId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let component = Rc::new(Component::new(
            id,
            type_name,
            region,
            behavior,
            self.context(),
        ));
        self.components.borrow_mut().insert(id, Rc::clone(&component));
        debug!(id = %id, type_name = %component.type_name(), "component registered");

        for spec in &mediator_refs {
            if let Err(err) = self.register_mediator_link(spec, &component) {
                self.unregister_one(&component);
                return Err(err);
            }
        }

        Ok(Some(component))
    }

    pub(crate) fn add_components(
        &self,
        root: &Rc<dyn Region>,
    ) -> Result<Vec<ComponentRef>, Error> {
        let mut added = Vec::new();
        for descriptor in self.discovery.scan(root) {
            if let Some(component) = self.register_component(descriptor)? {
                added.push(component);
            }
        }
        for component in &added {
            component.start();
        }
        Ok(added)
    }

    pub(crate) fn stop(&self, components: &[ComponentRef]) {
        for component in components {
            component.stop();
        }
    }

    pub(crate) fn unregister(&self, components: &[ComponentRef]) {
        for component in components {
            self.unregister_one(component);
        }
    }

    fn unregister_one(&self, component: &ComponentRef) {
        for mediator in component.attached_mediators() {
            mediator.unregister_component(component.id());
        }
        component.detach_all_mediators();
        self.components.borrow_mut().shift_remove(&component.id());
        debug!(id = %component.id(), "component unregistered");
    }

    fn unregister_all(&self) {
        self.components.borrow_mut().clear();
        self.mediators.borrow_mut().clear();
        debug!("all components and mediators unregistered");
    }

    pub(crate) fn register_mediator_link(
        &self,
        spec: &str,
        component: &ComponentRef,
    ) -> Result<(), Error> {
        let parsed = MediatorRef::parse(spec)?;
        let id = parsed.identifier();

        let mediator = {
            let existing = self.mediators.borrow().get(&id).cloned();
            match existing {
                Some(mediator) => mediator,
                None => {
                    let mediator: Rc<dyn Mediate> = match &parsed.type_name {
                        None => Rc::new(Broadcast::new(id.clone())),
                        Some(type_name) => {
                            let factory = self.catalog.mediator_type(type_name).ok_or_else(|| {
                                Error::MediatorTypeNotFound {
                                    type_name: type_name.clone(),
                                }
                            })?;
                            factory(id.clone())
                        }
                    };
                    self.mediators
                        .borrow_mut()
                        .insert(id.clone(), Rc::clone(&mediator));
                    debug!(mediator = %id, "mediator instantiated");
                    mediator
                }
            }
        };

        component.attach_mediator(Rc::clone(&mediator));
        mediator.register_component(component);
        debug!(mediator = %id, component = %component.id(), "link registered");
        Ok(())
    }

    pub(crate) fn unregister_mediator_link(&self, id: &MediatorId, component: &ComponentRef) {
        let mediator = self.mediators.borrow().get(id).cloned();
        if let Some(mediator) = mediator {
            mediator.unregister_component(component.id());
            component.detach_mediator(id);
            debug!(mediator = %id, component = %component.id(), "link unregistered");
        }
    }

    pub(crate) fn lookup_component(&self, id: ComponentId) -> Result<ComponentRef, Error> {
        self.components
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(Error::ComponentNotFound { id })
    }

    pub(crate) fn config(&self) -> Config {
        self.config.clone()
    }

    /// Joins the readiness barrier; the target is the number of components
    /// currently registered, recomputed at every arrival.
    pub(crate) fn ready(&self, callback: Box<dyn FnOnce()>) {
        let target = self.components.borrow().len();
        self.barrier.arrive(callback, target);
    }

    fn all_components(&self) -> Vec<ComponentRef> {
        self.components.borrow().values().cloned().collect()
    }
}
