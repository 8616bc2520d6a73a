//! # Discovery collaborator contracts.
//!
//! The runtime never inspects markup, class names, or any other presentation
//! convention. Everything it knows about the document comes in through two
//! small contracts:
//!
//! - [`Region`] — an opaque handle to the document region a component owns.
//!   The collaborator that produced it also owns the low-level event bindings
//!   scoped to it; [`Region::release`] tears those down when the component
//!   stops.
//! - [`Discover`] — a pluggable scan strategy that turns a root region into
//!   [`ComponentDescriptor`]s. All naming-convention parsing (token
//!   separators, casing) lives behind this trait.
//!
//! Applications that register descriptors programmatically can use the
//! default [`NoDiscovery`] strategy.

use std::rc::Rc;

/// Opaque handle to the document region a component is attached to.
///
/// Owned by the discovery/DOM collaborator; the runtime only ever asks it to
/// release its resources when the owning component stops.
pub trait Region: 'static {
    /// Releases all low-level bindings scoped to this region.
    ///
    /// Called once from the component's stop transition. The region handle
    /// itself stays alive until the component is dropped.
    fn release(&self);
}

/// Everything the registry needs to instantiate one component.
///
/// Produced by a [`Discover`] strategy, or built by hand for programmatic
/// registration. Skins and mediator refs are ordered: skins are applied in
/// sequence (the last entry becomes the outermost decoration) and mediator
/// links are attached in sequence.
pub struct ComponentDescriptor {
    /// Component type name; must match a factory registered in the builder.
    pub type_name: String,
    /// Skin names to decorate the component with, innermost first.
    pub skins: Vec<String>,
    /// Mediator refs (`id` or `type-id`) to link the component to.
    pub mediator_refs: Vec<String>,
    /// The document region the component owns.
    pub region: Rc<dyn Region>,
}

impl ComponentDescriptor {
    /// Creates a descriptor with no skins and no mediator refs.
    pub fn new(type_name: impl Into<String>, region: Rc<dyn Region>) -> Self {
        Self {
            type_name: type_name.into(),
            skins: Vec::new(),
            mediator_refs: Vec::new(),
            region,
        }
    }

    /// Appends a skin name.
    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skins.push(skin.into());
        self
    }

    /// Appends a mediator ref (`id` or `type-id`).
    pub fn with_mediator_ref(mut self, spec: impl Into<String>) -> Self {
        self.mediator_refs.push(spec.into());
        self
    }
}

/// Pluggable discovery strategy.
///
/// Given a root region, produces the descriptors of every component that
/// should be registered beneath it. The order of the returned descriptors
/// determines registration (and therefore start) order.
pub trait Discover: 'static {
    /// Scans the given root and returns candidate component descriptors.
    fn scan(&self, root: &Rc<dyn Region>) -> Vec<ComponentDescriptor>;
}

/// Discovery strategy that never finds anything.
///
/// The builder default; suitable for applications that call
/// `Registry::register_component` directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiscovery;

impl Discover for NoDiscovery {
    fn scan(&self, _root: &Rc<dyn Region>) -> Vec<ComponentDescriptor> {
        Vec::new()
    }
}
