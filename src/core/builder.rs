//! # Registry builder.
//!
//! All type registries — component factories, skin factories, mediator-type
//! factories — are explicit tables assembled here and handed to the registry
//! at construction. There is no global mutable state: two applications on
//! one page can carry entirely different catalogs.

use std::collections::HashMap;
use std::rc::Rc;

use crate::components::{Behavior, Skin};
use crate::core::{Config, Registry};
use crate::discovery::{Discover, NoDiscovery, Region};
use crate::mediators::{Mediate, MediatorId};

pub(crate) type BehaviorFactory = Box<dyn Fn(Rc<dyn Region>) -> Rc<dyn Behavior>>;
pub(crate) type SkinFactory = Box<dyn Fn() -> Box<dyn Skin>>;
pub(crate) type MediatorFactory = Box<dyn Fn(MediatorId) -> Rc<dyn Mediate>>;

/// Factory tables the registry resolves names against.
pub(crate) struct Catalog {
    components: HashMap<String, BehaviorFactory>,
    skins: HashMap<(String, String), SkinFactory>,
    mediator_types: HashMap<String, MediatorFactory>,
}

impl Catalog {
    fn new() -> Self {
        Self {
            components: HashMap::new(),
            skins: HashMap::new(),
            mediator_types: HashMap::new(),
        }
    }

    pub(crate) fn component(&self, type_name: &str) -> Option<&BehaviorFactory> {
        self.components.get(type_name)
    }

    pub(crate) fn skin(&self, type_name: &str, skin_name: &str) -> Option<&SkinFactory> {
        self.skins
            .get(&(type_name.to_string(), skin_name.to_string()))
    }

    pub(crate) fn mediator_type(&self, type_name: &str) -> Option<&MediatorFactory> {
        self.mediator_types.get(type_name)
    }
}

/// Builder for constructing a [`Registry`] with its catalog, configuration,
/// and discovery strategy.
///
/// ## Example
/// ```
/// use std::rc::Rc;
/// use componentry::{Behavior, Registry};
///
/// struct Gallery;
/// impl Behavior for Gallery {}
///
/// let registry = Registry::builder()
///     .with_component("Gallery", |_region| Rc::new(Gallery))
///     .build();
/// ```
pub struct RegistryBuilder {
    catalog: Catalog,
    config: Config,
    discovery: Box<dyn Discover>,
}

impl RegistryBuilder {
    pub(crate) fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            config: Config::default(),
            discovery: Box::new(NoDiscovery),
        }
    }

    /// Registers a component type factory.
    ///
    /// The factory receives the region handle from the descriptor and
    /// returns the component's base behavior.
    pub fn with_component(
        mut self,
        type_name: impl Into<String>,
        factory: impl Fn(Rc<dyn Region>) -> Rc<dyn Behavior> + 'static,
    ) -> Self {
        self.catalog
            .components
            .insert(type_name.into(), Box::new(factory));
        self
    }

    /// Registers a skin factory for one component type.
    ///
    /// Descriptors naming a (type, skin) pair with no registered factory
    /// decorate nothing; that soft failure is deliberate.
    pub fn with_skin(
        mut self,
        type_name: impl Into<String>,
        skin_name: impl Into<String>,
        factory: impl Fn() -> Box<dyn Skin> + 'static,
    ) -> Self {
        self.catalog
            .skins
            .insert((type_name.into(), skin_name.into()), Box::new(factory));
        self
    }

    /// Registers a mediator-type factory.
    ///
    /// Mediator refs of the form `type-id` resolve against this table; bare
    /// refs instantiate the built-in broadcast mediator and need no entry.
    /// The factory receives the composed identifier.
    pub fn with_mediator_type(
        mut self,
        type_name: impl Into<String>,
        factory: impl Fn(MediatorId) -> Rc<dyn Mediate> + 'static,
    ) -> Self {
        self.catalog
            .mediator_types
            .insert(type_name.into(), Box::new(factory));
        self
    }

    /// Sets the application configuration store.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the discovery strategy used by `Context::add_components`.
    pub fn with_discovery(mut self, discovery: impl Discover) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    /// Builds the registry.
    pub fn build(self) -> Registry {
        Registry::from_parts(self.catalog, self.config, self.discovery)
    }
}
