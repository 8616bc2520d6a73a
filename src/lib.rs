//! # componentry
//!
//! **componentry** is a component-composition runtime for document-driven
//! UIs. Independently authored widgets attached to regions of a document
//! become lifecycle-managed, loosely coupled components that communicate
//! through mediators instead of direct references, and that can be
//! specialized via skin decoration without touching their base
//! implementation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Descriptor  │   │  Descriptor  │   │  Descriptor  │
//!     │ (discovered) │   │ (discovered) │   │ (programmatic)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (per-application orchestrator)                          │
//! │  - component table (id → component, insertion-ordered)            │
//! │  - mediator table (identifier → mediator)                         │
//! │  - ReadyBarrier (releases after-hooks atomically)                 │
//! │  - Catalog (component / skin / mediator-type factories)           │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌───────────┐     ┌───────────┐     ┌───────────┐
//!   │ Component │     │ Component │     │ Component │   each holds the
//!   │ (skinned) │     │           │     │ (skinned) │   Context facade
//!   └─────┬─────┘     └─────┬─────┘     └─────┬─────┘
//!         │  fire("slideChange", payload, default)
//!         ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Mediator ("Gallery1")                                            │
//! │  notify(origin, "onSlideChange", payload, completion)             │
//! │    ├─► peer A handler → Proceed                                   │
//! │    └─► peer B handler → Veto (keeps completion, resolves later)   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! register_component() ──► Registered
//!
//! start():
//!   ├─► behavior.on_start(cx, ready)      may hold `ready` and resolve later
//!   └─► ready resolved ──► cx.ready(after_hook)
//!         └─► barrier: pending == registered count ──► all after-hooks run,
//!             in arrival order, exactly once per batch
//!
//! stop():  on_stop hook, then Region::release(); tables untouched
//! unregister(): pruned from every mediator, then from the component table
//! ```
//!
//! Execution is single-threaded and cooperative. "Asynchrony" is a calling
//! convention: whoever defers holds a [`Continuation`] and resolves it later
//! from ordinary control flow; there is no scheduler, and a peer that vetoes
//! and never resolves stalls that broadcast's default action permanently.
//!
//! ## Features
//! | Area            | Description                                                | Key types / traits                      |
//! |-----------------|------------------------------------------------------------|-----------------------------------------|
//! | **Components**  | Lifecycle hooks, broadcast origin, veto/defer handlers.    | [`Behavior`], [`Component`], [`Reply`]  |
//! | **Mediators**   | Named hubs broadcasting state changes with veto collection.| [`Mediate`], [`Broadcast`], [`MediatorId`] |
//! | **Decoration**  | Skins selectively override behavior, composably.           | [`Skin`]                                |
//! | **Orchestration**| Registration, start/stop, mediator linking.               | [`Registry`], [`RegistryBuilder`]       |
//! | **Facade**      | The single gateway components get to the application.      | [`Context`]                             |
//! | **Discovery**   | Pluggable region scanning; the core never reads markup.    | [`Discover`], [`ComponentDescriptor`]   |
//! | **Errors**      | Typed lookup/broadcast failures with stable log labels.    | [`Error`]                               |
//! | **Configuration**| Literal-name JSON parameter store served via the facade.  | [`Config`]                              |
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use serde_json::json;
//! use componentry::{
//!     Behavior, ComponentDescriptor, Context, Continuation, Error, Payload,
//!     Region, Registry, Reply,
//! };
//!
//! // Stand-in for a real document region collaborator.
//! struct Strip;
//! impl Region for Strip {
//!     fn release(&self) {}
//! }
//!
//! struct Gallery;
//! impl Behavior for Gallery {}
//!
//! struct Thumbnails;
//! impl Behavior for Thumbnails {
//!     fn handle(
//!         &self,
//!         _cx: &Context,
//!         event: &str,
//!         payload: &Payload,
//!         _completion: Option<&Continuation>,
//!     ) -> Result<Reply, Error> {
//!         if event == "onSlideChange" {
//!             assert_eq!(payload["index"], json!(2));
//!             return Ok(Reply::Proceed);
//!         }
//!         Ok(Reply::Unhandled)
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let registry = Registry::builder()
//!         .with_component("Gallery", |_region| Rc::new(Gallery))
//!         .with_component("Thumbnails", |_region| Rc::new(Thumbnails))
//!         .build();
//!
//!     let gallery = registry
//!         .register_component(
//!             ComponentDescriptor::new("Gallery", Rc::new(Strip)).with_mediator_ref("Gallery1"),
//!         )?
//!         .expect("Gallery factory is registered");
//!     registry.register_component(
//!         ComponentDescriptor::new("Thumbnails", Rc::new(Strip)).with_mediator_ref("Gallery1"),
//!     )?;
//!
//!     registry.start_all();
//!
//!     gallery.fire(
//!         "slideChange",
//!         json!({ "index": 2 }),
//!         Some(Box::new(|| {
//!             // advance the gallery viewport
//!         })),
//!     )?;
//!     Ok(())
//! }
//! ```

mod components;
mod core;
mod discovery;
mod error;
mod mediators;

// ---- Public re-exports ----

pub use components::{
    Behavior, Component, ComponentId, ComponentRef, Continuation, Lifecycle, Payload, Reply, Skin,
};
pub use core::{Config, Context, Registry, RegistryBuilder};
pub use discovery::{ComponentDescriptor, Discover, NoDiscovery, Region};
pub use error::Error;
pub use mediators::{Broadcast, Mediate, MediatorId, MediatorRef};
