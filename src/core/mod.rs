//! Core runtime: registry, builder, context facade, readiness barrier, and
//! the configuration store.

mod barrier;
mod builder;
mod config;
mod context;
mod registry;

pub use builder::RegistryBuilder;
pub use config::Config;
pub use context::Context;
pub use registry::Registry;
