//! Components: lifecycle units, their behaviors, decoration, and the
//! continuation calling convention.

mod behavior;
mod component;
mod continuation;
mod skin;

pub use behavior::{Behavior, Payload, Reply};
pub use component::{Component, ComponentId, ComponentRef, Lifecycle};
pub use continuation::Continuation;
pub use skin::Skin;

pub(crate) use skin::decorate;
