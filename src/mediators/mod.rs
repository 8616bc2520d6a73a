//! Mediators: identifiers, the [`Mediate`] contract, and the default
//! [`Broadcast`] implementation.

mod broadcast;
mod identifier;
mod mediate;

pub use broadcast::Broadcast;
pub use identifier::{MediatorId, MediatorRef};
pub use mediate::Mediate;
