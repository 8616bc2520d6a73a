//! # Mediator identifiers and ref parsing.
//!
//! A mediator ref is the string a descriptor (or a `subscribe` call) uses to
//! name a mediator link: either a bare channel id (`"Navigation"`) for the
//! default broadcast mediator, or `type-id` (`"MasterSlave-Navigation"`) to
//! pick a registered mediator type. The derived [`MediatorId`] concatenates
//! type tag and channel id and identifies at most one live mediator per
//! application.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;

/// Identifier of one live mediator within an application.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MediatorId(Arc<str>);

impl MediatorId {
    /// Wraps a raw identifier. Prefer [`MediatorRef::parse`] when starting
    /// from a ref string, so that `type-id` specs compose the same
    /// identifier everywhere.
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MediatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediatorId({})", self.0)
    }
}

/// Parsed form of a mediator ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediatorRef {
    /// Mediator type tag; `None` selects the default broadcast mediator.
    pub type_name: Option<String>,
    /// Channel id chaining the linked components together.
    pub channel: String,
}

impl MediatorRef {
    /// Parses a ref string.
    ///
    /// Accepted forms, after trimming surrounding whitespace:
    /// - `"Navigation"` → default type, channel `Navigation`
    /// - `"MasterSlave-Navigation"` → type `MasterSlave`, channel `Navigation`
    /// - `"-Navigation"` → an empty type tag also selects the default type
    ///
    /// The channel may itself contain `-`; only the first separator splits.
    /// Blank refs and refs with a blank channel are rejected.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedMediatorRef { spec: spec.into() });
        }

        let (type_name, channel) = match trimmed.split_once('-') {
            Some((type_part, channel)) => {
                let type_part = type_part.trim();
                let type_name = if type_part.is_empty() {
                    None
                } else {
                    Some(type_part.to_string())
                };
                (type_name, channel.trim())
            }
            None => (None, trimmed),
        };

        if channel.is_empty() {
            return Err(Error::MalformedMediatorRef { spec: spec.into() });
        }

        Ok(Self {
            type_name,
            channel: channel.to_string(),
        })
    }

    /// Derives the mediator identifier: `type` + `id` concatenated, or the
    /// bare channel id for the default type.
    pub fn identifier(&self) -> MediatorId {
        match &self.type_name {
            Some(type_name) => MediatorId::new(format!("{type_name}{}", self.channel)),
            None => MediatorId::new(self.channel.as_str()),
        }
    }
}
