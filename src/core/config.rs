//! # Application configuration store.
//!
//! A nested key→value store shared by all components of one application.
//! Loading configuration (files, bootstrapping) is an external concern; the
//! runtime only receives the assembled store at builder time and serves
//! lookups through the context facade.
//!
//! Lookup is by the literal requested name, failing with
//! [`Error::ConfigParamNotFound`](crate::Error::ConfigParamNotFound) when
//! the parameter is absent. Values are arbitrary JSON, so a parameter can
//! itself be a nested object.

use serde_json::{Map, Value};

use crate::error::Error;

/// Immutable application configuration.
///
/// ## Example
/// ```
/// use componentry::Config;
/// use serde_json::json;
///
/// let config = Config::default()
///     .with("theme", json!("dark"))
///     .with("paths", json!({ "css": "/css/dependencies" }));
///
/// assert_eq!(config.param("theme").unwrap(), json!("dark"));
/// assert!(config.param("missing").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Config {
    values: Map<String, Value>,
}

impl Config {
    /// Builds a store from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(Error::Config {
                reason: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    /// Adds or replaces a parameter.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns the parameter with the given literal name.
    pub fn param(&self, name: &str) -> Result<Value, Error> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ConfigParamNotFound { name: name.into() })
    }

    /// Returns true when the parameter exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the full store as a JSON value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
