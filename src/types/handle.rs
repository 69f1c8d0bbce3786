//! Handle type for drawing entities
//!
//! Handles come from the external decoder as hexadecimal strings. The engine
//! treats them as opaque identifiers and never parses them.

use serde::Serialize;
use std::fmt;

/// An opaque identifier for an entity in the source drawing
///
/// An empty handle means the decoder did not supply one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// The empty handle
    pub const fn null() -> Self {
        Handle(String::new())
    }

    /// Create a handle from its textual form
    pub fn new(value: impl Into<String>) -> Self {
        Handle(value.into())
    }

    /// Get the textual form
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this handle is empty
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }

    /// Derived handle for the `index`-th piece of this entity (e.g. `1A_0`)
    pub fn part(&self, index: usize) -> Handle {
        Handle(format!("{}_{}", self.0, index))
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Handle(value.to_string())
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Handle(value)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
