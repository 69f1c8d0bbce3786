//! Layer table entry

use super::TableEntry;
use crate::types::Handle;

/// A layer table entry
///
/// Only identification and visibility are kept; layers feed drawing
/// statistics and never influence detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Handle, when the decoder reports one
    pub handle: Handle,
    /// Layer name
    pub name: String,
    /// ACI color index
    pub color_index: Option<i16>,
    /// Is the layer visible?
    pub visible: bool,
    /// Is the layer frozen?
    pub frozen: bool,
}

impl Layer {
    /// Create a new visible layer
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::null(),
            name: name.into(),
            color_index: None,
            visible: true,
            frozen: false,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Layer::new("0")
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}
