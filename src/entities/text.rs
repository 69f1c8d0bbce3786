//! Single-line text entity

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// A single-line text entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Insertion point
    pub insertion_point: Vector2,
    /// Text content
    pub value: String,
    /// Text height
    pub height: f64,
}

impl Text {
    /// Create a new empty text at the origin
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            insertion_point: Vector2::ZERO,
            value: String::new(),
            height: 2.5,
        }
    }

    /// Create a text with content at a position
    pub fn with_value(value: impl Into<String>, position: Vector2) -> Self {
        Text {
            value: value.into(),
            insertion_point: position,
            ..Self::new()
        }
    }

    /// Builder: set the text height
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "TEXT"
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::new(self.insertion_point, self.insertion_point))
    }
}
