//! Entity kinds without a geometry model.
//!
//! Hatches, dimensions, splines and anything else the decoder emits are kept
//! with their type name and common properties so the rule engine can still
//! classify them by layer or type. They never feed a detector.

use super::{Entity, EntityCommon};
use crate::types::BoundingBox2D;

/// An entity whose type has no dedicated struct.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEntity {
    /// Common entity data (handle, layer).
    pub common: EntityCommon,
    /// The type name as the decoder reported it (e.g. `"HATCH"`).
    pub type_name: String,
}

impl UnknownEntity {
    /// Create a new unknown entity with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            common: EntityCommon::new(),
            type_name: type_name.into(),
        }
    }
}

impl Entity for UnknownEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        &self.type_name
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        None
    }
}
