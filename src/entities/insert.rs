//! Insert entity (block reference)

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, InsertTransform, Vector2};
use serde::Serialize;

/// A block reference placing a block definition into the drawing
///
/// Rotation is stored in degrees, the way the decoder reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insert {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Name of the referenced block
    pub block_name: String,
    /// Insertion point
    pub insert_point: Vector2,
    /// X scale factor
    pub x_scale: f64,
    /// Y scale factor
    pub y_scale: f64,
    /// Rotation angle in degrees
    pub rotation: f64,
}

impl Insert {
    /// Create a new insert with unit scale and no rotation
    pub fn new(block_name: impl Into<String>, insert_point: Vector2) -> Self {
        Insert {
            common: EntityCommon::new(),
            block_name: block_name.into(),
            insert_point,
            x_scale: 1.0,
            y_scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Builder: set independent X/Y scale factors
    pub fn with_scale(mut self, x_scale: f64, y_scale: f64) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    /// Builder: set rotation in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Block-to-world transform of this reference
    pub fn transform(&self) -> InsertTransform {
        InsertTransform::new(self.insert_point, self.x_scale, self.y_scale, self.rotation)
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "INSERT"
    }

    // Needs the block definition to know the real extents
    fn bounding_box(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::new(self.insert_point, self.insert_point))
    }
}
