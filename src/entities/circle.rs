//! Circle entity

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// A circle entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Center point of the circle
    pub center: Vector2,
    /// Radius of the circle
    pub radius: f64,
}

impl Circle {
    /// Create a new circle at the origin with radius 1
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector2::ZERO,
            radius: 1.0,
        }
    }

    /// Create a new circle with center and radius
    pub fn from_center_radius(center: Vector2, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }

    /// Create a new circle from coordinates and radius
    pub fn from_coords(x: f64, y: f64, radius: f64) -> Self {
        Circle::from_center_radius(Vector2::new(x, y), radius)
    }

    /// Get the diameter of the circle
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "CIRCLE"
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        let r = Vector2::new(self.radius, self.radius);
        Some(BoundingBox2D::new(self.center - r, self.center + r))
    }
}
