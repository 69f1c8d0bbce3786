//! Arc entity
//!
//! Door swings are usually drawn as arcs whose radius is the leaf width.

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// An arc entity (portion of a circle)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arc {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Center point of the arc
    pub center: Vector2,
    /// Radius of the arc
    pub radius: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
}

impl Arc {
    /// Create a new quarter arc at the origin
    pub fn new() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector2::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
        }
    }

    /// Create a new arc with center, radius, and angles
    pub fn from_center_radius_angles(
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..Self::new()
        }
    }

    /// Point at the start angle
    pub fn start_point(&self) -> Vector2 {
        self.point_at(self.start_angle)
    }

    /// Point at the end angle
    pub fn end_point(&self) -> Vector2 {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Vector2 {
        Vector2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Arc {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "ARC"
    }

    // Conservative: the full circle's box
    fn bounding_box(&self) -> Option<BoundingBox2D> {
        let r = Vector2::new(self.radius, self.radius);
        Some(BoundingBox2D::new(self.center - r, self.center + r))
    }
}
