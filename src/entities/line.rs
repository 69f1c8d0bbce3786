//! Line entity

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// A line entity defined by two endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector2::ZERO,
            end: Vector2::ZERO,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector2, end: Vector2) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Create a new line from coordinates
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::from_points(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector2 {
        self.start.midpoint(&self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "LINE"
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&[self.start, self.end])
    }
}
