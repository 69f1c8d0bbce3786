//! Axis-aligned bounding box

use super::Vector2;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Minimum point (lower-left corner)
    pub min: Vector2,
    /// Maximum point (upper-right corner)
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Create a bounding box from explicit extents
    pub fn from_extents(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        BoundingBox2D::new(Vector2::new(xmin, ymin), Vector2::new(xmax, ymax))
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox2D::new(*first, *first);
        for point in rest {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Width times height
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vector2 {
        self.min.midpoint(&self.max)
    }

    /// The four corners, counter-clockwise from the minimum corner
    pub fn corners(&self) -> [Vector2; 4] {
        [
            self.min,
            Vector2::new(self.max.x, self.min.y),
            self.max,
            Vector2::new(self.min.x, self.max.y),
        ]
    }

    /// Check if this bounding box contains a point (edges inclusive)
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check that every point lies inside the box
    pub fn contains_all(&self, points: &[Vector2]) -> bool {
        points.iter().all(|p| self.contains(*p))
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Both corners rounded to two decimals
    pub fn rounded(&self) -> Self {
        BoundingBox2D::new(self.min.rounded(), self.max.rounded())
    }
}

impl Serialize for BoundingBox2D {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BoundingBox2D", 4)?;
        state.serialize_field("xmin", &self.min.x)?;
        state.serialize_field("ymin", &self.min.y)?;
        state.serialize_field("xmax", &self.max.x)?;
        state.serialize_field("ymax", &self.max.y)?;
        state.end()
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}
