//! Lightweight polyline entity (2D polyline)
//!
//! Legacy heavy `POLYLINE` entities are flattened into the same struct with
//! `heavy` set, so detectors treat both the same way while rule matching
//! still sees the original type name. Bulges are not modelled; every segment
//! is straight.

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// A 2D polyline entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LwPolyline {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Vertices of the polyline
    pub vertices: Vec<Vector2>,
    /// Is the polyline closed?
    pub is_closed: bool,
    /// Decoded from a legacy `POLYLINE` entity
    #[serde(skip)]
    pub heavy: bool,
}

impl LwPolyline {
    /// Create a new empty polyline
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            is_closed: false,
            heavy: false,
        }
    }

    /// Create an open polyline from a list of points
    pub fn from_points(points: Vec<Vector2>) -> Self {
        LwPolyline {
            vertices: points,
            ..Self::new()
        }
    }

    /// Create a closed axis-aligned rectangle centered on a point
    pub fn rectangle(center: Vector2, width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let mut poly = LwPolyline::from_points(vec![
            Vector2::new(center.x - hw, center.y - hh),
            Vector2::new(center.x + hw, center.y - hh),
            Vector2::new(center.x + hw, center.y + hh),
            Vector2::new(center.x - hw, center.y + hh),
        ]);
        poly.close();
        poly
    }

    /// Add a point to the polyline
    pub fn add_point(&mut self, point: Vector2) {
        self.vertices.push(point);
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Close the polyline
    pub fn close(&mut self) {
        self.is_closed = true;
    }

    /// Closed by flag, or because the last vertex returns to the first
    pub fn is_effectively_closed(&self) -> bool {
        if self.is_closed {
            return true;
        }
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if self.vertices.len() > 2 => first.distance(last) < 1e-6,
            _ => false,
        }
    }

    /// Consecutive-vertex segments, plus the closing segment when flagged closed
    pub fn segments(&self) -> Vec<(Vector2, Vector2)> {
        let mut segments: Vec<(Vector2, Vector2)> =
            self.vertices.windows(2).map(|w| (w[0], w[1])).collect();
        if self.is_closed && self.vertices.len() > 2 {
            if let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) {
                if first.distance(last) > 1e-9 {
                    segments.push((*last, *first));
                }
            }
        }
        segments
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for LwPolyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        if self.heavy {
            "POLYLINE"
        } else {
            "LWPOLYLINE"
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.vertices)
    }
}
