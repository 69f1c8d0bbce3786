//! Polygon area, centroid and containment

use crate::error::{Result, SemanticError};
use crate::types::{BoundingBox2D, Vector2};

/// Signed-area threshold below which the centroid falls back to the vertex mean
const DEGENERATE_AREA: f64 = 1e-9;

/// Twice the signed area (shoelace sum); positive for counter-clockwise rings
fn shoelace(vertices: &[Vector2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].cross(&vertices[(i + 1) % n]))
        .sum()
}

/// Absolute polygon area by the shoelace formula; 0 for fewer than 3 vertices
pub fn polygon_area(vertices: &[Vector2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    shoelace(vertices).abs() / 2.0
}

/// Area-weighted centroid
///
/// Falls back to the arithmetic mean of the vertices when the signed area is
/// degenerate. `None` for fewer than 3 vertices.
pub fn polygon_centroid(vertices: &[Vector2]) -> Option<Vector2> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.cross(&b);
        twice_area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    if twice_area.abs() < DEGENERATE_AREA {
        let sum = vertices.iter().fold(Vector2::ZERO, |acc, v| acc + *v);
        return Some(sum / n as f64);
    }

    let area = twice_area / 2.0;
    Some(Vector2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Ray-casting containment test; points exactly on an edge may go either way
pub fn point_in_polygon(point: Vector2, vertices: &[Vector2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A simple polygon ring with at least three vertices
///
/// The ring is stored open (the first vertex is not repeated at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2>,
}

impl Polygon {
    /// Create a polygon, failing when fewer than 3 vertices are given
    pub fn new(vertices: Vec<Vector2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(SemanticError::InsufficientPoints {
                shape: "Polygon",
                required: 3,
                actual: vertices.len(),
            });
        }
        Ok(Polygon { vertices })
    }

    /// Ring vertices
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Absolute area
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    /// Centroid (always defined for a valid polygon)
    pub fn centroid(&self) -> Vector2 {
        polygon_centroid(&self.vertices).unwrap_or(Vector2::ZERO)
    }

    /// Check whether a point lies inside
    pub fn contains(&self, point: Vector2) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_points(&self.vertices)
            .unwrap_or_else(|| BoundingBox2D::new(Vector2::ZERO, Vector2::ZERO))
    }

    /// Consume into the vertex list
    pub fn into_vertices(self) -> Vec<Vector2> {
        self.vertices
    }
}
