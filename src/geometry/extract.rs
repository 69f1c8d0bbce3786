//! Point, segment and shape extraction from entities

use super::Segment;
use crate::entities::EntityType;
use crate::types::{round2, BoundingBox2D, Handle, Vector2};
use serde::Serialize;

/// Size descriptor of a column-like shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeSize {
    /// Round section
    Circle { radius: f64, diameter: f64 },
    /// Rectangular section (bounding box of the outline)
    Rect { width: f64, height: f64 },
}

impl ShapeSize {
    /// Copy with every dimension rounded to 0.01
    pub fn rounded(&self) -> Self {
        match *self {
            ShapeSize::Circle { radius, diameter } => ShapeSize::Circle {
                radius: round2(radius),
                diameter: round2(diameter),
            },
            ShapeSize::Rect { width, height } => ShapeSize::Rect {
                width: round2(width),
                height: round2(height),
            },
        }
    }
}

/// Vertices of a line or polyline; empty for every other kind
pub fn entity_points(entity: &EntityType) -> Vec<Vector2> {
    match entity {
        EntityType::Line(line) => vec![line.start, line.end],
        EntityType::LwPolyline(poly) => poly.vertices.clone(),
        _ => Vec::new(),
    }
}

/// Straight segments of a line or polyline, each with its own handle
///
/// A line keeps its handle; the `i`-th polyline segment gets `<handle>_<i>`.
/// Closed polylines contribute their closing segment too.
pub fn entity_segments(entity: &EntityType) -> Vec<(Segment, Handle)> {
    match entity {
        EntityType::Line(line) => {
            vec![(Segment::new(line.start, line.end), line.common.handle.clone())]
        }
        EntityType::LwPolyline(poly) => poly
            .segments()
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| (Segment::new(a, b), poly.common.handle.part(i)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Center and size of a circle or a closed polyline outline
///
/// A polyline qualifies when it is closed (flag or coincident ends) and has
/// at least three distinct vertices; its size is the bounding box.
pub fn center_and_size(entity: &EntityType) -> Option<(Vector2, ShapeSize)> {
    match entity {
        EntityType::Circle(circle) => Some((
            circle.center,
            ShapeSize::Circle {
                radius: circle.radius,
                diameter: circle.diameter(),
            },
        )),
        EntityType::LwPolyline(poly) => {
            if !poly.is_effectively_closed() || distinct_count(&poly.vertices) < 3 {
                return None;
            }
            let bbox = BoundingBox2D::from_points(&poly.vertices)?;
            Some((
                bbox.center(),
                ShapeSize::Rect {
                    width: bbox.width(),
                    height: bbox.height(),
                },
            ))
        }
        _ => None,
    }
}

fn distinct_count(points: &[Vector2]) -> usize {
    let mut distinct: Vec<Vector2> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.iter().any(|q| q.distance(p) < 1e-9) {
            distinct.push(*p);
        }
    }
    distinct.len()
}
