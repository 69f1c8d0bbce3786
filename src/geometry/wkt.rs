//! Well-Known Text emitters for spatial storage

use crate::entities::EntityType;
use crate::error::{Result, SemanticError};
use crate::types::{BoundingBox2D, Vector2};
use std::fmt::Write;

fn write_coord(out: &mut String, point: Vector2) {
    // -0.0 would print as "-0"
    let x = if point.x == 0.0 { 0.0 } else { point.x };
    let y = if point.y == 0.0 { 0.0 } else { point.y };
    let _ = write!(out, "{} {}", x, y);
}

fn coord_list(points: &[Vector2]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coord(&mut out, *p);
    }
    out
}

fn require(shape: &'static str, points: &[Vector2], required: usize) -> Result<()> {
    if points.len() < required {
        return Err(SemanticError::InsufficientPoints {
            shape,
            required,
            actual: points.len(),
        });
    }
    Ok(())
}

/// `POINT(x y)`
pub fn point(p: Vector2) -> String {
    let mut out = String::from("POINT(");
    write_coord(&mut out, p);
    out.push(')');
    out
}

/// `LINESTRING(x1 y1, x2 y2, ...)`; needs at least 2 points
pub fn linestring(points: &[Vector2]) -> Result<String> {
    require("LINESTRING", points, 2)?;
    Ok(format!("LINESTRING({})", coord_list(points)))
}

/// `POLYGON((x1 y1, ..., x1 y1))`; needs at least 3 points, closes the ring
pub fn polygon(points: &[Vector2]) -> Result<String> {
    require("POLYGON", points, 3)?;
    let mut ring = points.to_vec();
    if ring.first() != ring.last() {
        ring.push(points[0]);
    }
    Ok(format!("POLYGON(({}))", coord_list(&ring)))
}

/// `MULTIPOINT((x1 y1), (x2 y2), ...)`; needs at least 1 point
pub fn multipoint(points: &[Vector2]) -> Result<String> {
    require("MULTIPOINT", points, 1)?;
    let mut out = String::from("MULTIPOINT(");
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        write_coord(&mut out, *p);
        out.push(')');
    }
    out.push(')');
    Ok(out)
}

/// Closed rectangle of a bounding box, counter-clockwise from the minimum corner
pub fn bbox_polygon(bbox: &BoundingBox2D) -> String {
    let corners = bbox.corners();
    let mut ring = corners.to_vec();
    ring.push(corners[0]);
    format!("POLYGON(({}))", coord_list(&ring))
}

/// Representative geometry of a single entity
///
/// Lines and polylines become a LINESTRING (closed polylines repeat their
/// first vertex), arcs the chord between their end points, and circles,
/// texts and block references a POINT.
pub fn entity_wkt(entity: &EntityType) -> Option<String> {
    match entity {
        EntityType::Line(line) => linestring(&[line.start, line.end]).ok(),
        EntityType::LwPolyline(poly) => {
            let mut points = poly.vertices.clone();
            if poly.is_closed && points.len() > 2 && points.first() != points.last() {
                points.push(points[0]);
            }
            linestring(&points).ok()
        }
        EntityType::Circle(circle) => Some(point(circle.center)),
        EntityType::Arc(arc) => linestring(&[arc.start_point(), arc.end_point()]).ok(),
        EntityType::Text(text) => Some(point(text.insertion_point)),
        EntityType::MText(text) => Some(point(text.insertion_point)),
        EntityType::Insert(insert) => Some(point(insert.insert_point)),
        EntityType::Unknown(_) => None,
    }
}
