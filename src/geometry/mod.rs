//! Planar geometry used by the detectors
//!
//! Everything here is a pure function over [`Vector2`] values. Functions
//! that need a minimum number of points return `None` (or an empty result)
//! when given fewer; only the WKT emitters and [`Polygon::new`] report that
//! as an error, since they construct a value with a structural invariant.

pub mod extract;
pub mod polygon;
pub mod segment;
pub mod wkt;

pub use extract::{center_and_size, entity_points, entity_segments, ShapeSize};
pub use polygon::{point_in_polygon, polygon_area, polygon_centroid, Polygon};
pub use segment::{are_parallel, Segment};

use crate::types::Vector2;

/// Default tolerance for axis-alignment checks
pub const AXIS_EPSILON: f64 = 1e-6;

/// Orientation of an axis-aligned run of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisOrientation {
    /// Constant x; carries the mean x
    Vertical(f64),
    /// Constant y; carries the mean y
    Horizontal(f64),
}

/// Classify points as a vertical or horizontal line
///
/// Vertical wins when the points are both (a single repeated point).
/// Diagonal runs and empty input give `None`.
pub fn axis_orientation(points: &[Vector2], eps: f64) -> Option<AxisOrientation> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (min_x, max_x) = min_max(points.iter().map(|p| p.x));
    if max_x - min_x < eps {
        return Some(AxisOrientation::Vertical(points.iter().map(|p| p.x).sum::<f64>() / n));
    }
    let (min_y, max_y) = min_max(points.iter().map(|p| p.y));
    if max_y - min_y < eps {
        return Some(AxisOrientation::Horizontal(points.iter().map(|p| p.y).sum::<f64>() / n));
    }
    None
}

/// Check whether a point coincides with any intersection within `eps` on both axes
pub fn match_intersection(center: Vector2, intersections: &[Vector2], eps: f64) -> bool {
    intersections
        .iter()
        .any(|i| (center.x - i.x).abs() <= eps && (center.y - i.y).abs() <= eps)
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
