//! Line segment math: direction, parallelism, distance and overlap

use crate::types::Vector2;

/// A straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Vector2,
    /// End point
    pub end: Vector2,
}

impl Segment {
    /// Create a new segment
    pub const fn new(start: Vector2, end: Vector2) -> Self {
        Segment { start, end }
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Unit direction from start to end, `None` for a zero-length segment
    pub fn direction(&self) -> Option<Vector2> {
        (self.end - self.start).try_normalize()
    }

    /// Distance from `other.start` to the infinite line through this segment
    ///
    /// Meaningful for parallel segments; infinite when this one is degenerate.
    pub fn perpendicular_distance(&self, other: &Segment) -> f64 {
        let d = self.end - self.start;
        let length = d.length();
        if length < 1e-9 {
            return f64::INFINITY;
        }
        d.cross(&(other.start - self.start)).abs() / length
    }

    /// Parameter interval covered by this segment along a unit direction,
    /// ordered low to high
    pub fn project_onto(&self, axis: Vector2) -> (f64, f64) {
        let a = self.start.dot(&axis);
        let b = self.end.dot(&axis);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Overlap length over the shorter projected length, measured along this
    /// segment's direction
    ///
    /// `None` when either projection is degenerate.
    pub fn overlap_ratio(&self, other: &Segment) -> Option<f64> {
        let axis = self.direction()?;
        let (a0, a1) = self.project_onto(axis);
        let (b0, b1) = other.project_onto(axis);
        let overlap = (a1.min(b1) - a0.max(b0)).max(0.0);
        let shorter = (a1 - a0).min(b1 - b0);
        if shorter < 1e-9 {
            return None;
        }
        Some(overlap / shorter)
    }

    /// Point on the segment at a given projection parameter along `axis`
    ///
    /// `t_start`/`t_end` are the projections of `start`/`end`; the point is
    /// interpolated linearly between them.
    pub fn point_at_projection(&self, axis: Vector2, t: f64) -> Vector2 {
        let t_start = self.start.dot(&axis);
        let t_end = self.end.dot(&axis);
        if (t_end - t_start).abs() < 1e-9 {
            return self.start;
        }
        let ratio = (t - t_start) / (t_end - t_start);
        self.start + (self.end - self.start) * ratio
    }

    /// Shortest distance from a point to this segment
    pub fn distance_to_point(&self, point: Vector2) -> f64 {
        let d = self.end - self.start;
        let length_sq = d.length_squared();
        if length_sq < 1e-18 {
            return point.distance(&self.start);
        }
        let t = ((point - self.start).dot(&d) / length_sq).clamp(0.0, 1.0);
        point.distance(&(self.start + d * t))
    }

    /// Midpoint
    pub fn midpoint(&self) -> Vector2 {
        self.start.midpoint(&self.end)
    }
}

/// Check whether two unit directions are parallel, same or opposite sense
///
/// `tolerance` is subtracted from 1 and compared with `|dot|`; 0.05 is
/// roughly ±3 degrees.
pub fn are_parallel(dir1: Vector2, dir2: Vector2, tolerance: f64) -> bool {
    dir1.dot(&dir2).abs() > 1.0 - tolerance
}
