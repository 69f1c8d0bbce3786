//! Insert (block reference) transformation
//!
//! A block instance places its definition by scaling about the block origin,
//! rotating counter-clockwise, then translating to the insertion point. The
//! composition is kept as a homogeneous 3x3 matrix.

use super::{BoundingBox2D, Vector2};
use nalgebra::{Matrix3, Point2, Vector2 as NVector2};

/// Planar transform of a block reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertTransform {
    matrix: Matrix3<f64>,
}

impl InsertTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Build from insertion point, per-axis scale and rotation in degrees
    pub fn new(translation: Vector2, x_scale: f64, y_scale: f64, rotation_degrees: f64) -> Self {
        let scale = Matrix3::new_nonuniform_scaling(&NVector2::new(x_scale, y_scale));
        let rotation = Matrix3::new_rotation(rotation_degrees.to_radians());
        let translate = Matrix3::new_translation(&NVector2::new(translation.x, translation.y));
        Self {
            matrix: translate * rotation * scale,
        }
    }

    /// Transform a point
    pub fn apply(&self, point: Vector2) -> Vector2 {
        let p = self.matrix.transform_point(&Point2::new(point.x, point.y));
        Vector2::new(p.x, p.y)
    }

    /// Transform all four corners of a box and return their envelope
    ///
    /// A rotated box is no longer axis-aligned, so scaling the extents
    /// directly would give the wrong envelope.
    pub fn apply_bbox(&self, bbox: &BoundingBox2D) -> BoundingBox2D {
        let corners = bbox.corners().map(|c| self.apply(c));
        let mut envelope = BoundingBox2D::new(corners[0], corners[0]);
        for corner in &corners[1..] {
            envelope.expand_to_include(*corner);
        }
        envelope
    }
}

impl Default for InsertTransform {
    fn default() -> Self {
        Self::identity()
    }
}
