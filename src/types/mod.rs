//! Core value types: vectors, bounding boxes, handles and insert transforms

pub mod bounds;
pub mod handle;
pub mod transform;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use handle::Handle;
pub use transform::InsertTransform;
pub use vector::Vector2;

/// Round a value to two decimal places
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round a value to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    // Normalize -0.0 so serialized output is stable
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
