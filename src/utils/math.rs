//! Additional 2D math helpers layered on top of `glam`.

use glam::{Mat2, Vec2};

/// Squared lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Scalar 2D cross product `a.x * b.y - a.y * b.x`.
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Normalizes `v`, returning `fallback` when `v` is too short to have a direction.
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let length_sq = v.length_squared();
    if length_sq <= NORMALIZE_EPSILON || !length_sq.is_finite() {
        fallback
    } else {
        v / length_sq.sqrt()
    }
}

/// Column-major rotation matrix for `angle` radians.
pub fn rotation(angle: f32) -> Mat2 {
    let (sin, cos) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(cos, sin), Vec2::new(-sin, cos))
}

/// Inverse of a scalar mass or moment; zero mass means immovable.
pub fn inverse_or_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        1.0 / value
    }
}

/// Moment of inertia of a solid rectangle about its centre.
pub fn inertia_box(half_extents: Vec2, mass: f32) -> f32 {
    let width = half_extents.x * 2.0;
    let height = half_extents.y * 2.0;
    mass * (width * width + height * height) / 12.0
}

/// Moment of inertia of a solid disc about its centre.
pub fn inertia_disc(radius: f32, mass: f32) -> f32 {
    0.5 * mass * radius * radius
}
