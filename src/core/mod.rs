//! Core types describing bodies, their geometry, and shared material data.

pub mod body;
pub mod shape;
pub mod types;

pub use body::{Body, BodyBuilder};
pub use shape::{Aabb, Circle, Obb, Plane, Shape, ShapeKind};
pub use types::{Color, MassProperties, Material};
