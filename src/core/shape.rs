use std::fmt;

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{config::PLANE_SEGMENT_HALF_LENGTH, error::PhysicsError, utils::math};

/// Tag identifying the geometry of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Aabb,
    Obb,
    Circle,
    Plane,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Aabb => "AABB",
            ShapeKind::Obb => "OBB",
            ShapeKind::Circle => "Circle",
            ShapeKind::Plane => "Plane",
        };
        f.write_str(name)
    }
}

/// Axis-aligned box. `min`/`max` are derived from the owning body's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub half_extents: Vec2,
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    pub fn new(half_extents: Vec2) -> Result<Self, PhysicsError> {
        positive("half extent x", half_extents.x)?;
        positive("half extent y", half_extents.y)?;
        Ok(Self {
            half_extents,
            min: -half_extents,
            max: half_extents,
        })
    }

    /// Builds from full width and height.
    pub fn from_size(width: f32, height: f32) -> Result<Self, PhysicsError> {
        Self::new(Vec2::new(width, height) * 0.5)
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    pub(crate) fn refresh(&mut self, position: Vec2) {
        self.min = position - self.half_extents;
        self.max = position + self.half_extents;
    }
}

/// Oriented box. `transform` is derived from the owning body's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub half_extents: Vec2,
    transform: Mat2,
}

impl Obb {
    pub fn new(half_extents: Vec2) -> Result<Self, PhysicsError> {
        positive("half extent x", half_extents.x)?;
        positive("half extent y", half_extents.y)?;
        Ok(Self {
            half_extents,
            transform: Mat2::IDENTITY,
        })
    }

    /// Rotation from the box frame to world space.
    pub fn transform(&self) -> Mat2 {
        self.transform
    }

    /// The box's local x and y axes in world space.
    pub fn axes(&self) -> [Vec2; 2] {
        [self.transform.x_axis, self.transform.y_axis]
    }

    pub(crate) fn refresh(&mut self, rotation: f32) {
        self.transform = math::rotation(rotation);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, PhysicsError> {
        positive("radius", radius)?;
        Ok(Self { radius })
    }
}

/// Half-space boundary `dot(p, normal) = distance`, drawn as a bounded segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vec2,
    distance: f32,
    start: Vec2,
    end: Vec2,
}

impl Default for Plane {
    fn default() -> Self {
        let mut plane = Self {
            normal: Vec2::Y,
            distance: 0.0,
            start: Vec2::ZERO,
            end: Vec2::ZERO,
        };
        plane.refresh_segment();
        plane
    }
}

impl Plane {
    /// `normal` is normalized; it only needs a direction.
    pub fn new(normal: Vec2, distance: f32) -> Result<Self, PhysicsError> {
        let mut plane = Self::default();
        plane.set_normal(normal)?;
        plane.set_distance(distance)?;
        Ok(plane)
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn set_normal(&mut self, normal: Vec2) -> Result<(), PhysicsError> {
        if !normal.is_finite() || normal.length_squared() <= math::NORMALIZE_EPSILON {
            return Err(PhysicsError::InvalidPlaneNormal);
        }
        self.normal = normal.normalize();
        self.refresh_segment();
        Ok(())
    }

    pub fn set_distance(&mut self, distance: f32) -> Result<(), PhysicsError> {
        if !distance.is_finite() {
            return Err(PhysicsError::InvalidDimension {
                what: "plane distance",
                value: distance,
            });
        }
        self.distance = distance;
        self.refresh_segment();
        Ok(())
    }

    /// Signed distance of `point`, positive on the side the normal faces.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        point.dot(self.normal) - self.distance
    }

    fn refresh_segment(&mut self) {
        let centre = self.normal * self.distance;
        let parallel = Vec2::new(self.normal.y, -self.normal.x);
        self.start = centre + parallel * PLANE_SEGMENT_HALF_LENGTH;
        self.end = centre - parallel * PLANE_SEGMENT_HALF_LENGTH;
    }
}

/// Closed set of supported geometries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Aabb(Aabb),
    Obb(Obb),
    Circle(Circle),
    Plane(Plane),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Aabb(_) => ShapeKind::Aabb,
            Shape::Obb(_) => ShapeKind::Obb,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Plane(_) => ShapeKind::Plane,
        }
    }

    /// Moment of inertia for a solid body of this shape. Planes have none.
    pub fn moment_for_mass(&self, mass: f32) -> f32 {
        match self {
            Shape::Aabb(aabb) => math::inertia_box(aabb.half_extents, mass),
            Shape::Obb(obb) => math::inertia_box(obb.half_extents, mass),
            Shape::Circle(circle) => math::inertia_disc(circle.radius, mass),
            Shape::Plane(_) => 0.0,
        }
    }

    /// Recomputes geometry that depends on the owning body's pose.
    pub(crate) fn refresh(&mut self, position: Vec2, rotation: f32) {
        match self {
            Shape::Aabb(aabb) => aabb.refresh(position),
            Shape::Obb(obb) => obb.refresh(rotation),
            Shape::Circle(_) | Shape::Plane(_) => {}
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Aabb(aabb) => write!(
                f,
                "AABB {:.2}x{:.2} min {} max {}",
                aabb.width(),
                aabb.height(),
                aabb.min,
                aabb.max
            ),
            Shape::Obb(obb) => write!(f, "OBB half extents {}", obb.half_extents),
            Shape::Circle(circle) => write!(f, "Circle radius {:.2}", circle.radius),
            Shape::Plane(plane) => write!(
                f,
                "Plane normal {} distance {:.2}",
                plane.normal, plane.distance
            ),
        }
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidDimension { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Aabb::new(Vec2::new(0.0, 1.0)).is_err());
        assert!(Obb::new(Vec2::new(1.0, -2.0)).is_err());
        assert!(Circle::new(f32::NAN).is_err());
        assert!(Plane::new(Vec2::ZERO, 0.0).is_err());
    }

    #[test]
    fn aabb_bounds_follow_position() {
        let mut aabb = Aabb::from_size(4.0, 2.0).unwrap();
        aabb.refresh(Vec2::new(10.0, 5.0));
        assert_eq!(aabb.min(), Vec2::new(8.0, 4.0));
        assert_eq!(aabb.max(), Vec2::new(12.0, 6.0));
    }

    #[test]
    fn plane_normalizes_and_places_segment() {
        let plane = Plane::new(Vec2::new(0.0, 2.0), -5.0).unwrap();
        assert_eq!(plane.normal(), Vec2::Y);
        assert_relative_eq!(plane.start().y, -5.0);
        assert_relative_eq!(plane.end().y, -5.0);
        assert_relative_eq!(
            (plane.start() - plane.end()).length(),
            PLANE_SEGMENT_HALF_LENGTH * 2.0
        );
        assert_relative_eq!(plane.signed_distance(Vec2::new(3.0, -2.0)), 3.0);
    }
}
