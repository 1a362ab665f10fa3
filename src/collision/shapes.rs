use glam::Vec2;

use crate::core::{
    body::Body,
    shape::{Aabb, Obb, Shape},
};

/// Projection of a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn from_points(points: &[Vec2], axis: Vec2) -> Self {
        points.iter().fold(
            Interval {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
            },
            |interval, point| {
                let projection = point.dot(axis);
                Interval {
                    min: interval.min.min(projection),
                    max: interval.max.max(projection),
                }
            },
        )
    }

    /// Length of the shared range; zero or negative when disjoint.
    pub fn overlap(&self, other: &Interval) -> f32 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}

/// Helper utilities for box corners, projections and bounding radii.
pub struct ShapeUtil;

impl ShapeUtil {
    /// World-space corners of an axis-aligned box, counter-clockwise.
    pub fn aabb_vertices(position: Vec2, aabb: &Aabb) -> [Vec2; 4] {
        let h = aabb.half_extents;
        [
            position + Vec2::new(-h.x, -h.y),
            position + Vec2::new(h.x, -h.y),
            position + Vec2::new(h.x, h.y),
            position + Vec2::new(-h.x, h.y),
        ]
    }

    /// World-space corners of an oriented box, counter-clockwise.
    pub fn obb_vertices(position: Vec2, obb: &Obb) -> [Vec2; 4] {
        let h = obb.half_extents;
        let transform = obb.transform();
        [
            position + transform * Vec2::new(-h.x, -h.y),
            position + transform * Vec2::new(h.x, -h.y),
            position + transform * Vec2::new(h.x, h.y),
            position + transform * Vec2::new(-h.x, h.y),
        ]
    }

    /// Corners of a box-shaped body; `None` for circles and planes.
    pub fn vertices(body: &Body) -> Option<[Vec2; 4]> {
        match body.shape() {
            Shape::Aabb(aabb) => Some(Self::aabb_vertices(body.position, aabb)),
            Shape::Obb(obb) => Some(Self::obb_vertices(body.position, obb)),
            Shape::Circle(_) | Shape::Plane(_) => None,
        }
    }

    /// Projection of a body onto `axis` (assumed unit length).
    pub fn interval(body: &Body, axis: Vec2) -> Interval {
        match body.shape() {
            Shape::Circle(circle) => {
                let centre = body.position.dot(axis);
                Interval {
                    min: centre - circle.radius,
                    max: centre + circle.radius,
                }
            }
            Shape::Plane(plane) => Interval::from_points(&[plane.start(), plane.end()], axis),
            Shape::Aabb(aabb) => {
                Interval::from_points(&Self::aabb_vertices(body.position, aabb), axis)
            }
            Shape::Obb(obb) => Interval::from_points(&Self::obb_vertices(body.position, obb), axis),
        }
    }

    pub fn overlap_on_axis(a: &Body, b: &Body, axis: Vec2) -> bool {
        Self::interval(a, axis).overlap(&Self::interval(b, axis)) > 0.0
    }

    /// Extent of a box with `half_extents` along `axes` when projected on `normal`.
    pub fn projected_radius(half_extents: Vec2, axes: [Vec2; 2], normal: Vec2) -> f32 {
        axes[0].dot(normal).abs() * half_extents.x + axes[1].dot(normal).abs() * half_extents.y
    }

    pub fn bounding_radius(shape: &Shape) -> f32 {
        match shape {
            Shape::Aabb(aabb) => aabb.half_extents.length(),
            Shape::Obb(obb) => obb.half_extents.length(),
            Shape::Circle(circle) => circle.radius,
            Shape::Plane(_) => f32::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Color;
    use approx::assert_relative_eq;

    #[test]
    fn interval_overlap_is_signed() {
        let a = Interval { min: 0.0, max: 2.0 };
        let b = Interval { min: 1.5, max: 4.0 };
        let c = Interval { min: 3.0, max: 4.0 };
        assert_relative_eq!(a.overlap(&b), 0.5);
        assert!(a.overlap(&c) < 0.0);
    }

    #[test]
    fn rotated_box_projects_wider() {
        let body = Body::obb(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::ONE,
            std::f32::consts::FRAC_PI_4,
            1.0,
            Color::WHITE,
        )
        .unwrap();
        let interval = ShapeUtil::interval(&body, Vec2::X);
        assert_relative_eq!(interval.max, std::f32::consts::SQRT_2, epsilon = 1e-5);
        assert_relative_eq!(interval.min, -std::f32::consts::SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn overlap_on_axis_detects_gap() {
        let a = Body::aabb(Vec2::ZERO, Vec2::ZERO, 2.0, 2.0, 1.0, Color::WHITE).unwrap();
        let b = Body::aabb(Vec2::new(3.0, 0.0), Vec2::ZERO, 2.0, 2.0, 1.0, Color::WHITE).unwrap();
        assert!(!ShapeUtil::overlap_on_axis(&a, &b, Vec2::X));
        assert!(ShapeUtil::overlap_on_axis(&a, &b, Vec2::Y));
    }

    #[test]
    fn circles_have_no_corners() {
        let ball = Body::circle(Vec2::ZERO, Vec2::ZERO, 2.0, 1.0, Color::WHITE).unwrap();
        assert!(ShapeUtil::vertices(&ball).is_none());
        assert_eq!(ShapeUtil::bounding_radius(ball.shape()), 2.0);

        let rect = Body::aabb(Vec2::new(1.0, 1.0), Vec2::ZERO, 2.0, 4.0, 1.0, Color::WHITE).unwrap();
        let corners = ShapeUtil::vertices(&rect).unwrap();
        assert_eq!(corners[0], Vec2::new(0.0, -1.0));
        assert_eq!(corners[2], Vec2::new(2.0, 3.0));
    }
}
