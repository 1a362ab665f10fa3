use glam::Vec2;
use log::{debug, log_enabled, Level};

use crate::{
    collision::{
        contact::Manifold,
        shapes::{Interval, ShapeUtil},
    },
    core::{
        body::Body,
        shape::{Aabb, Circle, Obb, Plane, Shape},
    },
    dynamics::solver::{Resolution, Resolver},
    utils::math,
};

/// Which resolver a detected contact is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Pair,
    /// Body A is a plane.
    PlaneFirst,
    /// Body B is a plane.
    PlaneSecond,
}

/// Narrow phase dispatcher: one exact test per ordered pair of shapes.
///
/// Every test writes its normal pointing from the first body toward the
/// second. Reverse-ordered pairs run the canonical test with swapped
/// arguments and negate the normal.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Runs the pair test and, on overlap, resolves the contact in place.
    pub fn collide(
        body_a: &mut Body,
        body_b: &mut Body,
        manifold: &mut Manifold,
        resolver: &Resolver,
    ) -> bool {
        manifold.clear();
        let Some(hit) = Self::dispatch(body_a, body_b, manifold) else {
            return false;
        };

        let resolution = match hit {
            Hit::Pair => resolver.resolve(body_a, body_b, manifold),
            Hit::PlaneFirst => resolver.resolve_plane(body_a, body_b, manifold),
            Hit::PlaneSecond => resolver.resolve_plane(body_b, body_a, &manifold.reversed()),
        };
        Self::log_contact(body_a, body_b, manifold, resolution);
        true
    }

    /// Detection only: fills `manifold` on overlap and leaves both bodies untouched.
    pub fn detect(body_a: &Body, body_b: &Body, manifold: &mut Manifold) -> bool {
        manifold.clear();
        Self::dispatch(body_a, body_b, manifold).is_some()
    }

    fn dispatch(a: &Body, b: &Body, m: &mut Manifold) -> Option<Hit> {
        let hit = match (a.shape(), b.shape()) {
            (Shape::Aabb(box_a), Shape::Aabb(box_b)) => Self::aabb_to_aabb(a, box_a, b, box_b, m),
            (Shape::Aabb(box_a), Shape::Obb(obb_b)) => Self::aabb_to_obb(a, box_a, b, obb_b, m),
            (Shape::Aabb(box_a), Shape::Circle(circle_b)) => {
                Self::aabb_to_circle(a, box_a, b, circle_b, m)
            }
            (Shape::Obb(obb_a), Shape::Aabb(box_b)) => {
                Self::swapped(m, |m| Self::aabb_to_obb(b, box_b, a, obb_a, m))
            }
            (Shape::Obb(obb_a), Shape::Obb(obb_b)) => Self::obb_to_obb(a, obb_a, b, obb_b, m),
            (Shape::Obb(obb_a), Shape::Circle(circle_b)) => {
                Self::obb_to_circle(a, obb_a, b, circle_b, m)
            }
            (Shape::Circle(circle_a), Shape::Aabb(box_b)) => {
                Self::swapped(m, |m| Self::aabb_to_circle(b, box_b, a, circle_a, m))
            }
            (Shape::Circle(circle_a), Shape::Obb(obb_b)) => {
                Self::swapped(m, |m| Self::obb_to_circle(b, obb_b, a, circle_a, m))
            }
            (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
                Self::circle_to_circle(a, circle_a, b, circle_b, m)
            }
            (Shape::Plane(_), Shape::Plane(_)) => false,
            (Shape::Plane(plane_a), _) => {
                return Self::plane_to_shape(plane_a, b, m).then_some(Hit::PlaneFirst);
            }
            (_, Shape::Plane(plane_b)) => {
                return Self::swapped(m, |m| Self::plane_to_shape(plane_b, a, m))
                    .then_some(Hit::PlaneSecond);
            }
        };
        hit.then_some(Hit::Pair)
    }

    /// Runs a test written for the reverse order and flips its normal back.
    fn swapped(manifold: &mut Manifold, test: impl FnOnce(&mut Manifold) -> bool) -> bool {
        let hit = test(manifold);
        if hit {
            manifold.normal = -manifold.normal;
        }
        hit
    }

    fn aabb_to_aabb(a: &Body, box_a: &Aabb, b: &Body, box_b: &Aabb, m: &mut Manifold) -> bool {
        let delta = b.position - a.position;
        let overlap = box_a.half_extents + box_b.half_extents - delta.abs();
        if overlap.x <= 0.0 || overlap.y <= 0.0 {
            return false;
        }

        if overlap.x < overlap.y {
            m.set_contact(Vec2::new(sign(delta.x), 0.0), overlap.x);
        } else {
            m.set_contact(Vec2::new(0.0, sign(delta.y)), overlap.y);
        }
        true
    }

    fn circle_to_circle(
        a: &Body,
        circle_a: &Circle,
        b: &Body,
        circle_b: &Circle,
        m: &mut Manifold,
    ) -> bool {
        let delta = b.position - a.position;
        let distance_sq = delta.length_squared();
        let radius_sum = circle_a.radius + circle_b.radius;
        if distance_sq >= radius_sum * radius_sum {
            return false;
        }

        let distance = distance_sq.sqrt();
        if distance == 0.0 {
            m.set_contact(Vec2::X, radius_sum);
        } else {
            m.set_contact(delta / distance, radius_sum - distance);
        }
        true
    }

    fn aabb_to_circle(a: &Body, box_a: &Aabb, b: &Body, circle_b: &Circle, m: &mut Manifold) -> bool {
        let local_centre = b.position - a.position;
        match box_circle_contact(box_a.half_extents, local_centre, circle_b.radius) {
            Some((normal, penetration)) => {
                m.set_contact(normal, penetration);
                true
            }
            None => false,
        }
    }

    /// Same as the axis-aligned case, evaluated in the box frame.
    fn obb_to_circle(a: &Body, obb_a: &Obb, b: &Body, circle_b: &Circle, m: &mut Manifold) -> bool {
        let transform = obb_a.transform();
        let local_centre = transform.transpose() * (b.position - a.position);
        match box_circle_contact(obb_a.half_extents, local_centre, circle_b.radius) {
            Some((normal, penetration)) => {
                m.set_contact(transform * normal, penetration);
                true
            }
            None => false,
        }
    }

    fn aabb_to_obb(a: &Body, box_a: &Aabb, b: &Body, obb_b: &Obb, m: &mut Manifold) -> bool {
        let vertices_a = ShapeUtil::aabb_vertices(a.position, box_a);
        let vertices_b = ShapeUtil::obb_vertices(b.position, obb_b);
        let [x_axis, y_axis] = obb_b.axes();
        let axes = [Vec2::X, Vec2::Y, x_axis, y_axis];
        Self::separating_axis_test(a.position, &vertices_a, b.position, &vertices_b, &axes, m)
    }

    fn obb_to_obb(a: &Body, obb_a: &Obb, b: &Body, obb_b: &Obb, m: &mut Manifold) -> bool {
        let vertices_a = ShapeUtil::obb_vertices(a.position, obb_a);
        let vertices_b = ShapeUtil::obb_vertices(b.position, obb_b);
        let [ax, ay] = obb_a.axes();
        let [bx, by] = obb_b.axes();
        let axes = [ax, ay, bx, by];
        Self::separating_axis_test(a.position, &vertices_a, b.position, &vertices_b, &axes, m)
    }

    /// SAT over the given face normals; the contact normal is the axis of
    /// least overlap, signed toward B.
    fn separating_axis_test(
        centre_a: Vec2,
        vertices_a: &[Vec2; 4],
        centre_b: Vec2,
        vertices_b: &[Vec2; 4],
        axes: &[Vec2],
        m: &mut Manifold,
    ) -> bool {
        let relative = centre_b - centre_a;
        let mut min_overlap = f32::MAX;
        let mut min_axis = Vec2::X;

        for &axis in axes {
            let overlap = Interval::from_points(vertices_a, axis)
                .overlap(&Interval::from_points(vertices_b, axis));
            if overlap <= 0.0 {
                return false;
            }
            if overlap < min_overlap {
                min_overlap = overlap;
                min_axis = if relative.dot(axis) < 0.0 { -axis } else { axis };
            }
        }

        m.set_contact(min_axis, min_overlap);
        true
    }

    /// Plane first, any other shape second. The normal points from the plane
    /// toward the body, flipped when the body's centre is behind the plane.
    fn plane_to_shape(plane: &Plane, body: &Body, m: &mut Manifold) -> bool {
        let normal = plane.normal();
        let extent = match body.shape() {
            Shape::Circle(circle) => circle.radius,
            Shape::Aabb(aabb) => ShapeUtil::projected_radius(aabb.half_extents, [Vec2::X, Vec2::Y], normal),
            Shape::Obb(obb) => ShapeUtil::projected_radius(obb.half_extents, obb.axes(), normal),
            Shape::Plane(_) => return false,
        };

        let signed = plane.signed_distance(body.position);
        let (normal, distance) = if signed < 0.0 {
            (-normal, -signed)
        } else {
            (normal, signed)
        };

        let penetration = extent - distance;
        if penetration <= 0.0 {
            return false;
        }
        m.set_contact(normal, penetration);
        true
    }

    fn log_contact(a: &Body, b: &Body, m: &Manifold, resolution: Resolution) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let tag = |body: &Body| if body.is_kinematic() { " (kinematic)" } else { "" };
        debug!(
            "{}{} x {}{} collided: normal {} depth {:.3} -> {:?}",
            a.kind(),
            tag(a),
            b.kind(),
            tag(b),
            m.normal,
            m.penetration,
            resolution
        );
    }
}

/// Circle centre given relative to a box centred at the origin, in the box
/// frame. Returns the normal (box toward circle) and penetration on overlap.
fn box_circle_contact(half_extents: Vec2, centre: Vec2, radius: f32) -> Option<(Vec2, f32)> {
    let closest = centre.clamp(-half_extents, half_extents);

    if closest == centre {
        // Centre inside the box: push out through the nearest face.
        let depth = half_extents - centre.abs();
        return Some(if depth.x < depth.y {
            (Vec2::new(sign(centre.x), 0.0), radius + depth.x)
        } else {
            (Vec2::new(0.0, sign(centre.y)), radius + depth.y)
        });
    }

    let offset = centre - closest;
    let distance_sq = offset.length_squared();
    if distance_sq >= radius * radius {
        return None;
    }
    let distance = distance_sq.sqrt();
    let normal = math::normalize_or(offset, Vec2::X);
    Some((normal, radius - distance))
}

fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::types::Color, utils::allocator::BodyId};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn manifold() -> Manifold {
        Manifold::new(BodyId::new(0, 0), BodyId::new(1, 0))
    }

    fn circle(x: f32, y: f32, radius: f32) -> Body {
        Body::circle(Vec2::new(x, y), Vec2::ZERO, radius, 1.0, Color::WHITE).unwrap()
    }

    fn aabb(x: f32, y: f32, width: f32, height: f32) -> Body {
        Body::aabb(Vec2::new(x, y), Vec2::ZERO, width, height, 1.0, Color::WHITE).unwrap()
    }

    fn obb(x: f32, y: f32, half: Vec2, rotation: f32) -> Body {
        Body::obb(Vec2::new(x, y), Vec2::ZERO, half, rotation, 1.0, Color::WHITE).unwrap()
    }

    #[test]
    fn aabb_pair_picks_axis_of_least_penetration() {
        let a = aabb(0.0, 0.0, 4.0, 4.0);
        let b = aabb(3.5, 1.0, 4.0, 4.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&a, &b, &mut m));
        assert_eq!(m.normal, Vec2::X);
        assert_relative_eq!(m.penetration, 0.5);

        let mut reverse = manifold();
        assert!(NarrowPhase::detect(&b, &a, &mut reverse));
        assert_eq!(reverse.normal, -Vec2::X);
    }

    #[test]
    fn touching_aabbs_do_not_collide() {
        let a = aabb(0.0, 0.0, 2.0, 2.0);
        let b = aabb(2.0, 0.0, 2.0, 2.0);
        let mut m = manifold();
        assert!(!NarrowPhase::detect(&a, &b, &mut m));
        assert_eq!(m.contact_count, 0);
    }

    #[test]
    fn coincident_circles_fall_back_to_x() {
        let a = circle(1.0, 1.0, 2.0);
        let b = circle(1.0, 1.0, 3.0);
        let mut m = manifold();
        assert!(NarrowPhase::detect(&a, &b, &mut m));
        assert_eq!(m.normal, Vec2::X);
        assert_relative_eq!(m.penetration, 5.0);
    }

    #[test]
    fn circle_against_box_edge() {
        let rect = aabb(0.0, 0.0, 4.0, 4.0);
        let ball = circle(0.0, 2.5, 1.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&rect, &ball, &mut m));
        assert_relative_eq!(m.normal.y, 1.0);
        assert_relative_eq!(m.penetration, 0.5);
    }

    #[test]
    fn circle_centre_inside_box_pushes_out_nearest_face() {
        let rect = aabb(0.0, 0.0, 4.0, 4.0);
        let ball = circle(-1.5, 0.2, 1.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&rect, &ball, &mut m));
        assert_eq!(m.normal, -Vec2::X);
        assert_relative_eq!(m.penetration, 1.5);
    }

    #[test]
    fn circle_near_box_corner_misses() {
        let rect = aabb(0.0, 0.0, 2.0, 2.0);
        let ball = circle(1.8, 1.8, 1.0);
        let mut m = manifold();
        assert!(!NarrowPhase::detect(&rect, &ball, &mut m));
    }

    #[test]
    fn rotated_box_overlaps_where_axis_aligned_would_not() {
        let a = obb(0.0, 0.0, Vec2::ONE, FRAC_PI_4);
        let b = aabb(2.1, 0.0, 2.0, 2.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&a, &b, &mut m));
        assert!(m.penetration > 0.0);
        assert!(m.normal.x > 0.9, "normal was {}", m.normal);

        let unrotated = obb(0.0, 0.0, Vec2::ONE, 0.0);
        assert!(!NarrowPhase::detect(&unrotated, &b, &mut m));
    }

    #[test]
    fn obb_pair_normal_points_toward_b() {
        let a = obb(0.0, 0.0, Vec2::new(2.0, 1.0), 0.3);
        let b = obb(0.0, -1.8, Vec2::new(2.0, 1.0), 0.3);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&a, &b, &mut m));
        assert!(m.normal.dot(b.position - a.position) > 0.0);
        assert_relative_eq!(m.normal.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn circle_against_rotated_box() {
        let rotated = obb(0.0, 0.0, Vec2::new(2.0, 0.5), std::f32::consts::FRAC_PI_2);
        // Rotated a quarter turn the box is tall: half height 2 along y.
        let ball = circle(0.0, 2.8, 1.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&rotated, &ball, &mut m));
        assert_relative_eq!(m.normal.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(m.penetration, 0.2, epsilon = 1e-4);

        let mut reverse = manifold();
        assert!(NarrowPhase::detect(&ball, &rotated, &mut reverse));
        assert_eq!(reverse.normal, -m.normal);
    }

    #[test]
    fn plane_flips_for_bodies_behind_it() {
        let ground = Body::plane(Vec2::Y, 0.0).unwrap();
        let above = circle(0.0, 0.5, 1.0);
        let below = circle(0.0, -0.5, 1.0);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&ground, &above, &mut m));
        assert_eq!(m.normal, Vec2::Y);
        assert_relative_eq!(m.penetration, 0.5);

        assert!(NarrowPhase::detect(&ground, &below, &mut m));
        assert_eq!(m.normal, -Vec2::Y);

        assert!(NarrowPhase::detect(&above, &ground, &mut m));
        assert_eq!(m.normal, -Vec2::Y);
    }

    #[test]
    fn plane_against_rotated_box_uses_projected_extent() {
        let ground = Body::plane(Vec2::Y, 0.0).unwrap();
        let tilted = obb(0.0, 1.3, Vec2::ONE, FRAC_PI_4);
        let mut m = manifold();

        assert!(NarrowPhase::detect(&ground, &tilted, &mut m));
        assert_relative_eq!(m.penetration, std::f32::consts::SQRT_2 - 1.3, epsilon = 1e-5);
    }

    #[test]
    fn planes_never_collide_with_each_other() {
        let floor = Body::plane(Vec2::Y, 0.0).unwrap();
        let wall = Body::plane(Vec2::X, 0.0).unwrap();
        let mut m = manifold();
        assert!(!NarrowPhase::detect(&floor, &wall, &mut m));
    }

    #[test]
    fn collide_resolves_plane_contact_on_the_body() {
        let resolver = Resolver::default();
        let mut ball = Body::circle(Vec2::new(0.0, 0.9), Vec2::new(0.0, -3.0), 1.0, 1.0, Color::RED)
            .unwrap();
        let mut ground = Body::plane(Vec2::Y, 0.0).unwrap();
        let mut m = manifold();

        assert!(NarrowPhase::collide(&mut ball, &mut ground, &mut m, &resolver));
        assert_eq!(m.normal, -Vec2::Y);
        assert!(ball.velocity.y > 0.0);
        assert_eq!(ground.velocity, Vec2::ZERO);
    }
}
