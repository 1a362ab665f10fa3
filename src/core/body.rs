use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{
    shape::{Aabb, Circle, Obb, Plane, Shape, ShapeKind},
    types::{Color, MassProperties, Material},
};
use crate::{
    config::SimulationBounds,
    error::PhysicsError,
    utils::{allocator::BodyId, math},
};

/// Rigid body: kinematic state, mass, material and geometry in one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation in radians.
    pub rotation: f32,
    pub angular_velocity: f32,
    pub material: Material,
    pub color: Color,
    shape: Shape,
    mass_properties: MassProperties,
    inverse_mass: f32,
    inverse_moment: f32,
    is_kinematic: bool,
}

impl Body {
    pub fn builder(shape: Shape) -> BodyBuilder {
        BodyBuilder::new(shape)
    }

    /// Axis-aligned box from its full width and height.
    pub fn aabb(
        position: Vec2,
        velocity: Vec2,
        width: f32,
        height: f32,
        mass: f32,
        color: Color,
    ) -> Result<Self, PhysicsError> {
        Self::builder(Shape::Aabb(Aabb::from_size(width, height)?))
            .position(position)
            .velocity(velocity)
            .mass(mass)
            .color(color)
            .build()
    }

    /// Oriented box from its half extents and initial rotation (radians).
    pub fn obb(
        position: Vec2,
        velocity: Vec2,
        half_extents: Vec2,
        rotation: f32,
        mass: f32,
        color: Color,
    ) -> Result<Self, PhysicsError> {
        Self::builder(Shape::Obb(Obb::new(half_extents)?))
            .position(position)
            .velocity(velocity)
            .rotation(rotation)
            .mass(mass)
            .color(color)
            .build()
    }

    pub fn circle(
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        mass: f32,
        color: Color,
    ) -> Result<Self, PhysicsError> {
        Self::builder(Shape::Circle(Circle::new(radius)?))
            .position(position)
            .velocity(velocity)
            .mass(mass)
            .color(color)
            .build()
    }

    /// Immovable plane `dot(p, normal) = distance`.
    pub fn plane(normal: Vec2, distance: f32) -> Result<Self, PhysicsError> {
        Self::builder(Shape::Plane(Plane::new(normal, distance)?))
            .mass(0.0)
            .build()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Mutable access to a plane's geometry; `None` for other shapes.
    pub fn plane_mut(&mut self) -> Option<&mut Plane> {
        match &mut self.shape {
            Shape::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    pub fn mass(&self) -> f32 {
        self.mass_properties.mass
    }

    pub fn moment(&self) -> f32 {
        self.mass_properties.moment
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn inverse_moment(&self) -> f32 {
        self.inverse_moment
    }

    pub fn mass_properties(&self) -> MassProperties {
        self.mass_properties
    }

    pub fn is_kinematic(&self) -> bool {
        self.is_kinematic
    }

    pub fn set_velocity(&mut self, linear: Vec2, angular: f32) {
        self.velocity = linear;
        self.angular_velocity = angular;
    }

    /// Planes always stay kinematic.
    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.is_kinematic = kinematic || self.kind() == ShapeKind::Plane;
        self.recompute_inverses();
    }

    pub fn set_mass_properties(&mut self, props: MassProperties) -> Result<(), PhysicsError> {
        validate_mass(props.mass)?;
        validate_mass(props.moment)?;
        self.mass_properties = props;
        self.recompute_inverses();
        Ok(())
    }

    /// Adds `force * inverse_mass` to the velocity and the torque of `force`
    /// about the world origin, lever arm being the body position, to the spin.
    ///
    /// Used for forces and one-shot impulses alike; callers scale `force`.
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity += force * self.inverse_mass;
        self.angular_velocity += math::cross(self.position, force) * self.inverse_moment;
    }

    /// Moves the body and refreshes derived bounds in one go.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_derived();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.refresh_derived();
    }

    /// Recomputes AABB min/max and the OBB transform from the current pose.
    pub fn refresh_derived(&mut self) {
        self.shape.refresh(self.position, self.rotation);
    }

    /// World-space bounds of the body; planes report their drawn segment.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match &self.shape {
            Shape::Aabb(aabb) => (
                self.position - aabb.half_extents,
                self.position + aabb.half_extents,
            ),
            Shape::Obb(obb) => {
                let [x_axis, y_axis] = obb.axes();
                let reach = x_axis.abs() * obb.half_extents.x + y_axis.abs() * obb.half_extents.y;
                (self.position - reach, self.position + reach)
            }
            Shape::Circle(circle) => (
                self.position - Vec2::splat(circle.radius),
                self.position + Vec2::splat(circle.radius),
            ),
            Shape::Plane(plane) => (plane.start().min(plane.end()), plane.start().max(plane.end())),
        }
    }

    /// True once the body has completely left `window`.
    pub fn is_outside(&self, window: &SimulationBounds) -> bool {
        let (min, max) = self.bounds();
        window.excludes(min, max)
    }

    pub(crate) fn zero_drag(&mut self) {
        self.material.linear_drag = 0.0;
        self.material.angular_drag = 0.0;
    }

    fn recompute_inverses(&mut self) {
        if self.is_kinematic {
            self.inverse_mass = 0.0;
            self.inverse_moment = 0.0;
        } else {
            self.inverse_mass = math::inverse_or_zero(self.mass_properties.mass);
            self.inverse_moment = math::inverse_or_zero(self.mass_properties.moment);
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} vel {} rot {:.3}{}",
            self.shape,
            self.position,
            self.velocity,
            self.rotation,
            if self.is_kinematic { " (kinematic)" } else { "" }
        )
    }
}

/// Builder validating construction parameters before a body exists.
pub struct BodyBuilder {
    shape: Shape,
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    angular_velocity: f32,
    mass: f32,
    moment: Option<f32>,
    material: Material,
    color: Color,
    is_kinematic: bool,
}

impl BodyBuilder {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            mass: 1.0,
            moment: None,
            material: Material::default(),
            color: Color::default(),
            is_kinematic: false,
        }
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Zero mass makes the body immovable.
    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Overrides the moment of inertia derived from shape and mass.
    pub fn moment(mut self, moment: f32) -> Self {
        self.moment = Some(moment);
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn restitution(mut self, restitution: f32) -> Self {
        self.material.restitution = restitution;
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.material.friction = friction;
        self
    }

    pub fn drag(mut self, linear: f32, angular: f32) -> Self {
        self.material.linear_drag = linear;
        self.material.angular_drag = angular;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn kinematic(mut self, is_kinematic: bool) -> Self {
        self.is_kinematic = is_kinematic;
        self
    }

    pub fn build(self) -> Result<Body, PhysicsError> {
        validate_mass(self.mass)?;
        self.material.validate()?;
        let moment = match self.moment {
            Some(moment) => {
                validate_mass(moment)?;
                moment
            }
            None => self.shape.moment_for_mass(self.mass),
        };
        if !(self.position.is_finite() && self.rotation.is_finite()) {
            return Err(PhysicsError::NonFiniteState("pose"));
        }
        if !(self.velocity.is_finite() && self.angular_velocity.is_finite()) {
            return Err(PhysicsError::NonFiniteState("velocity"));
        }

        let is_plane = self.shape.kind() == ShapeKind::Plane;
        let mut body = Body {
            id: BodyId::default(),
            position: self.position,
            velocity: if is_plane { Vec2::ZERO } else { self.velocity },
            rotation: self.rotation,
            angular_velocity: if is_plane { 0.0 } else { self.angular_velocity },
            material: self.material,
            color: self.color,
            shape: self.shape,
            mass_properties: MassProperties {
                mass: self.mass,
                moment,
            },
            inverse_mass: 0.0,
            inverse_moment: 0.0,
            is_kinematic: false,
        };
        body.set_kinematic(self.is_kinematic);
        body.refresh_derived();
        Ok(body)
    }
}

fn validate_mass(mass: f32) -> Result<(), PhysicsError> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}
