use glam::Vec2;

use crate::{
    config::{MIN_LINEAR_THRESHOLD, MIN_ROTATION_THRESHOLD},
    core::body::Body,
};

/// Semi-implicit Euler integrator stepping one body per fixed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Speeds below this snap to zero.
    pub linear_threshold: f32,
    pub rotation_threshold: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            linear_threshold: MIN_LINEAR_THRESHOLD,
            rotation_threshold: MIN_ROTATION_THRESHOLD,
        }
    }
}

impl Integrator {
    pub fn new(linear_threshold: f32, rotation_threshold: f32) -> Self {
        Self {
            linear_threshold,
            rotation_threshold,
        }
    }

    /// Advances `body` by `dt`: gravity, position, rotation, drag, rest
    /// snapping, then refreshed bounds.
    pub fn fixed_update(&self, body: &mut Body, gravity: Vec2, dt: f32) {
        if body.is_kinematic() {
            body.set_velocity(Vec2::ZERO, 0.0);
            body.zero_drag();
            return;
        }

        body.apply_force(gravity * body.mass() * dt);

        body.position += body.velocity * dt;
        body.rotation += body.angular_velocity * dt;

        body.velocity -= body.velocity * body.material.linear_drag * dt;
        body.angular_velocity -= body.angular_velocity * body.material.angular_drag * dt;

        if body.velocity.length() < self.linear_threshold {
            body.velocity = Vec2::ZERO;
        }
        if body.angular_velocity.abs() < self.rotation_threshold {
            body.angular_velocity = 0.0;
        }

        body.refresh_derived();
    }
}
