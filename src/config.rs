//! Global configuration constants and per-world settings for the Impulse2D engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Default gravity vector applied in the physics world (Y-up).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -9.81];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Upper bound on banked frame time, limits catch-up after a stall.
pub const MAX_ACCUMULATED_TIME: f32 = 0.2;

/// Linear speed below which a body is snapped to rest.
pub const MIN_LINEAR_THRESHOLD: f32 = 0.1;

/// Angular speed below which a body stops spinning.
pub const MIN_ROTATION_THRESHOLD: f32 = 0.01;

/// Penetration allowance that positional correction leaves untouched.
pub const PENETRATION_SLOP: f32 = 0.03;

/// Scale applied to the positional correction past the slop.
pub const CORRECTION_FACTOR: f32 = 3.0;

/// Multiplier on the combined restitution. 1.0 keeps `min(eA, eB)` as is.
pub const RESTITUTION_SCALE: f32 = 1.0;

/// Default damping applied to linear velocity.
pub const DEFAULT_LINEAR_DRAG: f32 = 0.3;

/// Default damping applied to angular velocity.
pub const DEFAULT_ANGULAR_DRAG: f32 = 0.3;

pub const DEFAULT_RESTITUTION: f32 = 1.0;

pub const DEFAULT_FRICTION: f32 = 0.7;

/// Half length of the segment used to draw and bound an infinite plane.
pub const PLANE_SEGMENT_HALF_LENGTH: f32 = 300.0;

/// Knobs of the contact resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub slop: f32,
    pub correction_factor: f32,
    pub restitution_scale: f32,
    pub friction_enabled: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            slop: PENETRATION_SLOP,
            correction_factor: CORRECTION_FACTOR,
            restitution_scale: RESTITUTION_SCALE,
            friction_enabled: true,
        }
    }
}

/// Axis-aligned window outside of which dynamic bodies are culled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl SimulationBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// True when the box `[min, max]` shares no area with the window.
    pub fn excludes(&self, min: Vec2, max: Vec2) -> bool {
        max.x < self.min.x || min.x > self.max.x || max.y < self.min.y || min.y > self.max.y
    }
}

/// Per-world configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity: Vec2,
    pub time_step: f32,
    pub max_accumulated_time: f32,
    pub resolver: ResolverSettings,
    pub bounds: Option<SimulationBounds>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            time_step: DEFAULT_TIME_STEP,
            max_accumulated_time: MAX_ACCUMULATED_TIME,
            resolver: ResolverSettings::default(),
            bounds: None,
        }
    }
}

impl WorldSettings {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_bounds(mut self, bounds: SimulationBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverSettings) -> Self {
        self.resolver = resolver;
        self
    }

    /// Rejects settings that would stall or poison the stepping loop.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidSettings("gravity must be finite"));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PhysicsError::InvalidSettings("time step must be positive"));
        }
        if !(self.max_accumulated_time.is_finite() && self.max_accumulated_time >= self.time_step)
        {
            return Err(PhysicsError::InvalidSettings(
                "max accumulated time must cover at least one time step",
            ));
        }
        let resolver = &self.resolver;
        if !(resolver.slop.is_finite() && resolver.slop >= 0.0) {
            return Err(PhysicsError::InvalidSettings("slop must be non-negative"));
        }
        if !(resolver.correction_factor.is_finite() && resolver.correction_factor >= 0.0) {
            return Err(PhysicsError::InvalidSettings(
                "correction factor must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&resolver.restitution_scale) {
            return Err(PhysicsError::InvalidSettings(
                "restitution scale must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WorldSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_time_step() {
        let settings = WorldSettings::default().with_time_step(0.0);
        assert!(matches!(
            settings.validate(),
            Err(PhysicsError::InvalidSettings(_))
        ));
    }

    #[test]
    fn bounds_exclude_only_disjoint_boxes() {
        let bounds = SimulationBounds::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        assert!(!bounds.excludes(Vec2::new(9.0, 0.0), Vec2::new(11.0, 1.0)));
        assert!(bounds.excludes(Vec2::new(10.5, 0.0), Vec2::new(11.0, 1.0)));
    }
}
