use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_ANGULAR_DRAG, DEFAULT_FRICTION, DEFAULT_LINEAR_DRAG, DEFAULT_RESTITUTION},
    error::PhysicsError,
};

/// Common math types re-exported for convenience.
pub use glam::{Mat2, Vec2};

/// Cosmetic RGBA colour carried through to debug drawing untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const LIGHT_BLUE: Color = Color::rgba(0.0, 1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mass and scalar moment of inertia.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub mass: f32,
    pub moment: f32,
}

impl Default for MassProperties {
    fn default() -> Self {
        Self {
            mass: 1.0,
            moment: 1.0,
        }
    }
}

/// Material coefficients that affect interactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Bounciness in `[0, 1]`.
    pub restitution: f32,
    /// Coulomb coefficient, combined with the other surface by geometric mean.
    pub friction: f32,
    /// Fraction of linear velocity removed per second, in `[0, 1]`.
    pub linear_drag: f32,
    /// Fraction of angular velocity removed per second, in `[0, 1]`.
    pub angular_drag: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            linear_drag: DEFAULT_LINEAR_DRAG,
            angular_drag: DEFAULT_ANGULAR_DRAG,
        }
    }
}

impl Material {
    /// Restitution of a contact between two materials.
    pub fn combined_restitution(&self, other: &Self) -> f32 {
        self.restitution.min(other.restitution)
    }

    /// Coulomb coefficient of a contact between two materials.
    pub fn combined_friction(&self, other: &Self) -> f32 {
        (self.friction * other.friction).sqrt()
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        let unit = |what, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(PhysicsError::InvalidMaterial { what, value })
            }
        };
        unit("restitution", self.restitution)?;
        unit("linear drag", self.linear_drag)?;
        unit("angular drag", self.angular_drag)?;
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(PhysicsError::InvalidMaterial {
                what: "friction",
                value: self.friction,
            });
        }
        Ok(())
    }
}
