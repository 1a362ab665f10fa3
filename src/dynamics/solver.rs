use glam::Vec2;
use log::warn;

use crate::{
    collision::contact::Manifold,
    config::ResolverSettings,
    core::body::Body,
    utils::math::NORMALIZE_EPSILON,
};

/// What the resolver did with a manifold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Contact count was zero.
    NoContact,
    /// Bodies already move apart along the normal.
    Separating,
    /// Neither body can receive an impulse.
    Immovable,
    /// Impulses were computed but not finite, nothing was applied.
    Degenerate,
    Applied {
        normal_impulse: f32,
        tangent_impulse: f32,
    },
}

/// Velocity and position changes produced for one contact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ContactResponse {
    velocity_a: Vec2,
    velocity_b: Vec2,
    position_a: Vec2,
    position_b: Vec2,
    normal_impulse: f32,
    tangent_impulse: f32,
}

impl ContactResponse {
    fn is_finite(&self) -> bool {
        self.velocity_a.is_finite()
            && self.velocity_b.is_finite()
            && self.position_a.is_finite()
            && self.position_b.is_finite()
    }
}

/// Single-pass impulse resolver with restitution, Coulomb friction and
/// positional correction.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    pub settings: ResolverSettings,
}

impl Resolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    /// Resolves a contact whose normal points from `body_a` toward `body_b`.
    pub fn resolve(&self, body_a: &mut Body, body_b: &mut Body, manifold: &Manifold) -> Resolution {
        let response = match self.compute(body_a, body_b, manifold) {
            Ok(response) => response,
            Err(skipped) => return skipped,
        };

        if !body_a.is_kinematic() {
            body_a.velocity += response.velocity_a;
            body_a.set_position(body_a.position + response.position_a);
        }
        if !body_b.is_kinematic() {
            body_b.velocity += response.velocity_b;
            body_b.set_position(body_b.position + response.position_b);
        }

        Resolution::Applied {
            normal_impulse: response.normal_impulse,
            tangent_impulse: response.tangent_impulse,
        }
    }

    /// Resolves a plane contact. The plane never moves; `manifold` must have
    /// the plane as A and its normal pointing from the plane toward `body`.
    pub fn resolve_plane(&self, plane: &Body, body: &mut Body, manifold: &Manifold) -> Resolution {
        let response = match self.compute(plane, body, manifold) {
            Ok(response) => response,
            Err(skipped) => return skipped,
        };

        if !body.is_kinematic() {
            body.velocity += response.velocity_b;
            body.set_position(body.position + response.position_b);
        }

        Resolution::Applied {
            normal_impulse: response.normal_impulse,
            tangent_impulse: response.tangent_impulse,
        }
    }

    /// Position bias that pushes the pair apart, before inverse-mass weighting.
    ///
    /// Zero while `penetration` stays within the slop.
    pub fn positional_correction(&self, penetration: f32, inverse_mass_sum: f32, normal: Vec2) -> Vec2 {
        if inverse_mass_sum <= 0.0 {
            return Vec2::ZERO;
        }
        let excess = (penetration - self.settings.slop).max(0.0);
        normal * (excess / inverse_mass_sum * self.settings.correction_factor)
    }

    fn compute(&self, a: &Body, b: &Body, manifold: &Manifold) -> Result<ContactResponse, Resolution> {
        if manifold.contact_count == 0 {
            return Err(Resolution::NoContact);
        }

        let normal = manifold.normal;
        let relative_velocity = b.velocity - a.velocity;
        let velocity_along_normal = relative_velocity.dot(normal);
        if velocity_along_normal > 0.0 {
            return Err(Resolution::Separating);
        }

        let inverse_mass_sum = a.inverse_mass() + b.inverse_mass();
        if inverse_mass_sum <= 0.0 {
            return Err(Resolution::Immovable);
        }

        let contacts = manifold.contact_count as f32;
        let restitution =
            a.material.combined_restitution(&b.material) * self.settings.restitution_scale;

        let j = -(1.0 + restitution) * velocity_along_normal / inverse_mass_sum / contacts;
        let impulse = normal * j;

        let mut response = ContactResponse {
            velocity_a: -impulse * a.inverse_mass(),
            velocity_b: impulse * b.inverse_mass(),
            normal_impulse: j,
            ..ContactResponse::default()
        };

        let correction = self.positional_correction(manifold.penetration, inverse_mass_sum, normal);
        response.position_a = -correction * a.inverse_mass();
        response.position_b = correction * b.inverse_mass();

        if self.settings.friction_enabled {
            let tangent_velocity = relative_velocity - normal * velocity_along_normal;
            let tangent_length_sq = tangent_velocity.length_squared();
            if tangent_length_sq > NORMALIZE_EPSILON {
                let tangent = tangent_velocity / tangent_length_sq.sqrt();
                let limit = j * a.material.combined_friction(&b.material);
                let jt = (-relative_velocity.dot(tangent) / inverse_mass_sum / contacts)
                    .clamp(-limit, limit);
                let friction_impulse = tangent * jt;
                response.velocity_a -= friction_impulse * a.inverse_mass();
                response.velocity_b += friction_impulse * b.inverse_mass();
                response.tangent_impulse = jt;
            }
        }

        if !response.is_finite() {
            warn!(
                "discarding non-finite contact response between {:?} and {:?}",
                manifold.body_a, manifold.body_b
            );
            return Err(Resolution::Degenerate);
        }

        Ok(response)
    }
}
