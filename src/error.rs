use thiserror::Error;

use crate::utils::allocator::BodyId;

/// Errors raised while building bodies or mutating the world by id.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("invalid {what}: {value} (must be finite and strictly positive)")]
    InvalidDimension { what: &'static str, value: f32 },
    #[error("invalid mass {0} (must be finite and non-negative)")]
    InvalidMass(f32),
    #[error("invalid {what} coefficient {value}")]
    InvalidMaterial { what: &'static str, value: f32 },
    #[error("plane normal must be finite and non-zero")]
    InvalidPlaneNormal,
    #[error("initial {0} must be finite")]
    NonFiniteState(&'static str),
    #[error("invalid world settings: {0}")]
    InvalidSettings(&'static str),
    #[error("no body with id {0:?} in this world")]
    UnknownBody(BodyId),
}
