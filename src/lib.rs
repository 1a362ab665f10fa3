//! Impulse2D – a small 2D rigid-body collision engine.
//!
//! Bodies carry one of four shapes (axis-aligned box, oriented box, circle,
//! infinite plane). A [`PhysicsWorld`] steps them with a fixed-timestep
//! accumulator, tests every pair with an exact narrow phase and resolves
//! each contact immediately with an impulse carrying restitution, friction
//! and positional correction.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Mat2, Vec2};

pub use collision::{
    contact::Manifold,
    narrowphase::NarrowPhase,
    shapes::{Interval, ShapeUtil},
};
pub use config::{ResolverSettings, SimulationBounds, WorldSettings};
pub use crate::core::{
    body::{Body, BodyBuilder},
    shape::{Aabb, Circle, Obb, Plane, Shape, ShapeKind},
    types::{Color, MassProperties, Material},
};
pub use dynamics::{
    integrator::Integrator,
    solver::{Resolution, Resolver},
};
pub use error::PhysicsError;
pub use utils::allocator::{Arena, BodyId};
pub use world::{PhysicsWorld, StepStats};
