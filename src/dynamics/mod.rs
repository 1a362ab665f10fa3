//! Simulation dynamics: per-body integration and contact resolution.

pub mod integrator;
pub mod solver;

pub use integrator::Integrator;
pub use solver::{Resolution, Resolver};
