//! Collision detection: shape projections, contact manifolds and the pairwise narrow phase.

pub mod contact;
pub mod narrowphase;
pub mod shapes;

pub use contact::Manifold;
pub use narrowphase::NarrowPhase;
pub use shapes::{Interval, ShapeUtil};
