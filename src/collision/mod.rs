//! Collision detection and response: uniform-grid broad phase, wall and particle resolution.

pub mod broadphase;
pub mod resolve;

pub use broadphase::{brute_force_pairs, SpatialGrid};
pub use resolve::{pair_mut, resolve_boundary_collision, resolve_particle_collision};
