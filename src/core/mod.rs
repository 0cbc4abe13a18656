//! Core data model: particles, bounds and stream emitters.

pub mod particle;
pub mod stream;
pub mod types;

pub use particle::Particle;
pub use stream::ParticleStream;
pub use types::Bounds;
