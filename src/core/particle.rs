use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::AMBIENT_TEMPERATURE;

/// Mutable physical state of a single particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Force accumulated for the current step.
    pub force: Vec2,
    pub mass: f32,
    /// Visualisation-only scalar; never feeds back into the dynamics.
    pub temperature: f32,
    /// Reserved for a density/pressure fluid model, never computed.
    pub density: f32,
    /// Reserved for a density/pressure fluid model, never computed.
    pub pressure: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, 1.0)
    }
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity,
            force: Vec2::ZERO,
            mass,
            temperature: AMBIENT_TEMPERATURE,
            density: 0.0,
            pressure: 0.0,
        }
    }

    /// Particle at rest with unit mass.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }
}
