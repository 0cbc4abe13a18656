use glam::Vec2;

use crate::core::particle::Particle;

/// External force contributing to a particle's accumulated force each step.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, particle: &mut Particle);
}

/// Constant gravitational acceleration, scaled by mass.
pub struct GravityForce {
    pub gravity: Vec2,
}

impl GravityForce {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for GravityForce {
    fn apply(&self, particle: &mut Particle) {
        particle.force += self.gravity * particle.mass;
    }
}

/// Linear drag opposing the current velocity.
pub struct AirResistance {
    pub coefficient: f32,
}

impl ForceGenerator for AirResistance {
    fn apply(&self, particle: &mut Particle) {
        if self.coefficient == 0.0 {
            return;
        }
        particle.force -= particle.velocity * self.coefficient;
    }
}

/// Collection of forces applied to every particle each step.
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    /// Registry with gravity and, when `air_resistance` is non-zero, drag.
    pub fn with_gravity(gravity: Vec2, air_resistance: f32) -> Self {
        let mut registry = Self::new();
        registry.add_force(GravityForce::new(gravity));
        if air_resistance != 0.0 {
            registry.add_force(AirResistance {
                coefficient: air_resistance,
            });
        }
        registry
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Overwrites the particle's force with the sum of all registered forces.
    pub fn accumulate(&self, particle: &mut Particle) {
        particle.force = Vec2::ZERO;
        for force in &self.forces {
            force.apply(particle);
        }
    }
}
