use crate::{
    config::{
        AMBIENT_TEMPERATURE, COOLING_RATE, HEATING_RATE, HEATING_SPEED_THRESHOLD, MAX_TEMPERATURE,
    },
    core::particle::Particle,
};

/// Semi-implicit Euler integrator with the per-step temperature rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    /// Advances velocity from the accumulated force, then position from the
    /// new velocity, then nudges temperature.
    pub fn integrate(&self, particle: &mut Particle, dt: f32) {
        let acceleration = particle.force / particle.mass;
        particle.velocity += acceleration * dt;
        particle.position += particle.velocity * dt;
        Self::update_temperature(particle);
    }

    /// Fast particles heat towards the maximum, slow ones cool to ambient,
    /// both by a fixed increment per step.
    pub fn update_temperature(particle: &mut Particle) {
        if particle.speed() > HEATING_SPEED_THRESHOLD {
            particle.temperature = (particle.temperature + HEATING_RATE).min(MAX_TEMPERATURE);
        } else {
            particle.temperature = (particle.temperature - COOLING_RATE).max(AMBIENT_TEMPERATURE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    #[test]
    fn velocity_is_updated_before_position() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0);
        p.force = Vec2::new(0.0, -20.0);
        Integrator::new().integrate(&mut p, 0.5);
        assert_eq!(p.velocity, Vec2::new(0.0, -5.0));
        assert_eq!(p.position, Vec2::new(0.0, -2.5));
    }

    #[test]
    fn fast_particles_heat_up_to_the_cap() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(6.0, 0.0), 1.0);
        Integrator::update_temperature(&mut p);
        assert_abs_diff_eq!(p.temperature, AMBIENT_TEMPERATURE + HEATING_RATE, epsilon = 1e-5);

        p.temperature = MAX_TEMPERATURE - 0.01;
        Integrator::update_temperature(&mut p);
        assert_eq!(p.temperature, MAX_TEMPERATURE);
    }

    #[test]
    fn slow_particles_cool_to_ambient_and_stop() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 1.0);
        p.temperature = AMBIENT_TEMPERATURE + 0.07;
        Integrator::update_temperature(&mut p);
        assert_abs_diff_eq!(p.temperature, AMBIENT_TEMPERATURE + 0.02, epsilon = 1e-5);
        Integrator::update_temperature(&mut p);
        assert_eq!(p.temperature, AMBIENT_TEMPERATURE);
    }
}
