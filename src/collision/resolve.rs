//! Collision response for particle-vs-wall and particle-vs-particle contacts.

use crate::{
    config::{BOUNCINESS, COINCIDENT_EPSILON, COLLISION_HEAT_FACTOR, MAX_TEMPERATURE},
    core::{particle::Particle, types::Bounds},
};

/// Reflects a particle off the bounding box and clamps it back inside.
///
/// Each axis is handled independently so a particle in a corner bounces off
/// both walls in a single call. Restitution is 1, no energy is removed.
pub fn resolve_boundary_collision(particle: &mut Particle, bounds: &Bounds, radius: f32) {
    let min = bounds.bottom_left;
    let max = bounds.top_right;

    if particle.position.x - radius < min.x {
        particle.position.x = min.x + radius;
        particle.velocity.x = -particle.velocity.x;
    } else if particle.position.x + radius > max.x {
        particle.position.x = max.x - radius;
        particle.velocity.x = -particle.velocity.x;
    }

    if particle.position.y - radius < min.y {
        particle.position.y = min.y + radius;
        particle.velocity.y = -particle.velocity.y;
    } else if particle.position.y + radius > max.y {
        particle.position.y = max.y - radius;
        particle.velocity.y = -particle.velocity.y;
    }
}

/// Separates two overlapping particles and applies an elastic impulse.
///
/// Does nothing unless the centres are closer than `2 * radius`. Coincident
/// centres have no usable normal and the pair is skipped for this step.
/// Returns the impulse magnitude applied, zero when only positions moved.
pub fn resolve_particle_collision(a: &mut Particle, b: &mut Particle, radius: f32) -> f32 {
    let delta = a.position - b.position;
    let distance_sq = delta.length_squared();
    let min_distance = 2.0 * radius;

    if distance_sq >= min_distance * min_distance {
        return 0.0;
    }

    let distance = distance_sq.sqrt();
    if distance < COINCIDENT_EPSILON {
        return 0.0;
    }
    let normal = delta / distance;

    // Heavier particles move less.
    let overlap = min_distance - distance;
    let total_mass = a.mass + b.mass;
    let ratio_a = b.mass / total_mass;
    let ratio_b = a.mass / total_mass;
    a.position += normal * (overlap * ratio_a);
    b.position -= normal * (overlap * ratio_b);

    let velocity_along_normal = (a.velocity - b.velocity).dot(normal);
    if velocity_along_normal >= 0.0 {
        return 0.0;
    }

    let impulse_scalar = -(1.0 + BOUNCINESS) * velocity_along_normal;
    let impulse = impulse_scalar / (a.inverse_mass() + b.inverse_mass());

    a.velocity += normal * (impulse / a.mass);
    b.velocity -= normal * (impulse / b.mass);

    let heat = impulse.abs() * COLLISION_HEAT_FACTOR;
    a.temperature = (a.temperature + heat).min(MAX_TEMPERATURE);
    b.temperature = (b.temperature + heat).min(MAX_TEMPERATURE);

    impulse
}

/// Mutable references to two distinct particles of a slice.
///
/// Returns `None` when `i == j` or either index is out of range.
pub fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> Option<(&mut Particle, &mut Particle)> {
    if i == j || i >= particles.len() || j >= particles.len() {
        return None;
    }

    let (low, high, flipped) = if i < j { (i, j, false) } else { (j, i, true) };
    let (left, right) = particles.split_at_mut(high);
    let first = &mut left[low];
    let second = &mut right[0];

    if flipped {
        Some((second, first))
    } else {
        Some((first, second))
    }
}
