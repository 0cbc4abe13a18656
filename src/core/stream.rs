use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Result, SimError};

/// Timed emitter that injects particles at a fixed point.
///
/// Once `spawned == total` the stream goes dormant but stays registered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleStream {
    pub start_position: Vec2,
    pub velocity: Vec2,
    pub total: u32,
    pub spawned: u32,
    pub spawn_interval: f32,
    pub timer: f32,
    pub mass: f32,
    pub active: bool,
}

impl ParticleStream {
    pub fn new(
        start_position: Vec2,
        velocity: Vec2,
        total: u32,
        spawn_rate: f32,
        mass: f32,
    ) -> Result<Self> {
        ensure_positive("spawn rate", spawn_rate)?;
        ensure_positive("stream particle mass", mass)?;
        if !start_position.is_finite() || !velocity.is_finite() {
            return Err(SimError::param("stream position and velocity must be finite"));
        }
        Ok(Self {
            start_position,
            velocity,
            total,
            spawned: 0,
            spawn_interval: 1.0 / spawn_rate,
            timer: 0.0,
            mass,
            active: true,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.spawned >= self.total
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.spawned)
    }

    /// Advances the timer and returns how many particles are due this call.
    ///
    /// The returned count is already added to `spawned`; the caller is
    /// expected to emit exactly that many particles.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.active || self.is_complete() {
            return 0;
        }

        self.timer += dt;

        let mut due = 0;
        while self.timer >= self.spawn_interval && self.spawned < self.total {
            self.spawned += 1;
            self.timer -= self.spawn_interval;
            due += 1;
        }
        due
    }
}
