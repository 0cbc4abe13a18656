//! Fluid Particle Sim – 2D particle physics core.
//!
//! Particles fall under gravity inside an axis-aligned box, bounce elastically
//! off its walls and off each other. Particle-particle contacts are found
//! either by brute force or through a uniform spatial grid, and a
//! fixed-timestep clock turns variable frame times into whole physics steps.
//!
//! The crate exposes plain data ([`Particle`] positions, velocities and
//! temperatures) for a rendering layer to read; it does no rendering itself.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod time;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    broadphase::{brute_force_pairs, SpatialGrid},
    resolve::{resolve_boundary_collision, resolve_particle_collision},
};
pub use config::SimulationConfig;
pub use crate::core::{Bounds, Particle, ParticleStream};
pub use dynamics::{
    forces::{AirResistance, ForceGenerator, ForceRegistry, GravityForce},
    integrator::Integrator,
    stepper::PhysicsStepper,
};
pub use error::{Result, SimError};
pub use time::{FixedTimestep, FrameStats, SystemTimeSource, TimeSource};
pub use utils::math::Vec2Ext;
pub use world::Simulation;

/// High-level convenience wrapper that owns a [`Simulation`], its stepper and
/// a wall-clock [`FixedTimestep`].
pub struct ParticleSimulator {
    simulation: Simulation,
    stepper: PhysicsStepper,
    clock: FixedTimestep,
    use_spatial_partitioning: bool,
}

impl ParticleSimulator {
    pub fn new(simulation: Simulation, config: &SimulationConfig) -> Result<Self> {
        let stepper = PhysicsStepper::from_config(config)?;
        let clock = FixedTimestep::with_source(
            SystemTimeSource::default(),
            config.fixed_time_step,
            config.max_steps_per_frame,
        )?;
        Ok(Self {
            simulation,
            stepper,
            clock,
            use_spatial_partitioning: config.use_spatial_partitioning,
        })
    }

    /// Runs however many fixed steps the wall clock says are due.
    pub fn frame(&mut self) -> u32 {
        let steps = self.clock.update();
        self.run_steps(steps);
        steps
    }

    /// Like [`ParticleSimulator::frame`] with an explicit elapsed time.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        let steps = self.clock.advance(frame_time);
        self.run_steps(steps);
        steps
    }

    fn run_steps(&mut self, steps: u32) {
        if steps == 0 {
            return;
        }
        let dt = self.clock.fixed_delta_time();
        let started = std::time::Instant::now();
        for _ in 0..steps {
            self.stepper
                .step(&mut self.simulation, dt, self.use_spatial_partitioning);
        }
        // Stepping slower than the time it simulates cannot keep up.
        utils::logging::warn_if_frame_budget_exceeded(
            started.elapsed(),
            steps as f32 * dt * 1000.0,
        );
    }

    pub fn set_spatial_partitioning(&mut self, enabled: bool) {
        self.use_spatial_partitioning = enabled;
    }

    pub fn spatial_partitioning(&self) -> bool {
        self.use_spatial_partitioning
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn stepper_mut(&mut self) -> &mut PhysicsStepper {
        &mut self.stepper
    }

    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }
}
