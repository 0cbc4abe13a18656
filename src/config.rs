//! Global configuration constants and the serializable simulation config.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Default gravity vector applied to every particle (Y-up).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -9.80665];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Temperature a particle starts at and cools back towards.
pub const AMBIENT_TEMPERATURE: f32 = 20.0;

/// Upper clamp for particle temperature.
pub const MAX_TEMPERATURE: f32 = 100.0;

/// Speed above which a particle heats up instead of cooling down.
pub const HEATING_SPEED_THRESHOLD: f32 = 5.0;

/// Temperature gained per step while moving fast.
pub const HEATING_RATE: f32 = 0.1;

/// Temperature lost per step while moving slowly.
pub const COOLING_RATE: f32 = 0.05;

/// Scales collision impulse magnitude into temperature gain.
pub const COLLISION_HEAT_FACTOR: f32 = 0.01;

/// Coefficient of restitution, 0 (inelastic) to 1 (perfectly elastic).
pub const BOUNCINESS: f32 = 1.0;

/// Distance under which two particle centres are treated as coincident.
pub const COINCIDENT_EPSILON: f32 = 1e-5;

/// Broad-phase cell size as a multiple of the particle diameter.
pub const DEFAULT_CELL_SIZE_FACTOR: f32 = 2.1;

/// Smallest cell size factor that still keeps colliding pairs in neighbouring cells.
pub const MIN_CELL_SIZE_FACTOR: f32 = 2.0;

/// Cells a spatial grid may always allocate, regardless of particle count.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Extra grid cells allowed per particle on top of [`MAX_GRID_CELLS`].
pub const GRID_CELLS_PER_PARTICLE: usize = 16;

/// Hard cap on fixed steps executed for a single frame.
pub const DEFAULT_MAX_STEPS: u32 = 1000;

/// Longest wall-clock frame the fixed-timestep clock will account for (seconds).
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Number of frames averaged for FPS reporting.
pub const FRAME_STATS_WINDOW: usize = 120;

/// Velocity given to every particle of a bulk grid created with initial velocity.
pub const DEFAULT_GRID_VELOCITY: [f32; 2] = [10.0, -10.0];

/// Tunables supplied by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub fixed_time_step: f32,
    pub gravity: Vec2,
    /// Linear drag coefficient; the force is `-air_resistance * velocity`.
    pub air_resistance: f32,
    pub cell_size_factor: f32,
    pub use_spatial_partitioning: bool,
    pub max_steps_per_frame: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: DEFAULT_TIME_STEP,
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            air_resistance: 0.0,
            cell_size_factor: DEFAULT_CELL_SIZE_FACTOR,
            use_spatial_partitioning: true,
            max_steps_per_frame: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_time_step.is_finite() && self.fixed_time_step > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "fixed_time_step must be > 0, got {}",
                self.fixed_time_step
            )));
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig("gravity must be finite".into()));
        }
        if !(self.air_resistance.is_finite() && self.air_resistance >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "air_resistance must be >= 0, got {}",
                self.air_resistance
            )));
        }
        if !(self.cell_size_factor.is_finite() && self.cell_size_factor >= MIN_CELL_SIZE_FACTOR) {
            return Err(SimError::InvalidConfig(format!(
                "cell_size_factor must be >= {MIN_CELL_SIZE_FACTOR}, got {}",
                self.cell_size_factor
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(SimError::InvalidConfig(
                "max_steps_per_frame must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
