//! Simulation dynamics: forces, integration and the per-step driver.

pub mod forces;
pub mod integrator;
pub mod stepper;

pub use forces::{AirResistance, ForceGenerator, ForceRegistry, GravityForce};
pub use integrator::Integrator;
pub use stepper::PhysicsStepper;
