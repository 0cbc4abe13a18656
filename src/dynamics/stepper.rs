use std::time::Instant;

use crate::{
    collision::resolve::{pair_mut, resolve_boundary_collision, resolve_particle_collision},
    config::{SimulationConfig, DEFAULT_CELL_SIZE_FACTOR},
    dynamics::{forces::ForceRegistry, integrator::Integrator},
    error::Result,
    utils::profiling::{self, ScopedTimer},
    world::Simulation,
};

/// Drives one fixed-size physics step over a [`Simulation`].
///
/// Within a step the order is integrate (with the wall bounce of each
/// particle), then particle-particle collisions, then stream spawning.
/// Particles spawned by a step are first integrated and collided by the next.
pub struct PhysicsStepper {
    forces: ForceRegistry,
    integrator: Integrator,
    cell_size_factor: f32,
    pairs: Vec<(usize, usize)>,
    profiler: profiling::StepProfiler,
}

impl Default for PhysicsStepper {
    fn default() -> Self {
        Self::new(ForceRegistry::with_gravity(
            SimulationConfig::default().gravity,
            0.0,
        ))
    }
}

impl PhysicsStepper {
    pub fn new(forces: ForceRegistry) -> Self {
        Self {
            forces,
            integrator: Integrator::new(),
            cell_size_factor: DEFAULT_CELL_SIZE_FACTOR,
            pairs: Vec::new(),
            profiler: profiling::StepProfiler::default(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut stepper = Self::new(ForceRegistry::with_gravity(
            config.gravity,
            config.air_resistance,
        ));
        stepper.cell_size_factor = config.cell_size_factor;
        Ok(stepper)
    }

    pub fn forces_mut(&mut self) -> &mut ForceRegistry {
        &mut self.forces
    }

    pub fn cell_size_factor(&self) -> f32 {
        self.cell_size_factor
    }

    pub fn profiler(&self) -> &profiling::StepProfiler {
        &self.profiler
    }

    pub fn profiler_mut(&mut self) -> &mut profiling::StepProfiler {
        &mut self.profiler
    }

    /// Advances `sim` by one fixed step of `dt` seconds.
    pub fn step(&mut self, sim: &mut Simulation, dt: f32, use_spatial_partitioning: bool) {
        let started = Instant::now();

        self.integrate(sim, dt);

        if use_spatial_partitioning {
            self.collide_with_grid(sim);
        } else {
            self.collide_brute_force(sim);
        }

        {
            let _timer = ScopedTimer::new("physics::spawn", &mut self.profiler.spawn_time);
            sim.update_streams(dt);
        }

        self.profiler.steps += 1;
        self.profiler.particle_count = sim.particle_count();
        self.profiler.total_time += started.elapsed();
    }

    fn integrate(&mut self, sim: &mut Simulation, dt: f32) {
        let _timer = ScopedTimer::new("physics::integrate", &mut self.profiler.integrate_time);
        let bounds = *sim.bounds();
        let radius = sim.particle_radius();

        for particle in sim.particles_mut() {
            self.forces.accumulate(particle);
            self.integrator.integrate(particle, dt);
            resolve_boundary_collision(particle, &bounds, radius);
        }
    }

    fn collide_brute_force(&mut self, sim: &mut Simulation) {
        let _timer = ScopedTimer::new("physics::collide", &mut self.profiler.collision_time);
        let radius = sim.particle_radius();
        let particles = sim.particles_mut();
        let count = particles.len();

        for i in 0..count {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                resolve_particle_collision(a, b, radius);
            }
        }
    }

    fn collide_with_grid(&mut self, sim: &mut Simulation) {
        let radius = sim.particle_radius();
        let cell_size = self.cell_size_factor * 2.0 * radius;

        let rebuilt = {
            let _timer = ScopedTimer::new("physics::broad_phase", &mut self.profiler.broad_phase_time);
            let rebuilt = sim.rebuild_spatial_grid(cell_size);
            if rebuilt.is_ok() {
                sim.candidate_pairs_into(2.0 * radius, &mut self.pairs);
            }
            rebuilt
        };
        if let Err(err) = rebuilt {
            log::warn!("spatial grid unavailable ({err}), falling back to brute force");
            self.collide_brute_force(sim);
            return;
        }
        self.profiler.candidate_pairs += self.pairs.len();

        let _timer = ScopedTimer::new("physics::collide", &mut self.profiler.collision_time);
        let particles = sim.particles_mut();
        for &(i, j) in &self.pairs {
            if let Some((a, b)) = pair_mut(particles, i, j) {
                resolve_particle_collision(a, b, radius);
            }
        }
    }
}
