use std::ops::Range;

use glam::Vec2;

use crate::{
    collision::broadphase::SpatialGrid,
    config::DEFAULT_GRID_VELOCITY,
    core::{particle::Particle, stream::ParticleStream, types::Bounds},
    error::{ensure_positive, Result, SimError},
};

/// Owns every particle, the simulation bounds and the stream emitters.
///
/// Particles are never removed or reordered, so an index handed out by
/// [`Simulation::add_particle`] stays valid for the simulation's lifetime.
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    bounds: Bounds,
    particle_radius: f32,
    zoom: f32,
    window_width: u32,
    streams: Vec<ParticleStream>,
    spatial_grid: Option<SpatialGrid>,
}

impl Simulation {
    pub fn new(
        bottom_left: Vec2,
        top_right: Vec2,
        particle_radius: f32,
        window_width: u32,
    ) -> Result<Self> {
        let bounds = Bounds::new(bottom_left, top_right)?;
        ensure_positive("particle radius", particle_radius)?;

        log::debug!(
            "simulation created: bounds {} .. {}, particle radius {particle_radius}",
            bounds.bottom_left,
            bounds.top_right
        );

        Ok(Self {
            particles: Vec::new(),
            bounds,
            particle_radius,
            zoom: 1.0,
            window_width,
            streams: Vec::new(),
            spatial_grid: None,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particle_radius(&self) -> f32 {
        self.particle_radius
    }

    /// Presentation-only scale set by the host; unused by the physics.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn sim_width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn sim_height(&self) -> f32 {
        self.bounds.height()
    }

    pub fn streams(&self) -> &[ParticleStream] {
        &self.streams
    }

    pub fn streams_mut(&mut self) -> &mut [ParticleStream] {
        &mut self.streams
    }

    /// Appends a particle and returns its index.
    pub fn add_particle(&mut self, position: Vec2, velocity: Vec2, mass: f32) -> Result<usize> {
        ensure_positive("particle mass", mass)?;
        Ok(self.push_particle(Particle::new(position, velocity, mass)))
    }

    fn push_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Creates `rows * cols` particles laid out from the top-left interior
    /// corner, rightwards per column and downwards per row.
    ///
    /// The layout is not checked against the bounds; anything placed outside
    /// is pushed back in by the first boundary pass.
    pub fn add_particle_grid(
        &mut self,
        rows: usize,
        cols: usize,
        spacing: Vec2,
        with_initial_velocity: bool,
        mass: f32,
    ) -> Result<Range<usize>> {
        if rows == 0 || cols == 0 {
            return Err(SimError::param(format!(
                "particle grid needs at least one row and column, got {rows}x{cols}"
            )));
        }
        let count = rows.checked_mul(cols).ok_or_else(|| {
            SimError::param(format!("particle grid of {rows}x{cols} overflows"))
        })?;
        ensure_positive("particle mass", mass)?;
        if !spacing.is_finite() {
            return Err(SimError::param("grid spacing must be finite"));
        }

        let radius = self.particle_radius;
        let start = Vec2::new(
            self.bounds.bottom_left.x + radius,
            self.bounds.top_right.y - radius,
        );
        let step = Vec2::splat(2.0 * radius) + spacing;
        let velocity = if with_initial_velocity {
            Vec2::from_array(DEFAULT_GRID_VELOCITY)
        } else {
            Vec2::ZERO
        };

        let first = self.particles.len();
        self.particles.reserve(count);
        for row in 0..rows {
            for col in 0..cols {
                let position = Vec2::new(
                    start.x + col as f32 * step.x,
                    start.y - row as f32 * step.y,
                );
                self.push_particle(Particle::new(position, velocity, mass));
            }
        }

        log::debug!("added {rows}x{cols} particle grid (indices {first}..{})", self.particles.len());
        Ok(first..self.particles.len())
    }

    /// Registers an emitter just inside the top-left corner, shifted right and
    /// down by `offset`. Returns the stream's index.
    pub fn add_particle_stream(
        &mut self,
        total: u32,
        spawn_rate: f32,
        velocity: Vec2,
        mass: f32,
        offset: Vec2,
    ) -> Result<usize> {
        let radius = self.particle_radius;
        let start = Vec2::new(
            self.bounds.bottom_left.x + radius + offset.x,
            self.bounds.top_right.y - radius - offset.y,
        );
        let stream = ParticleStream::new(start, velocity, total, spawn_rate, mass)?;

        log::debug!(
            "stream registered at {start}: {total} particles every {:.3}s",
            stream.spawn_interval
        );
        self.streams.push(stream);
        Ok(self.streams.len() - 1)
    }

    /// Advances every stream by `dt` and emits the particles that came due.
    /// Returns how many particles were spawned.
    pub fn update_streams(&mut self, dt: f32) -> usize {
        let mut spawned = 0;
        for stream in &mut self.streams {
            let due = stream.tick(dt);
            for _ in 0..due {
                self.particles
                    .push(Particle::new(stream.start_position, stream.velocity, stream.mass));
            }
            if due > 0 && stream.is_complete() {
                log::debug!("stream at {} exhausted after {} particles", stream.start_position, stream.total);
            }
            spawned += due as usize;
        }
        spawned
    }

    /// Clears and refills the owned spatial grid, reallocating it only when
    /// `cell_size` differs from the current one.
    pub fn rebuild_spatial_grid(&mut self, cell_size: f32) -> Result<()> {
        let needs_alloc = self
            .spatial_grid
            .as_ref()
            .is_none_or(|grid| grid.cell_size() != cell_size);
        if needs_alloc {
            self.spatial_grid = Some(SpatialGrid::new(
                self.bounds.bottom_left,
                self.bounds.top_right,
                cell_size,
                self.particles.len(),
            )?);
        }
        if let Some(grid) = self.spatial_grid.as_mut() {
            grid.rebuild(&self.particles);
        }
        Ok(())
    }

    pub fn spatial_grid(&self) -> Option<&SpatialGrid> {
        self.spatial_grid.as_ref()
    }

    /// Fills `pairs` with candidate pairs from the last grid rebuild.
    pub fn candidate_pairs_into(&self, max_distance: f32, pairs: &mut Vec<(usize, usize)>) {
        match &self.spatial_grid {
            Some(grid) => grid.potential_pairs_into(&self.particles, max_distance, pairs),
            None => pairs.clear(),
        }
    }
}
