use glam::Vec2;

use crate::{
    config::{GRID_CELLS_PER_PARTICLE, MAX_GRID_CELLS},
    core::particle::Particle,
    error::{ensure_positive, Result, SimError},
};

/// Forward half of the 8-neighbourhood. Scanning only these from every cell
/// visits each unordered neighbouring cell pair exactly once.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

/// Uniform grid spatial partitioning used by the broad phase.
///
/// Cells hold indices into the simulation's particle slice; the grid never
/// owns particle data. It has to be cleared and refilled every step, a stale
/// grid silently yields wrong pairs.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    min_bound: Vec2,
    max_bound: Vec2,
    grid_width: usize,
    grid_height: usize,
    cells: Vec<Vec<usize>>,
    particle_count_hint: usize,
}

impl SpatialGrid {
    /// Allocates a grid covering `[min_bound, max_bound]` with square cells.
    ///
    /// `cell_size` should be at least twice the interaction distance so that
    /// any two particles that can touch land in the same or adjacent cells.
    pub fn new(
        min_bound: Vec2,
        max_bound: Vec2,
        cell_size: f32,
        particle_count_hint: usize,
    ) -> Result<Self> {
        ensure_positive("cell size", cell_size)?;
        if !(min_bound.x < max_bound.x && min_bound.y < max_bound.y)
            || !min_bound.is_finite()
            || !max_bound.is_finite()
        {
            return Err(SimError::InvalidBounds {
                min: min_bound,
                max: max_bound,
            });
        }

        let extent = (max_bound - min_bound) / cell_size;
        let max_cells = particle_count_hint
            .saturating_mul(GRID_CELLS_PER_PARTICLE)
            .saturating_add(MAX_GRID_CELLS);
        let (grid_width, grid_height) = match (
            (extent.x.floor() as usize).checked_add(1),
            (extent.y.floor() as usize).checked_add(1),
        ) {
            (Some(w), Some(h)) if w.checked_mul(h).is_some_and(|n| n <= max_cells) => (w, h),
            _ => {
                return Err(SimError::param(format!(
                    "cell size {cell_size} over {} x {} needs more than {max_cells} cells",
                    max_bound.x - min_bound.x,
                    max_bound.y - min_bound.y
                )))
            }
        };

        log::debug!(
            "spatial grid allocated: {grid_width}x{grid_height} cells of {cell_size:.3}"
        );

        Ok(Self {
            cell_size,
            min_bound,
            max_bound,
            grid_width,
            grid_height,
            cells: vec![Vec::new(); grid_width * grid_height],
            particle_count_hint,
        })
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn min_bound(&self) -> Vec2 {
        self.min_bound
    }

    pub fn max_bound(&self) -> Vec2 {
        self.max_bound
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Empties every cell while keeping their allocations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cell coordinates of `position`, clamped into the grid extent.
    pub fn cell_coords(&self, position: Vec2) -> (usize, usize) {
        let local = (position - self.min_bound) / self.cell_size;
        let max_x = (self.grid_width - 1) as i64;
        let max_y = (self.grid_height - 1) as i64;
        let x = (local.x.floor() as i64).clamp(0, max_x) as usize;
        let y = (local.y.floor() as i64).clamp(0, max_y) as usize;
        (x, y)
    }

    #[inline]
    fn flat_index(&self, x: usize, y: usize) -> usize {
        x + y * self.grid_width
    }

    pub fn insert(&mut self, index: usize, position: Vec2) {
        let (x, y) = self.cell_coords(position);
        let flat = self.flat_index(x, y);
        self.cells[flat].push(index);
    }

    /// Clears the grid and inserts every particle by its slice index.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.clear();
        self.particle_count_hint = particles.len();
        for (index, particle) in particles.iter().enumerate() {
            self.insert(index, particle.position);
        }
    }

    /// Indices stored in the cell at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> &[usize] {
        &self.cells[self.flat_index(x, y)]
    }

    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Pairs of particle indices whose centres are within `max_distance`.
    pub fn potential_pairs(&self, particles: &[Particle], max_distance: f32) -> Vec<(usize, usize)> {
        let mut pairs = Vec::with_capacity(self.particle_count_hint * 4);
        self.potential_pairs_into(particles, max_distance, &mut pairs);
        pairs
    }

    /// Like [`SpatialGrid::potential_pairs`] but reuses `pairs`, which is
    /// cleared first. Each unordered pair is emitted once as `(low, high)`.
    pub fn potential_pairs_into(
        &self,
        particles: &[Particle],
        max_distance: f32,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        pairs.clear();
        let max_distance_sq = max_distance * max_distance;

        for y in 0..self.grid_height {
            for x in 0..self.grid_width {
                let current = &self.cells[self.flat_index(x, y)];
                if current.is_empty() {
                    continue;
                }

                for (i, &a) in current.iter().enumerate() {
                    for &b in &current[i + 1..] {
                        push_if_close(particles, a, b, max_distance, max_distance_sq, pairs);
                    }
                }

                for (dx, dy) in NEIGHBOR_OFFSETS {
                    let nx = x as i64 + dx as i64;
                    let ny = y as i64 + dy as i64;
                    if nx < 0
                        || ny < 0
                        || nx >= self.grid_width as i64
                        || ny >= self.grid_height as i64
                    {
                        continue;
                    }
                    let neighbor = &self.cells[self.flat_index(nx as usize, ny as usize)];
                    for &a in current {
                        for &b in neighbor {
                            push_if_close(particles, a, b, max_distance, max_distance_sq, pairs);
                        }
                    }
                }
            }
        }
    }
}

#[inline]
fn push_if_close(
    particles: &[Particle],
    a: usize,
    b: usize,
    max_distance: f32,
    max_distance_sq: f32,
    pairs: &mut Vec<(usize, usize)>,
) {
    let delta = particles[a].position - particles[b].position;
    if delta.x.abs() > max_distance || delta.y.abs() > max_distance {
        return;
    }
    if delta.length_squared() <= max_distance_sq {
        pairs.push((a.min(b), a.max(b)));
    }
}

/// Every unordered pair within `max_distance`, checked exhaustively.
///
/// Reference for the grid; O(N²).
pub fn brute_force_pairs(particles: &[Particle], max_distance: f32) -> Vec<(usize, usize)> {
    let max_distance_sq = max_distance * max_distance;
    let mut pairs = Vec::new();
    for a in 0..particles.len() {
        for b in a + 1..particles.len() {
            push_if_close(particles, a, b, max_distance, max_distance_sq, &mut pairs);
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SpatialGrid {
        SpatialGrid::new(Vec2::ZERO, Vec2::new(100.0, 50.0), 10.0, 0).unwrap()
    }

    #[test]
    fn dimensions_include_the_far_edge() {
        let grid = grid();
        assert_eq!(grid.grid_width(), 11);
        assert_eq!(grid.grid_height(), 6);
    }

    #[test]
    fn out_of_bounds_positions_fold_into_edge_cells() {
        let grid = grid();
        assert_eq!(grid.cell_coords(Vec2::new(-40.0, -3.0)), (0, 0));
        assert_eq!(grid.cell_coords(Vec2::new(1e6, 1e6)), (10, 5));
        assert_eq!(grid.cell_coords(Vec2::new(10.0, 19.99)), (1, 1));
    }

    #[test]
    fn clear_keeps_dimensions_and_empties_cells() {
        let mut grid = grid();
        grid.insert(0, Vec2::new(5.0, 5.0));
        grid.insert(1, Vec2::new(5.0, 6.0));
        assert_eq!(grid.cell(0, 0), &[0, 1]);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.grid_width(), 11);
    }

    #[test]
    fn empty_grid_yields_no_pairs() {
        let grid = grid();
        assert!(grid.potential_pairs(&[], 2.0).is_empty());
    }

    #[test]
    fn anti_diagonal_neighbours_are_paired() {
        // (0,1) and (1,0) only meet through the (-1, +1) offset.
        let particles = vec![
            Particle::at(Vec2::new(10.5, 9.5)),
            Particle::at(Vec2::new(9.5, 10.5)),
        ];
        let mut grid = grid();
        grid.rebuild(&particles);
        assert_eq!(grid.potential_pairs(&particles, 2.0), vec![(0, 1)]);
    }

    #[test]
    fn distant_pairs_in_adjacent_cells_are_filtered() {
        let particles = vec![
            Particle::at(Vec2::new(1.0, 1.0)),
            Particle::at(Vec2::new(19.0, 1.0)),
        ];
        let mut grid = grid();
        grid.rebuild(&particles);
        assert!(grid.potential_pairs(&particles, 2.0).is_empty());
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let huge = SpatialGrid::new(Vec2::ZERO, Vec2::splat(1e6), 4.2e-4, 1);
        assert!(matches!(huge, Err(SimError::InvalidParameter(_))));

        // 1501 x 1501 cells only fit when enough particles back them.
        let sparse = SpatialGrid::new(Vec2::ZERO, Vec2::splat(1500.0), 1.0, 10);
        assert!(sparse.is_err());
        let dense = SpatialGrid::new(Vec2::ZERO, Vec2::splat(1500.0), 1.0, 100_000).unwrap();
        assert_eq!(dense.grid_width(), 1501);
    }

    #[test]
    fn non_positive_cell_size_is_rejected() {
        assert!(SpatialGrid::new(Vec2::ZERO, Vec2::ONE, 0.0, 0).is_err());
        assert!(SpatialGrid::new(Vec2::ONE, Vec2::ZERO, 1.0, 0).is_err());
    }
}
