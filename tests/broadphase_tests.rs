use std::collections::HashSet;

use fluid_particle_sim::*;

const RADIUS: f32 = 1.0;

/// Small deterministic LCG so scattered layouts are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 40) as f32 / (1u64 << 24) as f32
    }
}

fn grid_pairs(sim: &mut Simulation, factor: f32) -> Vec<(usize, usize)> {
    sim.rebuild_spatial_grid(factor * 2.0 * RADIUS).unwrap();
    let mut pairs = Vec::new();
    sim.candidate_pairs_into(2.0 * RADIUS, &mut pairs);
    pairs
}

fn as_set(pairs: &[(usize, usize)]) -> HashSet<(usize, usize)> {
    pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect()
}

fn scattered(count: usize, seed: u64) -> Simulation {
    let mut sim = Simulation::new(Vec2::ZERO, Vec2::new(40.0, 30.0), RADIUS, 800).unwrap();
    let mut rng = Lcg(seed);
    for _ in 0..count {
        // Some particles land outside the box to exercise edge clamping.
        let position = Vec2::new(rng.next_f32() * 46.0 - 3.0, rng.next_f32() * 36.0 - 3.0);
        sim.add_particle(position, Vec2::ZERO, 1.0).unwrap();
    }
    sim
}

#[test]
fn grid_matches_brute_force_on_a_packed_block() {
    let mut sim = Simulation::new(Vec2::ZERO, Vec2::new(40.0, 40.0), RADIUS, 800).unwrap();
    // Negative spacing packs the 5x4 block so neighbours overlap.
    sim.add_particle_grid(5, 4, Vec2::splat(-0.2), false, 1.0)
        .unwrap();
    assert_eq!(sim.particle_count(), 20);

    let brute = brute_force_pairs(sim.particles(), 2.0 * RADIUS);
    let grid = grid_pairs(&mut sim, 2.1);

    assert!(!brute.is_empty());
    assert_eq!(as_set(&grid), as_set(&brute));
}

#[test]
fn grid_matches_brute_force_on_scattered_layouts() {
    for (seed, factor) in [(1, 2.0), (7, 2.1), (42, 3.1), (1234, 2.5)] {
        let mut sim = scattered(400, seed);
        let brute = brute_force_pairs(sim.particles(), 2.0 * RADIUS);
        let grid = grid_pairs(&mut sim, factor);
        assert_eq!(
            as_set(&grid),
            as_set(&brute),
            "seed {seed}, cell factor {factor}"
        );
    }
}

#[test]
fn grid_never_repeats_a_pair() {
    for seed in [3, 99, 2024] {
        let mut sim = scattered(600, seed);
        let pairs = grid_pairs(&mut sim, 2.1);

        assert!(pairs.iter().all(|&(a, b)| a < b));
        let unique = as_set(&pairs);
        assert_eq!(unique.len(), pairs.len(), "duplicate pair for seed {seed}");
    }
}

#[test]
fn every_particle_lands_in_exactly_one_cell() {
    let mut sim = scattered(250, 5);
    sim.rebuild_spatial_grid(4.2).unwrap();
    let grid = sim.spatial_grid().expect("grid was built");

    let mut seen = vec![0usize; sim.particle_count()];
    for y in 0..grid.grid_height() {
        for x in 0..grid.grid_width() {
            for &index in grid.cell(x, y) {
                seen[index] += 1;
            }
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn stepping_with_and_without_grid_agrees_for_a_resting_block() {
    let build = || {
        let mut sim = Simulation::new(Vec2::ZERO, Vec2::new(30.0, 30.0), RADIUS, 800).unwrap();
        sim.add_particle_grid(4, 5, Vec2::splat(0.5), false, 1.0)
            .unwrap();
        sim
    };
    let mut brute = build();
    let mut grid = build();
    let mut brute_stepper = PhysicsStepper::default();
    let mut grid_stepper = PhysicsStepper::default();

    // Spaced particles fall in lockstep and never touch, so both paths
    // must produce identical state.
    for _ in 0..30 {
        brute_stepper.step(&mut brute, 1.0 / 60.0, false);
        grid_stepper.step(&mut grid, 1.0 / 60.0, true);
    }
    assert_eq!(brute.particles(), grid.particles());
}
