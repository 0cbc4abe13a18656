use approx::assert_abs_diff_eq;
use fluid_particle_sim::*;

fn empty_sim() -> Simulation {
    Simulation::new(Vec2::new(-50.0, -50.0), Vec2::new(50.0, 50.0), 1.0, 800).expect("valid sim")
}

#[test]
fn bodies_fall_under_gravity() {
    let mut sim = empty_sim();
    let index = sim.add_particle(Vec2::new(0.0, 10.0), Vec2::ZERO, 1.0).unwrap();
    let mut stepper = PhysicsStepper::default();

    stepper.step(&mut sim, 1.0 / 60.0, false);

    let y = sim.particle(index).expect("particle should exist").position.y;
    assert!(y < 10.0, "particle should start falling, y = {y}");
}

#[test]
fn stream_emits_every_due_particle_in_one_call() {
    let mut sim = empty_sim();
    sim.add_particle_stream(10, 5.0, Vec2::new(3.0, 0.0), 1.0, Vec2::ZERO)
        .unwrap();

    assert_eq!(sim.update_streams(1.0), 5);
    assert_eq!(sim.particle_count(), 5);
    assert_eq!(sim.streams()[0].spawned, 5);

    assert_eq!(sim.update_streams(2.0), 5);
    assert_eq!(sim.particle_count(), 10);
    assert!(sim.streams()[0].is_complete());

    assert_eq!(sim.update_streams(10.0), 0);
    assert_eq!(sim.particle_count(), 10);
}

#[test]
fn stream_emits_once_per_interval_with_small_steps() {
    let mut sim = empty_sim();
    sim.add_particle_stream(10, 5.0, Vec2::ZERO, 2.0, Vec2::new(1.0, 1.0))
        .unwrap();

    for _ in 0..5 {
        sim.update_streams(0.2);
    }
    assert_eq!(sim.particle_count(), 5);

    for _ in 0..5 {
        sim.update_streams(0.2);
    }
    assert_eq!(sim.particle_count(), 10);

    for _ in 0..5 {
        sim.update_streams(0.2);
    }
    assert_eq!(sim.particle_count(), 10);

    let start = sim.streams()[0].start_position;
    assert!(sim
        .particles()
        .iter()
        .all(|p| p.position == start && p.mass == 2.0));
}

#[test]
fn fixed_clock_returns_whole_steps_and_empties_the_accumulator() {
    let mut clock = FixedTimestep::new(1.0 / 60.0).unwrap();
    assert_eq!(clock.advance(10.0 / 60.0), 10);
    assert_abs_diff_eq!(clock.accumulator(), 0.0, epsilon = 1e-6);
}

#[test]
fn stepping_an_empty_simulation_is_a_no_op() {
    let mut sim = empty_sim();
    let mut stepper = PhysicsStepper::default();
    for use_grid in [false, true] {
        for _ in 0..10 {
            stepper.step(&mut sim, 1.0 / 60.0, use_grid);
        }
    }
    assert_eq!(sim.particle_count(), 0);
    assert!(sim.streams().is_empty());
}

#[test]
fn simulator_runs_the_steps_the_clock_hands_out() {
    let mut sim = empty_sim();
    sim.add_particle_grid(10, 10, Vec2::splat(0.2), true, 1.0)
        .unwrap();
    let config = SimulationConfig::default();
    let mut simulator = ParticleSimulator::new(sim, &config).unwrap();

    let steps = simulator.advance(0.1);
    assert_eq!(steps, 6);
    assert_eq!(simulator.stepper_mut().profiler().steps, 6);
    assert_eq!(simulator.simulation().particle_count(), 100);

    let bounds = *simulator.simulation().bounds();
    // Contact correction runs after the wall pass and may push a particle up
    // to one diameter past a wall until the next step.
    let slack = 2.0 * simulator.simulation().particle_radius();
    for p in simulator.simulation().particles() {
        assert!(p.position.is_finite());
        assert!(p.position.x >= bounds.min().x - slack && p.position.x <= bounds.max().x + slack);
        assert!(p.position.y >= bounds.min().y - slack && p.position.y <= bounds.max().y + slack);
    }
}

#[test]
fn config_loads_from_json_with_defaults() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{ "air_resistance": 0.1, "use_spatial_partitioning": false }"#)
            .expect("valid config json");
    assert_eq!(config.air_resistance, 0.1);
    assert!(!config.use_spatial_partitioning);
    assert_eq!(config.fixed_time_step, 1.0 / 60.0);
    assert!(config.validate().is_ok());

    let stepper = PhysicsStepper::from_config(&config).unwrap();
    assert_eq!(stepper.cell_size_factor(), 2.1);
}

#[test]
fn temperature_rises_for_fast_particles_and_settles_for_slow_ones() {
    let mut sim = empty_sim();
    let fast = sim.add_particle(Vec2::new(-20.0, 0.0), Vec2::new(30.0, 0.0), 1.0).unwrap();
    let slow = sim.add_particle(Vec2::new(20.0, -49.0), Vec2::ZERO, 1.0).unwrap();
    let mut stepper = PhysicsStepper::new(ForceRegistry::new());

    for _ in 0..10 {
        stepper.step(&mut sim, 1.0 / 60.0, true);
    }

    assert_abs_diff_eq!(sim.particles()[fast].temperature, 21.0, epsilon = 1e-4);
    assert_eq!(sim.particles()[slow].temperature, fluid_particle_sim::config::AMBIENT_TEMPERATURE);
}
