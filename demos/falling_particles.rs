use fluid_particle_sim::*;

fn main() -> Result<()> {
    let mut sim = Simulation::new(Vec2::new(-100.0, -60.0), Vec2::new(100.0, 60.0), 1.0, 1280)?;
    sim.add_particle_grid(20, 30, Vec2::splat(0.5), true, 1.0)?;
    sim.add_particle_stream(200, 40.0, Vec2::new(25.0, 0.0), 1.0, Vec2::new(0.0, 5.0))?;

    let config = SimulationConfig::default();
    let mut simulator = ParticleSimulator::new(sim, &config)?;

    // Headless: feed ten seconds of 60 Hz frames.
    for frame in 0..600 {
        simulator.advance(1.0 / 60.0);
        if frame % 120 == 0 {
            let sim = simulator.simulation();
            let mean_temperature = sim.particles().iter().map(|p| p.temperature).sum::<f32>()
                / sim.particle_count().max(1) as f32;
            println!(
                "frame {frame:>3}: {} particles, mean temperature {mean_temperature:.2}",
                sim.particle_count()
            );
        }
    }

    let profiler = simulator.stepper_mut().profiler();
    println!(
        "{} steps, {} particles, {} candidate pairs, {:.2} ms stepping",
        profiler.steps,
        profiler.particle_count,
        profiler.candidate_pairs,
        profiler.total_time.as_secs_f32() * 1000.0
    );
    Ok(())
}
