use log::{log_enabled, Level};
use std::time::{Duration, Instant};

/// Per-step timing breakdown of the physics driver.
///
/// Timings accumulate across steps until [`StepProfiler::reset`] is called, so
/// a host can reset once per rendered frame and report the whole frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub integrate_time: Duration,
    pub broad_phase_time: Duration,
    pub collision_time: Duration,
    pub spawn_time: Duration,
    pub total_time: Duration,

    pub steps: u32,
    pub particle_count: usize,
    pub candidate_pairs: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        let share = |d: Duration| (d.as_micros() as f32 / total_us) * 100.0;

        log::info!(
            "physics: {} steps, {} particles, {} candidate pairs, {:.2} ms total \
             (integrate {:.1}%, broad phase {:.1}%, collisions {:.1}%, spawn {:.1}%)",
            self.steps,
            self.particle_count,
            self.candidate_pairs,
            self.total_time.as_secs_f32() * 1000.0,
            share(self.integrate_time),
            share(self.broad_phase_time),
            share(self.collision_time),
            share(self.spawn_time),
        );
    }
}

/// Adds the elapsed time of a labelled scope to the referenced duration on
/// drop, and traces it when trace logging is enabled.
pub struct ScopedTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        if log_enabled!(Level::Trace) {
            log::trace!("{} took {} µs", self.label, elapsed.as_micros());
        }
    }
}
