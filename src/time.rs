//! Fixed-timestep clock decoupling frame rate from the physics tick.

use std::collections::VecDeque;
use std::time::Instant;

use crate::{
    config::{DEFAULT_MAX_STEPS, FRAME_STATS_WINDOW, MAX_FRAME_TIME},
    error::{ensure_positive, Result, SimError},
};

/// Tolerance, in steps, for an accumulator that sits a rounding error below
/// an exact multiple of the fixed timestep.
const STEP_EPSILON: f64 = 1e-6;

/// Monotonic wall-clock source, in seconds.
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// [`TimeSource`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Rolling window of frame times for smoothed FPS reporting.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f32>,
    capacity: usize,
    sum: f64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::with_capacity(FRAME_STATS_WINDOW)
    }
}

impl FrameStats {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, frame_time: f32) {
        if self.samples.len() == self.capacity {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest as f64;
            }
        }
        self.samples.push_back(frame_time);
        self.sum += frame_time as f64;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average_frame_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        (self.sum / self.samples.len() as f64 * 1000.0) as f32
    }

    pub fn average_fps(&self) -> f32 {
        let ms = self.average_frame_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}

/// Accumulates elapsed time and hands out whole fixed steps.
///
/// Frames longer than [`MAX_FRAME_TIME`] are clamped and at most `max_steps`
/// are returned per call, so a long stall cannot snowball into an ever
/// growing backlog.
#[derive(Debug, Clone)]
pub struct FixedTimestep<S: TimeSource = SystemTimeSource> {
    source: S,
    fixed_dt: f32,
    max_steps: u32,
    last_time: f64,
    accumulator: f64,
    last_frame_time: f32,
    stats: FrameStats,
}

impl FixedTimestep<SystemTimeSource> {
    pub fn new(fixed_dt: f32) -> Result<Self> {
        Self::with_source(SystemTimeSource::default(), fixed_dt, DEFAULT_MAX_STEPS)
    }
}

impl<S: TimeSource> FixedTimestep<S> {
    pub fn with_source(mut source: S, fixed_dt: f32, max_steps: u32) -> Result<Self> {
        ensure_positive("fixed timestep", fixed_dt)?;
        if max_steps == 0 {
            return Err(SimError::param("max steps per frame must be at least 1"));
        }
        let last_time = source.now();
        Ok(Self {
            source,
            fixed_dt,
            max_steps,
            last_time,
            accumulator: 0.0,
            last_frame_time: 0.0,
            stats: FrameStats::default(),
        })
    }

    /// Reads the time source and returns how many fixed steps to run.
    pub fn update(&mut self) -> u32 {
        let now = self.source.now();
        let frame_time = (now - self.last_time).max(0.0) as f32;
        self.last_time = now;
        self.advance(frame_time)
    }

    /// Accounts for `frame_time` seconds and returns how many fixed steps to run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            log::warn!("frame took {:.1} ms, clamping to {:.0} ms", frame_time * 1000.0, MAX_FRAME_TIME * 1000.0);
            frame_time = MAX_FRAME_TIME;
        }
        self.last_frame_time = frame_time;
        self.stats.push(frame_time);

        self.accumulator += frame_time as f64;
        let dt = self.fixed_dt as f64;
        let due = (self.accumulator / dt + STEP_EPSILON).floor() as u64;
        let steps = due.min(self.max_steps as u64) as u32;
        if due > steps as u64 {
            log::warn!("dropping {} catch-up steps this frame", due - steps as u64);
        }

        if steps > 0 {
            self.accumulator = (self.accumulator - steps as f64 * dt).max(0.0);
        }
        steps
    }

    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Unconsumed time, in seconds.
    pub fn accumulator(&self) -> f32 {
        self.accumulator as f32
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn interpolation_factor(&self) -> f32 {
        (self.accumulator / self.fixed_dt as f64) as f32
    }

    pub fn last_frame_time_ms(&self) -> f32 {
        self.last_frame_time * 1000.0
    }

    pub fn last_fps(&self) -> f32 {
        if self.last_frame_time > 0.0 {
            1.0 / self.last_frame_time
        } else {
            0.0
        }
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
