use log::warn;
use std::time::Duration;

/// Logs a warning when a frame took longer than `budget_ms`.
///
/// Returns whether the budget was exceeded so callers can count overruns.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Frame exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        true
    } else {
        false
    }
}
