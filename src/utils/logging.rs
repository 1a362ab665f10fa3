use log::{log_enabled, warn, Level};
use std::time::Instant;

/// Simple scoped timer for profiling the phases of a tick.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            let elapsed = self.start.elapsed();
            log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}

/// Reports frame time that was discarded because the accumulator hit its cap.
pub fn warn_if_time_dropped(dropped: f32, cap: f32) {
    if dropped > 0.0 {
        warn!(
            "Simulation fell behind: dropped {:.2} ms (accumulator capped at {:.2} ms)",
            dropped * 1000.0,
            cap * 1000.0
        );
    }
}
