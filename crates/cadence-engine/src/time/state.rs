/// Default executed-frame rate.
pub const DEFAULT_TARGET_FPS: f64 = 30.0;

/// Throttle bookkeeping for one running loop.
///
/// `initial_time` is fixed at construction. `last_draw_time` starts as "never"
/// and only moves forward, to the timestamp of each executed frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerState {
    initial_time: f64,
    last_draw_time: Option<f64>,
    target_interval_ms: f64,
}

impl SchedulerState {
    /// Creates state for a loop starting at `initial_time` and executing at
    /// most `target_fps` frames per second.
    pub fn new(initial_time: f64, target_fps: f64) -> Self {
        debug_assert!(target_fps > 0.0);
        Self {
            initial_time,
            last_draw_time: None,
            target_interval_ms: 1000.0 / target_fps,
        }
    }

    pub fn initial_time(&self) -> f64 {
        self.initial_time
    }

    pub fn last_draw_time(&self) -> Option<f64> {
        self.last_draw_time
    }

    pub fn target_interval_ms(&self) -> f64 {
        self.target_interval_ms
    }

    /// Whether a tick at `now` should execute a frame.
    ///
    /// A clock that steps backwards keeps the loop idle until it catches up.
    pub fn is_due(&self, now: f64) -> bool {
        match self.last_draw_time {
            None => true,
            Some(last) => now >= last + self.target_interval_ms,
        }
    }

    /// Milliseconds since loop start. Never negative, even if the clock
    /// stepped back before the first frame.
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.initial_time).max(0.0)
    }

    /// Records an executed frame at `now`.
    pub fn mark_drawn(&mut self, now: f64) {
        debug_assert!(self.is_due(now), "frame recorded inside the throttle interval");
        self.last_draw_time = Some(now);
    }
}
