//! Time subsystem.
//!
//! Provides the throttle bookkeeping for the frame scheduler, decoupled from
//! any particular clock so it stays deterministic under test.
//! Intended usage:
//! - one `SchedulerState` per running loop, created when the loop starts
//! - `is_due(now)` on every host tick, `mark_drawn(now)` only for executed frames

#[cfg(feature = "native")]
mod clock;
mod state;

#[cfg(feature = "native")]
pub use clock::MonotonicClock;
pub use state::{DEFAULT_TARGET_FPS, SchedulerState};
