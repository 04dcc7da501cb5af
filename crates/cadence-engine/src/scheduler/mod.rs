//! The throttled, cooperative frame loop.

mod frame_scheduler;

pub use frame_scheduler::{FrameOutcome, FrameReport, FrameScheduler, SchedulerConfig};
