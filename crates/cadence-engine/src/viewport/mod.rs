//! Viewport tracking.
//!
//! Keeps the drawing surface and its context sized to a fixed fraction of the
//! host window, checked once per executed frame.

mod monitor;

pub use monitor::{DEFAULT_VIEWPORT_SCALE, ViewportMonitor};
