//! Native window host.
//!
//! Owns the `winit` EventLoop and Window, implements the host capabilities on
//! top of them, and runs the frame driver inside the event loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
