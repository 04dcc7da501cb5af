//! Cadence engine crate.
//!
//! Frame-orchestration driver for a compiled rendering engine: loads the engine
//! module, bootstraps a drawing surface, and drives `update`/`render` at a
//! throttled rate while keeping the surface sized to the host window.
//!
//! The driver core (`core`, `device`, `host`, `scheduler`, `viewport`, `time`,
//! `driver`) is host-independent. The `native` feature adds a winit + wgpu host
//! (`window`) and `env_logger` setup (`logging`).

pub mod coords;
pub mod core;
pub mod device;
pub mod driver;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod time;
pub mod viewport;

#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod window;

#[cfg(test)]
mod testing;

pub use driver::{DriverConfig, launch};
pub use error::{BootstrapError, DriverError, EngineFailure, EnginePhase, LoadError};
