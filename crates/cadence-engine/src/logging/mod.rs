//! Native logger setup.
//!
//! Driver code logs through the `log` facade only: info for loop start/stop,
//! debug for per-frame events, error for fatal paths. Browser hosts install
//! their own backend.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
