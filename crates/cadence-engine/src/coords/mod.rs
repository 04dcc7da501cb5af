//! Size and rectangle types shared by the driver, hosts and engine clients.
//!
//! Conventions:
//! - host sizes are device-independent pixels (`f64`, may be fractional)
//! - surface dimensions and viewport rects are whole pixels
//! - dimensions are ordered height first, as the engine contract receives them

mod viewport;

pub use viewport::{HostSize, ViewportDimensions, ViewportRect};
