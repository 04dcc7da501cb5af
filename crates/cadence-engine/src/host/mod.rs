//! Host capabilities consumed by the driver.
//!
//! The driver never talks to a platform directly. A host (browser page, native
//! window, test harness) implements these traits:
//! - [`FrameSource`]: one-shot "call me before the next refresh" requests
//! - [`Clock`]: wall-clock milliseconds, read independently of callbacks
//! - [`HostWindow`]: the usable window area
//! - [`Notifier`]: blocking user notification for fatal bootstrap errors

use crate::coords::HostSize;

/// Token for one pending host frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host per-frame scheduling primitive.
///
/// A request fires at most once, at a cadence the host controls (commonly the
/// display refresh). The callback receives no timestamp; use [`Clock`].
pub trait FrameSource {
    fn request_frame(&mut self) -> FrameHandle;

    /// Deregisters a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Clock {
    /// Current time in milliseconds. Only differences are meaningful.
    fn now_ms(&self) -> f64;
}

pub trait HostWindow {
    fn usable_size(&self) -> HostSize;
}

pub trait Notifier {
    /// Presents a blocking message to the end user.
    fn alert(&mut self, message: &str);
}

/// Everything the frame scheduler needs from its host.
pub trait Host: FrameSource + Clock + HostWindow {}

impl<T: FrameSource + Clock + HostWindow + ?Sized> Host for T {}
