use crate::coords::{HostSize, ViewportDimensions};
use crate::device::{DrawingContext, Surface};

/// Fraction of the host window the surface occupies.
pub const DEFAULT_VIEWPORT_SCALE: f64 = 0.9;

/// Detects host window size changes and applies them to a surface and context.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportMonitor {
    scale: f64,
}

impl ViewportMonitor {
    pub fn new(scale: f64) -> Self {
        debug_assert!(scale > 0.0 && scale.is_finite());
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Surface dimensions for a host window of `host` size.
    ///
    /// Scaled lengths are truncated to whole pixels, the way canvas backing
    /// sizes are. Negative or non-finite lengths become zero.
    pub fn target(&self, host: HostSize) -> ViewportDimensions {
        ViewportDimensions::new(self.scaled(host.height), self.scaled(host.width))
    }

    /// Resizes `surface` and resets the `context` viewport if the target
    /// differs from the surface's recorded dimensions in either axis.
    ///
    /// Returns the dimensions in effect after the check. No side effects fire
    /// when nothing changed.
    pub fn sync_if_changed<S, C>(
        &self,
        surface: &mut S,
        context: &mut C,
        host: HostSize,
    ) -> ViewportDimensions
    where
        S: Surface + ?Sized,
        C: DrawingContext + ?Sized,
    {
        let target = self.target(host);
        let current = surface.dimensions();

        if target != current {
            log::debug!(
                "viewport {}x{} -> {}x{}",
                current.width,
                current.height,
                target.width,
                target.height
            );
            surface.resize(target);
            context.set_viewport(target.rect());
        }

        target
    }

    fn scaled(&self, len: f64) -> u32 {
        // 1e-6 absorbs float error (e.g. 0.7 * 1000 = 699.999…) before truncation.
        let px = (len * self.scale + 1e-6).floor();
        if px.is_finite() && px > 0.0 { px as u32 } else { 0 }
    }
}

impl Default for ViewportMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ViewportRect;
    use crate::testing::{FakeContext, FakeSurface};

    #[test]
    fn scales_host_window_by_nine_tenths() {
        let monitor = ViewportMonitor::default();
        let mut surface = FakeSurface::default();
        let mut context = FakeContext::default();

        let dims = monitor.sync_if_changed(&mut surface, &mut context, HostSize::new(800.0, 1000.0));

        assert_eq!(dims, ViewportDimensions::new(720, 900));
        assert_eq!(surface.dimensions(), dims);
        assert_eq!(surface.resizes, vec![dims]);
        assert_eq!(context.viewports, vec![ViewportRect::new(0, 0, 900, 720)]);
    }

    #[test]
    fn unchanged_host_size_has_no_side_effects() {
        let monitor = ViewportMonitor::default();
        let mut surface = FakeSurface::default();
        let mut context = FakeContext::default();
        let host = HostSize::new(800.0, 1000.0);

        monitor.sync_if_changed(&mut surface, &mut context, host);
        let again = monitor.sync_if_changed(&mut surface, &mut context, host);

        assert_eq!(again, ViewportDimensions::new(720, 900));
        assert_eq!(surface.resizes.len(), 1);
        assert_eq!(context.viewports.len(), 1);
    }

    #[test]
    fn single_axis_change_reconfigures() {
        let monitor = ViewportMonitor::default();
        let mut surface = FakeSurface::default();
        let mut context = FakeContext::default();

        monitor.sync_if_changed(&mut surface, &mut context, HostSize::new(800.0, 1000.0));
        let dims = monitor.sync_if_changed(&mut surface, &mut context, HostSize::new(800.0, 500.0));

        assert_eq!(dims, ViewportDimensions::new(720, 450));
        assert_eq!(context.viewports.last(), Some(&ViewportRect::new(0, 0, 450, 720)));
        assert_eq!(surface.resizes.len(), 2);
    }

    #[test]
    fn fractional_sizes_truncate() {
        let monitor = ViewportMonitor::default();
        assert_eq!(monitor.target(HostSize::new(801.0, 1001.0)), ViewportDimensions::new(720, 900));
        assert_eq!(ViewportMonitor::new(0.7).target(HostSize::new(1000.0, 1000.0)).width, 700);
    }

    #[test]
    fn degenerate_sizes_clamp_to_zero() {
        let monitor = ViewportMonitor::default();
        assert_eq!(monitor.target(HostSize::new(-5.0, f64::NAN)), ViewportDimensions::new(0, 0));
    }
}
