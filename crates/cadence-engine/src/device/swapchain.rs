use crate::coords::ViewportDimensions;

/// Swapchain preferences for a window surface.
///
/// Every preference falls back to something the adapter supports, so
/// [`configure`](Self::configure) only fails when the surface reports no
/// formats at all.
#[derive(Debug, Clone)]
pub struct SwapchainOptions {
    /// Pick an sRGB format when one is offered.
    pub srgb: bool,

    /// Falls back to FIFO, which every surface supports.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the surface's first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Hint only.
    pub max_frame_latency: u32,
}

impl Default for SwapchainOptions {
    fn default() -> Self {
        Self {
            srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            max_frame_latency: 2,
        }
    }
}

impl SwapchainOptions {
    /// Resolves these preferences against `caps` for a `dimensions`-sized
    /// swapchain. `None` when the surface offers no format.
    pub(crate) fn configure(
        &self,
        caps: &wgpu::SurfaceCapabilities,
        dimensions: ViewportDimensions,
    ) -> Option<wgpu::SurfaceConfiguration> {
        let format = self.format(caps)?;

        let present_mode = if caps.present_modes.contains(&self.present_mode) {
            self.present_mode
        } else {
            log::debug!("{:?} unsupported, presenting with FIFO", self.present_mode);
            wgpu::PresentMode::Fifo
        };

        let alpha_mode = self
            .alpha_mode
            .filter(|m| caps.alpha_modes.contains(m))
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Some(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: dimensions.width,
            height: dimensions.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.max_frame_latency,
        })
    }

    fn format(&self, caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
        let first = *caps.formats.first()?;
        if !self.srgb {
            return Some(first);
        }
        Some(
            caps.formats
                .iter()
                .copied()
                .find(|f| {
                    matches!(
                        f,
                        wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                    )
                })
                .unwrap_or(first),
        )
    }
}

/// What a failed texture acquisition means for the current frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum AcquireFailure {
    /// Swapchain must be reconfigured; this frame is skipped.
    Reconfigure,
    /// Transient; this frame is skipped.
    Skip,
    /// The engine's render call fails.
    Fatal,
}

impl AcquireFailure {
    pub(crate) fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::Skip,
        }
    }
}
