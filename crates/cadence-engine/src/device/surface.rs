use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

use crate::coords::ViewportDimensions;

use super::gpu::GpuShared;
use super::{GpuContext, GraphicsApi, Surface, SurfaceProvider, SwapchainOptions};

/// Drawing surface backed by a winit window.
///
/// Backing dimensions are the swapchain size in physical pixels. A window
/// swapchain always covers the whole client area, so a backing store smaller
/// than the window (the viewport scale) is presented stretched to fill it.
/// Native windows have no separate presentation box the way a canvas's CSS
/// size is.
pub struct WindowSurface {
    window: Arc<Window>,
    gpu: Option<Rc<GpuShared>>,
    dimensions: ViewportDimensions,
}

impl WindowSurface {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            gpu: None,
            dimensions: ViewportDimensions::default(),
        }
    }

    fn attach(&mut self, gpu: Rc<GpuShared>) {
        self.dimensions = gpu.dimensions();
        self.gpu = Some(gpu);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Surface for WindowSurface {
    fn dimensions(&self) -> ViewportDimensions {
        self.dimensions
    }

    fn resize(&mut self, dimensions: ViewportDimensions) {
        self.dimensions = dimensions;
        if let Some(gpu) = &self.gpu {
            gpu.resize(dimensions);
        }
    }
}

/// Serves one winit window as the surface named `id`.
pub struct WindowSurfaceProvider {
    id: String,
    window: Arc<Window>,
    swapchain: SwapchainOptions,
}

impl WindowSurfaceProvider {
    pub fn new(id: impl Into<String>, window: Arc<Window>, swapchain: SwapchainOptions) -> Self {
        Self {
            id: id.into(),
            window,
            swapchain,
        }
    }
}

impl SurfaceProvider for WindowSurfaceProvider {
    type Surface = WindowSurface;
    type Context = GpuContext;

    fn find_surface(&mut self, id: &str) -> Option<WindowSurface> {
        (id == self.id).then(|| WindowSurface::new(self.window.clone()))
    }

    fn acquire_context(&mut self, surface: &mut WindowSurface, api: GraphicsApi) -> Option<GpuContext> {
        match pollster::block_on(GpuShared::new(surface.window.clone(), api, &self.swapchain)) {
            Ok(gpu) => {
                let gpu = Rc::new(gpu);
                surface.attach(gpu.clone());
                Some(GpuContext::new(gpu))
            }
            Err(e) => {
                log::warn!("{api} context unavailable: {e:#}");
                None
            }
        }
    }
}
