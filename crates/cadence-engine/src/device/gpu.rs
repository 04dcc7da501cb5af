use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::coords::{ViewportDimensions, ViewportRect};

use super::swapchain::AcquireFailure;
use super::{DrawingContext, GpuFrame, GraphicsApi, SwapchainOptions};

/// wgpu core objects bound to one window, shared by the surface handle and
/// every clone of the drawing context.
pub(crate) struct GpuShared {
    /// Surface bound to the window.
    surface: wgpu::Surface<'static>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active swapchain configuration. Its size is the surface's backing size.
    config: RefCell<wgpu::SurfaceConfiguration>,
}

impl GpuShared {
    /// Creates the device and swapchain for `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. Fails when no
    /// adapter supports `api`.
    pub(crate) async fn new(
        window: Arc<Window>,
        api: GraphicsApi,
        options: &SwapchainOptions,
    ) -> Result<Self> {
        let size = window.inner_size();
        let dimensions = ViewportDimensions::new(size.height, size.width);
        anyhow::ensure!(!dimensions.is_empty(), "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: backends_for(api),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .with_context(|| format!("no GPU adapter supports {api}"))?;

        let required_limits = match api {
            GraphicsApi::WebGl2 => {
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
            }
            GraphicsApi::Wgpu => wgpu::Limits::default(),
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("cadence device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let config = options
            .configure(&surface.get_capabilities(&adapter), dimensions)
            .context("no supported surface formats")?;

        surface.configure(&device, &config);
        log::info!(
            "{api} context ready ({:?}, {:?}, {:?})",
            adapter.get_info().backend,
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config: RefCell::new(config),
        })
    }

    /// Current swapchain size.
    pub(crate) fn dimensions(&self) -> ViewportDimensions {
        let config = self.config.borrow();
        ViewportDimensions::new(config.height, config.width)
    }

    /// Reconfigures the swapchain to `dimensions`. Zero-area sizes are
    /// ignored; wgpu rejects them.
    pub(crate) fn resize(&self, dimensions: ViewportDimensions) {
        if dimensions.is_empty() {
            return;
        }
        let mut config = self.config.borrow_mut();
        config.width = dimensions.width;
        config.height = dimensions.height;
        self.surface.configure(&self.device, &config);
    }
}

fn backends_for(api: GraphicsApi) -> wgpu::Backends {
    match api {
        GraphicsApi::WebGl2 => wgpu::Backends::GL,
        GraphicsApi::Wgpu => wgpu::Backends::all(),
    }
}

/// Native drawing context.
///
/// Clones share the device, swapchain and viewport rectangle, so an engine
/// client can hold its own handle and observe viewport changes made by the
/// frame driver.
#[derive(Clone)]
pub struct GpuContext {
    shared: Rc<GpuShared>,
    viewport: Rc<Cell<ViewportRect>>,
}

impl GpuContext {
    pub(crate) fn new(shared: Rc<GpuShared>) -> Self {
        let viewport = Rc::new(Cell::new(shared.dimensions().rect()));
        Self { shared, viewport }
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.shared.config.borrow().format
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.shared.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.shared.queue
    }

    /// Active viewport rectangle in surface pixels.
    pub fn viewport(&self) -> ViewportRect {
        self.viewport.get()
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// Returns `Ok(None)` when the frame should be skipped (lost, outdated or
    /// timed-out surface); only unrecoverable surface errors are `Err`.
    pub fn begin_frame(&self) -> Result<Option<GpuFrame>> {
        let surface_texture = match self.shared.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return match AcquireFailure::classify(&err) {
                    AcquireFailure::Fatal => {
                        Err(anyhow::Error::new(err).context("failed to acquire surface texture"))
                    }
                    AcquireFailure::Reconfigure => {
                        let config = self.shared.config.borrow();
                        self.shared.surface.configure(&self.shared.device, &config);
                        log::debug!("surface {err}; reconfigured, frame skipped");
                        Ok(None)
                    }
                    AcquireFailure::Skip => {
                        log::debug!("surface {err}; frame skipped");
                        Ok(None)
                    }
                };
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .shared
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cadence frame encoder"),
            });

        Ok(Some(GpuFrame {
            surface_texture,
            view,
            encoder,
        }))
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.shared.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}

impl DrawingContext for GpuContext {
    fn set_viewport(&mut self, rect: ViewportRect) {
        self.viewport.set(rect);
    }
}
