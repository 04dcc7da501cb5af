//! Drawing surface + context management.
//!
//! This module is responsible for:
//! - the host-independent surface/context contracts and the bootstrapper
//! - (native) creating the wgpu Instance/Adapter/Device/Queue for a window
//! - (native) configuring the swapchain and acquiring frames for engine clients

mod bootstrap;

#[cfg(feature = "native")]
mod frame;
#[cfg(feature = "native")]
mod gpu;
#[cfg(feature = "native")]
mod surface;
#[cfg(feature = "native")]
mod swapchain;

pub use bootstrap::{
    Bootstrapped, DrawingContext, GraphicsApi, Surface, SurfaceBootstrapper, SurfaceProvider,
};

#[cfg(feature = "native")]
pub use frame::GpuFrame;
#[cfg(feature = "native")]
pub use gpu::GpuContext;
#[cfg(feature = "native")]
pub use surface::{WindowSurface, WindowSurfaceProvider};
#[cfg(feature = "native")]
pub use swapchain::SwapchainOptions;
