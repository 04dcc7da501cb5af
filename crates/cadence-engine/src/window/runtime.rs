use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::HostSize;
use crate::core::ModuleLoader;
use crate::device::{GpuContext, SwapchainOptions, WindowSurface, WindowSurfaceProvider};
use crate::driver::{DriverConfig, launch};
use crate::host::{Clock, FrameHandle, FrameSource, HostWindow, Notifier};
use crate::scheduler::FrameScheduler;
use crate::time::MonotonicClock;

/// Refresh interval assumed when the monitor does not report one.
const FALLBACK_REFRESH: Duration = Duration::from_micros(16_667);

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cadence".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the native host.
pub struct Runtime;

impl Runtime {
    /// Opens a window, launches the driver against it and runs the frame loop
    /// until the window closes.
    ///
    /// Load, bootstrap and engine failures end the event loop and are returned.
    pub fn run<L>(
        window: RuntimeConfig,
        driver: DriverConfig,
        swapchain: SwapchainOptions,
        loader: L,
    ) -> Result<()>
    where
        L: ModuleLoader<GpuContext> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(window, driver, swapchain, loader);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Window-backed host: refresh-paced frame requests, monotonic clock,
/// logical window size.
struct NativeHost {
    window: Arc<Window>,
    clock: MonotonicClock,

    next_handle: u64,
    pending: Option<FrameHandle>,
    last_fired: Option<Instant>,
    refresh: Duration,
}

impl NativeHost {
    fn new(window: Arc<Window>) -> Self {
        let refresh = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .filter(|&mhz| mhz > 0)
            .map_or(FALLBACK_REFRESH, |mhz| {
                Duration::from_secs_f64(1000.0 / f64::from(mhz))
            });

        log::debug!("frame source paced at {:.2} ms", refresh.as_secs_f64() * 1000.0);

        Self {
            window,
            clock: MonotonicClock::new(),
            next_handle: 1,
            pending: None,
            last_fired: None,
            refresh,
        }
    }

    /// Earliest instant the pending request may fire, if one is pending.
    fn deadline(&self) -> Option<Instant> {
        self.pending
            .map(|_| self.last_fired.map_or_else(Instant::now, |t| t + self.refresh))
    }

    /// Consumes the pending request as the redraw arrives.
    fn take_pending(&mut self) -> Option<FrameHandle> {
        let handle = self.pending.take()?;
        self.last_fired = Some(Instant::now());
        Some(handle)
    }
}

impl FrameSource for NativeHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

impl Clock for NativeHost {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl HostWindow for NativeHost {
    fn usable_size(&self) -> HostSize {
        let logical: LogicalSize<f64> = self.window.inner_size().to_logical(self.window.scale_factor());
        HostSize::new(logical.height, logical.width)
    }
}

impl Notifier for NativeHost {
    fn alert(&mut self, message: &str) {
        // No native dialog in this stack; the message goes to the error log.
        log::error!("{message}");
    }
}

struct Session {
    host: NativeHost,
    scheduler: FrameScheduler<WindowSurface, GpuContext>,
}

struct AppState<L> {
    window_config: RuntimeConfig,
    driver_config: DriverConfig,
    swapchain: SwapchainOptions,
    loader: L,

    session: Option<Session>,
    failure: Option<anyhow::Error>,
}

impl<L> AppState<L>
where
    L: ModuleLoader<GpuContext> + 'static,
{
    fn new(window: RuntimeConfig, driver: DriverConfig, swapchain: SwapchainOptions, loader: L) -> Self {
        Self {
            window_config: window,
            driver_config: driver,
            swapchain,
            loader,
            session: None,
            failure: None,
        }
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(self.window_config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let mut host = NativeHost::new(window.clone());
        let mut provider = WindowSurfaceProvider::new(
            self.driver_config.surface_id.clone(),
            window,
            self.swapchain.clone(),
        );

        let scheduler = pollster::block_on(launch(
            &self.driver_config,
            &self.loader,
            &mut provider,
            &mut host,
        ))?;

        Ok(Session { host, scheduler })
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(Session { mut host, scheduler }) = self.session.take() {
            scheduler.shutdown(&mut host);
        }
        event_loop.exit();
    }
}

impl<L> ApplicationHandler for AppState<L>
where
    L: ModuleLoader<GpuContext> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || self.failure.is_some() {
            return;
        }

        match self.start_session(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::error!("failed to start frame driver: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = &self.session else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        match session.host.deadline() {
            Some(deadline) if deadline <= Instant::now() => {
                event_loop.set_control_flow(ControlFlow::Wait);
                session.host.window.request_redraw();
            }
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.host.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),

            WindowEvent::RedrawRequested => {
                if session.host.take_pending().is_none() {
                    return;
                }

                if let Err(failure) = session.scheduler.tick(&mut session.host) {
                    self.failure = Some(failure.into());
                    self.stop(event_loop);
                }
            }

            // Size changes are picked up by the viewport check of the next
            // executed frame.
            _ => {}
        }
    }
}
