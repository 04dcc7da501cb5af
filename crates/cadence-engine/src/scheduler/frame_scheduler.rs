use crate::coords::ViewportDimensions;
use crate::core::EngineClient;
use crate::device::{Bootstrapped, DrawingContext, Surface};
use crate::error::{EngineFailure, EnginePhase};
use crate::host::{FrameHandle, FrameSource, Host};
use crate::time::{DEFAULT_TARGET_FPS, SchedulerState};
use crate::viewport::{DEFAULT_VIEWPORT_SCALE, ViewportMonitor};

/// Frame loop tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Upper bound on executed frames per second. Host callbacks beyond this
    /// rate are skipped.
    pub target_fps: f64,

    /// Fraction of the host window the surface occupies.
    pub viewport_scale: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            viewport_scale: DEFAULT_VIEWPORT_SCALE,
        }
    }
}

/// Summary of one executed frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// Zero-based executed-frame counter.
    pub index: u64,
    pub elapsed_ms: f64,
    pub dimensions: ViewportDimensions,
}

/// What a host tick did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The throttle interval had not elapsed; nothing ran.
    Skipped,
    /// Viewport sync, `update` and `render` ran in that order.
    Drawn(FrameReport),
    /// The loop halted on an earlier engine failure.
    Halted,
}

/// Cooperative, throttled frame loop driving one engine client.
///
/// Exists only after a successful bootstrap. Each host tick re-registers for
/// the next tick before doing any work, so skipped or slow frames never stall
/// the loop. The loop runs until [`shutdown`](Self::shutdown) or an engine
/// failure.
pub struct FrameScheduler<S, C> {
    surface: S,
    context: C,
    client: Box<dyn EngineClient>,

    monitor: ViewportMonitor,
    state: SchedulerState,

    pending: Option<FrameHandle>,
    frames_drawn: u64,
    halted: bool,
}

impl<S: Surface, C: DrawingContext> FrameScheduler<S, C> {
    /// Takes ownership of the bootstrap product, fixes the loop start time and
    /// requests the first frame.
    pub fn start<H: Host + ?Sized>(
        booted: Bootstrapped<S, C>,
        config: SchedulerConfig,
        host: &mut H,
    ) -> Self {
        let Bootstrapped { surface, context, client } = booted;
        let state = SchedulerState::new(host.now_ms(), config.target_fps);

        log::info!(
            "frame loop started (target {:.1} fps, viewport scale {})",
            config.target_fps,
            config.viewport_scale
        );

        Self {
            surface,
            context,
            client,
            monitor: ViewportMonitor::new(config.viewport_scale),
            state,
            pending: Some(host.request_frame()),
            frames_drawn: 0,
            halted: false,
        }
    }

    /// Handles one host frame callback.
    ///
    /// On engine failure the pending request is cancelled and the error is
    /// returned; the loop does not run again.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<FrameOutcome, EngineFailure> {
        if self.halted {
            return Ok(FrameOutcome::Halted);
        }

        self.pending = Some(host.request_frame());

        let now = host.now_ms();
        if !self.state.is_due(now) {
            return Ok(FrameOutcome::Skipped);
        }

        let elapsed_ms = self.state.elapsed(now);
        let dimensions =
            self.monitor
                .sync_if_changed(&mut self.surface, &mut self.context, host.usable_size());

        if let Err(failure) = self.drive_client(elapsed_ms, dimensions) {
            log::error!("{failure}: {:#}", failure.source);
            self.halt(host);
            return Err(failure);
        }

        self.state.mark_drawn(now);
        log::debug!(
            "frame {} at {elapsed_ms:.1} ms ({}x{})",
            self.frames_drawn,
            dimensions.width,
            dimensions.height
        );

        let report = FrameReport {
            index: self.frames_drawn,
            elapsed_ms,
            dimensions,
        };
        self.frames_drawn += 1;

        Ok(FrameOutcome::Drawn(report))
    }

    /// Stops the loop: deregisters the pending frame request and releases the
    /// client, context and surface.
    pub fn shutdown<F: FrameSource + ?Sized>(mut self, frames: &mut F) {
        self.halt(frames);
        log::info!("frame loop stopped after {} frames", self.frames_drawn);
    }

    fn drive_client(
        &mut self,
        elapsed_ms: f64,
        dimensions: ViewportDimensions,
    ) -> Result<(), EngineFailure> {
        self.client
            .update(elapsed_ms, f64::from(dimensions.height), f64::from(dimensions.width))
            .map_err(|e| EngineFailure::new(EnginePhase::Update, e))?;

        self.client
            .render()
            .map_err(|e| EngineFailure::new(EnginePhase::Render, e))
    }

    fn halt<F: FrameSource + ?Sized>(&mut self, frames: &mut F) {
        self.halted = true;
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn monitor(&self) -> &ViewportMonitor {
        &self.monitor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Whether a host frame request is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
