//! Deterministic fakes for the host, surface, context and engine client.

use std::cell::RefCell;
use std::future::{self, Future};
use std::rc::Rc;

use crate::coords::{HostSize, ViewportDimensions, ViewportRect};
use crate::core::{EngineClient, EngineModule, FactoryModule, ModuleLoader};
use crate::device::{DrawingContext, GraphicsApi, Surface, SurfaceProvider};
use crate::error::LoadError;
use crate::host::{Clock, FrameHandle, FrameSource, HostWindow, Notifier};

// ── engine client ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Update { elapsed_ms: f64, height: f64, width: f64 },
    Render,
}

#[derive(Debug, Default)]
struct LogInner {
    calls: Vec<Call>,
    instances: usize,
    dropped: usize,
}

/// Shared record of engine calls, readable after the client is moved away.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<LogInner>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    /// `(elapsed_ms, height, width)` of every update call.
    pub fn updates(&self) -> Vec<(f64, f64, f64)> {
        self.0
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match *c {
                Call::Update { elapsed_ms, height, width } => Some((elapsed_ms, height, width)),
                Call::Render => None,
            })
            .collect()
    }

    pub fn renders(&self) -> usize {
        self.0.borrow().calls.iter().filter(|c| **c == Call::Render).count()
    }

    pub fn instances(&self) -> usize {
        self.0.borrow().instances
    }

    pub fn dropped(&self) -> usize {
        self.0.borrow().dropped
    }
}

/// Engine client that records every call and fails on request.
pub struct ScriptedClient {
    log: CallLog,
    updates: usize,
    renders: usize,
    fail_update_at: Option<usize>,
    fail_render_at: Option<usize>,
}

impl ScriptedClient {
    pub fn new(log: CallLog) -> Self {
        log.0.borrow_mut().instances += 1;
        Self {
            log,
            updates: 0,
            renders: 0,
            fail_update_at: None,
            fail_render_at: None,
        }
    }

    /// Fails the `n`th (zero-based) update call.
    pub fn failing_update_at(mut self, n: usize) -> Self {
        self.fail_update_at = Some(n);
        self
    }

    /// Fails the `n`th (zero-based) render call.
    pub fn failing_render_at(mut self, n: usize) -> Self {
        self.fail_render_at = Some(n);
        self
    }
}

impl EngineClient for ScriptedClient {
    fn update(&mut self, elapsed_ms: f64, height: f64, width: f64) -> anyhow::Result<()> {
        self.log.0.borrow_mut().calls.push(Call::Update { elapsed_ms, height, width });
        let n = self.updates;
        self.updates += 1;
        anyhow::ensure!(self.fail_update_at != Some(n), "scripted update failure #{n}");
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.log.0.borrow_mut().calls.push(Call::Render);
        let n = self.renders;
        self.renders += 1;
        anyhow::ensure!(self.fail_render_at != Some(n), "scripted render failure #{n}");
        Ok(())
    }
}

impl Drop for ScriptedClient {
    fn drop(&mut self) {
        self.log.0.borrow_mut().dropped += 1;
    }
}

pub fn scripted_module(log: CallLog) -> impl EngineModule<FakeContext> {
    FactoryModule::new(move |_: &FakeContext| {
        Ok(Box::new(ScriptedClient::new(log.clone())) as Box<dyn EngineClient>)
    })
}

/// Loader resolving to a scripted module, or rejecting.
pub struct FakeLoader {
    log: CallLog,
    reject: bool,
}

impl FakeLoader {
    pub fn resolving(log: CallLog) -> Self {
        Self { log, reject: false }
    }

    pub fn rejecting() -> Self {
        Self { log: CallLog::default(), reject: true }
    }
}

impl ModuleLoader<FakeContext> for FakeLoader {
    fn load(&self) -> impl Future<Output = Result<Box<dyn EngineModule<FakeContext>>, LoadError>> {
        let result = if self.reject {
            Err(LoadError::Rejected("network error".to_string()))
        } else {
            let module: Box<dyn EngineModule<FakeContext>> = Box::new(scripted_module(self.log.clone()));
            Ok(module)
        };
        future::ready(result)
    }
}

// ── surface / context ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeSurface {
    dims: ViewportDimensions,
    pub resizes: Vec<ViewportDimensions>,
}

impl Surface for FakeSurface {
    fn dimensions(&self) -> ViewportDimensions {
        self.dims
    }

    fn resize(&mut self, dimensions: ViewportDimensions) {
        self.dims = dimensions;
        self.resizes.push(dimensions);
    }
}

#[derive(Debug, Default)]
pub struct FakeContext {
    pub viewports: Vec<ViewportRect>,
}

impl DrawingContext for FakeContext {
    fn set_viewport(&mut self, rect: ViewportRect) {
        self.viewports.push(rect);
    }
}

pub struct FakeProvider {
    id: String,
    supported: bool,
    pub surface_lookups: usize,
    pub context_requests: Vec<GraphicsApi>,
}

impl FakeProvider {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            supported: true,
            surface_lookups: 0,
            context_requests: Vec::new(),
        }
    }

    /// Every context request reports the API as unsupported.
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }
}

impl SurfaceProvider for FakeProvider {
    type Surface = FakeSurface;
    type Context = FakeContext;

    fn find_surface(&mut self, id: &str) -> Option<FakeSurface> {
        self.surface_lookups += 1;
        (id == self.id).then(FakeSurface::default)
    }

    fn acquire_context(&mut self, _surface: &mut FakeSurface, api: GraphicsApi) -> Option<FakeContext> {
        self.context_requests.push(api);
        self.supported.then(FakeContext::default)
    }
}

// ── host ──────────────────────────────────────────────────────────────────

/// Host with a manual clock and one-shot frame requests fired by the test.
pub struct FakeHost {
    pub now: f64,
    pub size: HostSize,
    pub pending: Option<FrameHandle>,
    pub requests: usize,
    pub cancelled: Vec<FrameHandle>,
    pub alerts: Vec<String>,
    next_id: u64,
}

impl FakeHost {
    pub fn new(size: HostSize) -> Self {
        Self {
            now: 0.0,
            size,
            pending: None,
            requests: 0,
            cancelled: Vec::new(),
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    /// Consumes the pending request, as the host does when it invokes the
    /// callback. Returns `false` if nothing was requested.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameSource for FakeHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id);
        self.next_id += 1;
        self.requests += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

impl Clock for FakeHost {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

impl HostWindow for FakeHost {
    fn usable_size(&self) -> HostSize {
        self.size
    }
}

impl Notifier for FakeHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
