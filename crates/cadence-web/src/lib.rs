//! Browser host for the cadence frame driver.
//!
//! Drives a JS engine module on a `<canvas>` with WebGL2, paced by
//! `requestAnimationFrame`.
//!
//! ```js
//! import init, { start } from "./cadence_web.js";
//! await init();
//! const driver = await start("canvas", import("./engine.js"));
//! // later
//! driver.shutdown();
//! ```

mod canvas;
mod host;
mod module;
mod slot;

use std::cell::Cell;
use std::rc::Rc;

use cadence_engine::DriverConfig;
use cadence_engine::scheduler::FrameScheduler;
use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

pub use canvas::{CanvasProvider, CanvasSurface, WebGlContext};
pub use host::BrowserHost;
pub use module::JsModuleLoader;

use slot::SessionSlot;

struct Session {
    host: BrowserHost,
    scheduler: FrameScheduler<CanvasSurface, WebGlContext>,
}

/// State shared by the rAF callback and `Driver`.
///
/// The callback's strong reference keeps the loop alive until `shutdown`.
/// Counters are mirrored outside the slot so the engine can read them from
/// inside its own `update`/`render`.
struct Shared {
    session: SessionSlot<Session>,
    frames_drawn: Cell<u64>,
    halted: Cell<bool>,
}

impl Shared {
    fn new() -> Self {
        Self {
            session: SessionSlot::new(),
            frames_drawn: Cell::new(0),
            halted: Cell::new(false),
        }
    }

    fn stop(&self) {
        if let Some(Session { mut host, scheduler }) = self.session.request_stop() {
            scheduler.shutdown(&mut host);
        }
    }
}

/// Runs when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn install_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"cadence: logger already installed".into());
    }
}

fn frame_callback(shared: Rc<Shared>) -> Closure<dyn FnMut(f64)> {
    Closure::new(move |_timestamp: f64| {
        let ticked = shared.session.with(|session| {
            let result = session.scheduler.tick(&mut session.host);
            (result.is_err(), session.scheduler.frames_drawn())
        });

        match ticked {
            Some((failed, frames)) => {
                shared.frames_drawn.set(frames);
                if failed {
                    // The scheduler logged the failure and cancelled its frame.
                    shared.halted.set(true);
                    log::info!("frame loop halted; call shutdown() to release the engine");
                }
            }
            None => log::warn!("frame callback skipped: session busy or released"),
        }

        // `shutdown()` called by the engine during this frame. wasm-bindgen
        // defers freeing this closure until the call returns.
        if let Some(Session { mut host, scheduler }) = shared.session.take_if_stop_requested() {
            scheduler.shutdown(&mut host);
        }
    })
}

/// Loads the engine module, bootstraps the canvas `surface_id` (default
/// `"canvas"`) and starts the frame loop.
///
/// Rejects on load or bootstrap failure; an unsupported WebGL2 context is also
/// reported with `alert`.
#[wasm_bindgen]
pub async fn start(surface_id: Option<String>, module: Promise) -> Result<Driver, JsValue> {
    let mut config = DriverConfig::default();
    if let Some(id) = surface_id {
        config.surface_id = id;
    }

    let window = web_sys::window().ok_or_else(|| JsError::new("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("window has no document"))?;

    let shared = Rc::new(Shared::new());
    let mut host = BrowserHost::new(window, frame_callback(shared.clone()));
    let mut provider = CanvasProvider::new(document);
    let loader = JsModuleLoader::new(module);

    let scheduler = cadence_engine::launch(&config, &loader, &mut provider, &mut host)
        .await
        .map_err(|e| JsError::new(&e.to_string()))?;

    // No frame can fire before this returns to the event loop.
    shared.session.install(Session { host, scheduler });
    log::info!("frame loop started on #{}", config.surface_id);

    Ok(Driver { shared })
}

/// Handle to a running frame loop.
///
/// The loop keeps itself alive; dropping this handle does not stop it. Every
/// method may be called by the engine from inside its own `update`/`render`.
#[wasm_bindgen]
pub struct Driver {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Driver {
    /// Cancels the pending frame and releases the engine client and surface.
    ///
    /// Called from inside the engine, teardown happens as soon as the current
    /// frame returns.
    pub fn shutdown(&self) {
        self.shared.stop();
    }

    /// Frames executed so far.
    #[wasm_bindgen(js_name = framesDrawn)]
    pub fn frames_drawn(&self) -> f64 {
        self.shared.frames_drawn.get() as f64
    }

    /// `true` once an engine failure has stopped the loop.
    #[wasm_bindgen(js_name = isHalted)]
    pub fn is_halted(&self) -> bool {
        self.shared.halted.get()
    }
}
