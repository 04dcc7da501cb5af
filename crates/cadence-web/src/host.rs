use cadence_engine::coords::HostSize;
use cadence_engine::host::{Clock, FrameHandle, FrameSource, HostWindow, Notifier};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Page host: `requestAnimationFrame`, `Date.now()`, `innerWidth`/`innerHeight`,
/// `alert`.
pub struct BrowserHost {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl BrowserHost {
    /// `callback` is what every frame request schedules.
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        // NaN maps to an empty viewport downstream.
        value.ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
    }
}

impl FrameSource for BrowserHost {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle::new(u64::from(id.unsigned_abs())),
            Err(e) => {
                // rAF ids are non-zero, so 0 never matches a live request.
                log::error!("requestAnimationFrame failed: {e:?}");
                FrameHandle::new(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let Ok(id) = i32::try_from(handle.raw()) else {
            return;
        };
        if id == 0 {
            return;
        }
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

impl Clock for BrowserHost {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

impl HostWindow for BrowserHost {
    fn usable_size(&self) -> HostSize {
        HostSize::new(
            Self::dimension(self.window.inner_height()),
            Self::dimension(self.window.inner_width()),
        )
    }
}

impl Notifier for BrowserHost {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed: {e:?}");
        }
    }
}
