use std::future::Future;

use cadence_engine::LoadError;
use cadence_engine::core::{EngineClient, EngineModule, ModuleLoader};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const CLIENT_EXPORT: &str = "Client";

/// Readable text for a thrown/rejected JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow::anyhow!(describe(&value))
}

fn method(target: &JsValue, name: &str) -> anyhow::Result<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(|_| anyhow::anyhow!("engine client has no `{name}` method"))
}

/// Resolves a JS module namespace promise (e.g. a dynamic `import()`).
///
/// The JS `Client` is constructed with no arguments, so the loader serves any
/// drawing context type.
pub struct JsModuleLoader {
    module: Promise,
}

impl JsModuleLoader {
    pub fn new(module: Promise) -> Self {
        Self { module }
    }
}

impl<C> ModuleLoader<C> for JsModuleLoader {
    fn load(&self) -> impl Future<Output = Result<Box<dyn EngineModule<C>>, LoadError>> {
        let promise = self.module.clone();
        async move {
            let namespace = JsFuture::from(promise)
                .await
                .map_err(|e| LoadError::Rejected(describe(&e)))?;

            let client = Reflect::get(&namespace, &JsValue::from_str(CLIENT_EXPORT))
                .ok()
                .and_then(|v| v.dyn_into::<Function>().ok())
                .ok_or_else(|| LoadError::MissingExport(CLIENT_EXPORT.to_string()))?;

            log::debug!("engine module loaded");
            let module: Box<dyn EngineModule<C>> = Box::new(JsEngineModule { client });
            Ok(module)
        }
    }
}

/// Loaded module: the `Client` constructor.
struct JsEngineModule {
    client: Function,
}

impl<C> EngineModule<C> for JsEngineModule {
    fn instantiate(&self, _context: &C) -> anyhow::Result<Box<dyn EngineClient>> {
        let this = Reflect::construct(&self.client, &Array::new()).map_err(js_error)?;
        let update = method(&this, "update")?;
        let render = method(&this, "render")?;
        Ok(Box::new(JsEngineClient { this, update, render }))
    }
}

/// Engine client instance living on the JS side.
struct JsEngineClient {
    this: JsValue,
    update: Function,
    render: Function,
}

impl EngineClient for JsEngineClient {
    fn update(&mut self, elapsed_ms: f64, height: f64, width: f64) -> anyhow::Result<()> {
        self.update
            .call3(
                &self.this,
                &JsValue::from_f64(elapsed_ms),
                &JsValue::from_f64(height),
                &JsValue::from_f64(width),
            )
            .map_err(js_error)?;
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.render.call0(&self.this).map_err(js_error)?;
        Ok(())
    }
}
