use cadence_engine::coords::{ViewportDimensions, ViewportRect};
use cadence_engine::device::{DrawingContext, GraphicsApi, Surface, SurfaceProvider};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, WebGl2RenderingContext};

fn css_px(value: u32) -> String {
    format!("{value}px")
}

/// `<canvas>` element used as the drawing surface.
///
/// Backing store is `canvas.width`/`height`; the presentation size is the CSS
/// box, kept equal to the backing size.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn dimensions(&self) -> ViewportDimensions {
        ViewportDimensions::new(self.canvas.height(), self.canvas.width())
    }

    fn resize(&mut self, dimensions: ViewportDimensions) {
        self.canvas.set_width(dimensions.width);
        self.canvas.set_height(dimensions.height);

        let style = self.canvas.style();
        if let Err(e) = style
            .set_property("width", &css_px(dimensions.width))
            .and_then(|()| style.set_property("height", &css_px(dimensions.height)))
        {
            log::warn!("failed to set canvas presentation size: {e:?}");
        }
    }
}

/// WebGL2 rendering context of the surface canvas.
#[derive(Clone)]
pub struct WebGlContext {
    gl: WebGl2RenderingContext,
}

impl WebGlContext {
    pub fn gl(&self) -> &WebGl2RenderingContext {
        &self.gl
    }
}

impl DrawingContext for WebGlContext {
    fn set_viewport(&mut self, rect: ViewportRect) {
        // GL takes signed sizes; clamp rather than wrap.
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        self.gl
            .viewport(clamp(rect.x), clamp(rect.y), clamp(rect.width), clamp(rect.height));
    }
}

/// Looks canvases up by element id in the page document.
pub struct CanvasProvider {
    document: Document,
}

impl CanvasProvider {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl SurfaceProvider for CanvasProvider {
    type Surface = CanvasSurface;
    type Context = WebGlContext;

    fn find_surface(&mut self, id: &str) -> Option<CanvasSurface> {
        let canvas = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .inspect_err(|_| log::warn!("element #{id} is not a canvas"))
            .ok()?;
        Some(CanvasSurface { canvas })
    }

    fn acquire_context(&mut self, surface: &mut CanvasSurface, api: GraphicsApi) -> Option<WebGlContext> {
        match api {
            GraphicsApi::WebGl2 => {
                let gl = surface
                    .canvas
                    .get_context("webgl2")
                    .ok()
                    .flatten()?
                    .dyn_into::<WebGl2RenderingContext>()
                    .ok()?;
                Some(WebGlContext { gl })
            }
            GraphicsApi::Wgpu => {
                log::warn!("{api} contexts are only available to native hosts");
                None
            }
        }
    }
}
