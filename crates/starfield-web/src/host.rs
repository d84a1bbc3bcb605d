use std::f64::consts::TAU;

use starfield::{
    DrawCommand, FrameBuffer, GradientStop, Renderer, StarfieldError, StarfieldResult, Surface,
    SurfaceHost, SurfaceStyle, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

pub(crate) fn host_err(e: JsValue) -> StarfieldError {
    StarfieldError::Host(format!("{:?}", e))
}

/// Browser host: one window, surfaces are `<canvas>` elements in the body.
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    pub fn new() -> StarfieldResult<Self> {
        let window = web_sys::window().ok_or_else(|| StarfieldError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| StarfieldError::Host("no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl SurfaceHost for DomHost {
    type Backend = CanvasBackend;

    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width, height, self.window.device_pixel_ratio())
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn remove_surface(&mut self, id: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(old) => {
                old.remove();
                true
            }
            None => false,
        }
    }

    fn create_surface(&mut self, style: &SurfaceStyle) -> StarfieldResult<CanvasBackend> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(host_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| StarfieldError::Host("created element is not a canvas".into()))?;
        canvas.set_id(&style.element_id);

        let css = canvas.style();
        let z_index = style.z_index.to_string();
        let opacity = style.opacity.to_string();
        for (name, value) in [
            ("position", "fixed"),
            ("inset", "0"),
            ("z-index", z_index.as_str()),
            ("pointer-events", "none"),
            ("opacity", opacity.as_str()),
        ] {
            css.set_property(name, value).map_err(host_err)?;
        }

        let ctx = canvas
            .get_context("2d")
            .map_err(host_err)?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| StarfieldError::ContextUnavailable(style.element_id.clone()))?;

        let body = self
            .document
            .body()
            .ok_or_else(|| StarfieldError::Host("no document body".into()))?;
        body.prepend_with_node_1(&canvas).map_err(host_err)?;

        Ok(CanvasBackend { canvas, ctx })
    }
}

/// Replays a `FrameBuffer` onto a 2D canvas context.
pub struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasBackend {
    fn fill_circle(&self, x: f64, y: f64, radius: f64) -> StarfieldResult<()> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU).map_err(host_err)?;
        self.ctx.fill();
        Ok(())
    }

    fn fill_gradient(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        stops: &[GradientStop],
    ) -> StarfieldResult<()> {
        let grad = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius)
            .map_err(host_err)?;
        for stop in stops {
            grad.add_color_stop(stop.offset, &stop.color.to_css())
                .map_err(host_err)?;
        }
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.fill_circle(x, y, radius)
    }
}

impl Renderer for CanvasBackend {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn resize(&mut self, surface: &Surface) -> StarfieldResult<()> {
        self.canvas.set_width(surface.width());
        self.canvas.set_height(surface.height());
        let logical = surface.logical_size();
        let css = self.canvas.style();
        css.set_property("width", &format!("{}px", logical.x))
            .map_err(host_err)?;
        css.set_property("height", &format!("{}px", logical.y))
            .map_err(host_err)?;
        Ok(())
    }

    fn draw(&mut self, frame: &FrameBuffer) -> StarfieldResult<()> {
        self.ctx
            .clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);
        self.ctx
            .set_global_composite_operation(frame.blend.composite_operation())
            .map_err(host_err)?;

        for cmd in frame.iter() {
            if cmd.radius() <= 0.0 {
                continue;
            }
            match cmd {
                DrawCommand::Dot { center, radius, alpha } => {
                    self.ctx.set_global_alpha(frame.global_alpha * alpha);
                    self.ctx.set_fill_style_str("#ffffff");
                    self.fill_circle(center.x, center.y, *radius)?;
                }
                DrawCommand::Flare { center, radius, stops }
                | DrawCommand::Halo { center, radius, stops } => {
                    self.ctx.set_global_alpha(frame.global_alpha);
                    self.fill_gradient(center.x, center.y, *radius, stops)?;
                }
            }
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.canvas.remove();
    }
}
