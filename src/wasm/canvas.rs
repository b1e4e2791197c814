use crate::scheduler::Clock;
use crate::surface::{Gradient, GradientShape, Paint, Rect, Surface};
use crate::viewport::{Viewport, ViewportHost};
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, Performance, Window};

/// Canvas calls only fail on invalid geometry, which the scene clamps away.
/// Anything that slips through is logged and the frame carries on.
fn warn_on_err(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("canvas {} failed: {:?}", op, err);
    }
}

fn build_gradient(
    ctx: &CanvasRenderingContext2d,
    gradient: &Gradient,
) -> Result<CanvasGradient, JsValue> {
    let built = match gradient.shape {
        GradientShape::Linear { from, to } => ctx.create_linear_gradient(from.x, from.y, to.x, to.y),
        GradientShape::Radial {
            inner,
            inner_radius,
            outer,
            outer_radius,
        } => ctx.create_radial_gradient(
            inner.x,
            inner.y,
            inner_radius,
            outer.x,
            outer.y,
            outer_radius,
        )?,
    };
    for stop in &gradient.stops {
        built.add_color_stop(stop.offset, &stop.color.to_string())?;
    }
    Ok(built)
}

fn set_fill(ctx: &CanvasRenderingContext2d, paint: &Paint) {
    match paint {
        Paint::Solid(color) => ctx.set_fill_style_str(&color.to_string()),
        Paint::Gradient(gradient) => match build_gradient(ctx, gradient) {
            Ok(built) => ctx.set_fill_style_canvas_gradient(&built),
            Err(err) => log::warn!("fill gradient failed: {:?}", err),
        },
    }
}

fn set_stroke(ctx: &CanvasRenderingContext2d, paint: &Paint) {
    match paint {
        Paint::Solid(color) => ctx.set_stroke_style_str(&color.to_string()),
        Paint::Gradient(gradient) => match build_gradient(ctx, gradient) {
            Ok(built) => ctx.set_stroke_style_canvas_gradient(&built),
            Err(err) => log::warn!("stroke gradient failed: {:?}", err),
        },
    }
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn clear_rect(&mut self, rect: Rect) {
        CanvasRenderingContext2d::clear_rect(self, rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        set_fill(self, paint);
        CanvasRenderingContext2d::fill_rect(self, rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, point: DVec2) {
        CanvasRenderingContext2d::move_to(self, point.x, point.y);
    }

    fn line_to(&mut self, point: DVec2) {
        CanvasRenderingContext2d::line_to(self, point.x, point.y);
    }

    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2) {
        CanvasRenderingContext2d::quadratic_curve_to(self, control.x, control.y, to.x, to.y);
    }

    fn ellipse(&mut self, center: DVec2, radii: DVec2) {
        warn_on_err(
            "ellipse",
            CanvasRenderingContext2d::ellipse(self, center.x, center.y, radii.x, radii.y, 0.0, 0.0, TAU),
        );
    }

    fn arc(&mut self, center: DVec2, radius: f64) {
        warn_on_err(
            "arc",
            CanvasRenderingContext2d::arc(self, center.x, center.y, radius, 0.0, TAU),
        );
    }

    fn fill(&mut self, paint: &Paint) {
        set_fill(self, paint);
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self, paint: &Paint, line_width: f64) {
        set_stroke(self, paint);
        self.set_line_width(line_width);
        CanvasRenderingContext2d::stroke(self);
    }
}

/// The window reports the size, the canvas gets resized to it.
pub struct CanvasHost {
    window: Window,
    canvas: HtmlCanvasElement,
}

impl CanvasHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        Self { window, canvas }
    }
}

impl ViewportHost for CanvasHost {
    fn inner_size(&self) -> Viewport {
        let dim = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        Viewport::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn resize_surface(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }
}

/// `performance.now()`, falling back to `Date.now()` where unavailable.
pub struct PerformanceClock(Option<Performance>);

impl PerformanceClock {
    pub fn new(window: &Window) -> Self {
        Self(window.performance())
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.0 {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}
