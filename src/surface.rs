//! The imperative 2D drawing interface the scene renders through.
//!
//! In the browser this is `CanvasRenderingContext2d`; headless callers and
//! tests use [`RecordingSurface`], which keeps every command for inspection.

use crate::color::Rgba;
use glam::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GradientShape {
    Linear {
        from: DVec2,
        to: DVec2,
    },
    Radial {
        inner: DVec2,
        inner_radius: f64,
        outer: DVec2,
        outer_radius: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn linear(from: DVec2, to: DVec2) -> Self {
        Self {
            shape: GradientShape::Linear { from, to },
            stops: Vec::with_capacity(3),
        }
    }

    pub fn radial(center: DVec2, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            shape: GradientShape::Radial {
                inner: center,
                inner_radius,
                outer: center,
                outer_radius,
            },
            stops: Vec::with_capacity(3),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop { offset, color });
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(Gradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

/// Drawing operations consumed by the scene. Paths follow canvas semantics:
/// `begin_path` starts a new path, `fill`/`stroke` paint the current one.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);

    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2);
    /// Full axis-aligned ellipse
    fn ellipse(&mut self, center: DVec2, radii: DVec2);
    /// Full circle
    fn arc(&mut self, center: DVec2, radius: f64);

    fn fill(&mut self, paint: &Paint);
    fn stroke(&mut self, paint: &Paint, line_width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClearRect(Rect),
    FillRect(Rect, Paint),
    BeginPath,
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadraticCurveTo { control: DVec2, to: DVec2 },
    Ellipse { center: DVec2, radii: DVec2 },
    Arc { center: DVec2, radius: f64 },
    Fill(Paint),
    Stroke { paint: Paint, line_width: f64 },
}

impl DrawCommand {
    /// True if every coordinate, radius and width in the command is finite.
    pub fn is_finite(&self) -> bool {
        let paint_finite = |paint: &Paint| match paint {
            Paint::Solid(_) => true,
            Paint::Gradient(g) => match g.shape {
                GradientShape::Linear { from, to } => from.is_finite() && to.is_finite(),
                GradientShape::Radial {
                    inner,
                    inner_radius,
                    outer,
                    outer_radius,
                } => {
                    inner.is_finite()
                        && outer.is_finite()
                        && inner_radius.is_finite()
                        && outer_radius.is_finite()
                }
            },
        };

        match self {
            DrawCommand::Save
            | DrawCommand::Restore
            | DrawCommand::BeginPath => true,
            DrawCommand::ClearRect(r) => r.origin.is_finite() && r.size.is_finite(),
            DrawCommand::FillRect(r, p) => {
                r.origin.is_finite() && r.size.is_finite() && paint_finite(p)
            }
            DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => p.is_finite(),
            DrawCommand::QuadraticCurveTo { control, to } => control.is_finite() && to.is_finite(),
            DrawCommand::Ellipse { center, radii } => center.is_finite() && radii.is_finite(),
            DrawCommand::Arc { center, radius } => center.is_finite() && radius.is_finite(),
            DrawCommand::Fill(p) => paint_finite(p),
            DrawCommand::Stroke { paint, line_width } => {
                paint_finite(paint) && line_width.is_finite()
            }
        }
    }
}

/// A surface that records commands instead of rasterising them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect(rect, paint.clone()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2) {
        self.commands
            .push(DrawCommand::QuadraticCurveTo { control, to });
    }

    fn ellipse(&mut self, center: DVec2, radii: DVec2) {
        self.commands.push(DrawCommand::Ellipse { center, radii });
    }

    fn arc(&mut self, center: DVec2, radius: f64) {
        self.commands.push(DrawCommand::Arc { center, radius });
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(paint.clone()));
    }

    fn stroke(&mut self, paint: &Paint, line_width: f64) {
        self.commands.push(DrawCommand::Stroke {
            paint: paint.clone(),
            line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{GROUND, SKY_TOP};

    #[test]
    fn records_in_order() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(DVec2::new(1.0, 2.0));
        surface.line_to(DVec2::new(3.0, 4.0));
        surface.fill(&GROUND.into());

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(DVec2::new(1.0, 2.0)),
                DrawCommand::LineTo(DVec2::new(3.0, 4.0)),
                DrawCommand::Fill(Paint::Solid(GROUND)),
            ]
        );

        let taken = surface.take();
        assert_eq!(taken.len(), 4);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn gradient_builder_keeps_stop_order() {
        let g = Gradient::linear(DVec2::ZERO, DVec2::new(0.0, 100.0))
            .stop(0.0, SKY_TOP)
            .stop(1.0, GROUND);
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].offset, 0.0);
        assert_eq!(g.stops[1].color, GROUND);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!DrawCommand::Arc {
            center: DVec2::ZERO,
            radius: f64::NAN
        }
        .is_finite());
        assert!(DrawCommand::Arc {
            center: DVec2::ZERO,
            radius: 6.0
        }
        .is_finite());
    }
}
