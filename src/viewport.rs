//! Drawing-surface dimensions, refreshed on host resize signals.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width_f(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f(&self) -> f64 {
        f64::from(self.height)
    }
}

/// What the manager needs from the hosting environment.
pub trait ViewportHost {
    /// Size the host currently reports for the visible area
    fn inner_size(&self) -> Viewport;

    /// Resize the backing drawing surface to exactly `viewport`
    fn resize_surface(&mut self, viewport: Viewport);
}

/// Shared handle to the current viewport.
///
/// Clones observe the same dimensions. Updates are a single `Cell::set` of a
/// `Copy` value, so a reader between ticks never sees a half-written size.
#[derive(Clone, Debug, Default)]
pub struct ViewportManager {
    current: Rc<Cell<Viewport>>,
}

impl ViewportManager {
    /// Creates a manager and performs the initial measurement. Must happen
    /// before any flower is created, as stem targets scale with the height.
    pub fn attach(host: &mut impl ViewportHost) -> Self {
        let manager = Self::default();
        manager.handle_resize(host);
        manager
    }

    pub fn current(&self) -> Viewport {
        self.current.get()
    }

    /// Re-reads the host size and resizes the drawing surface to match.
    pub fn handle_resize(&self, host: &mut impl ViewportHost) -> Viewport {
        let viewport = host.inner_size();
        host.resize_surface(viewport);
        let previous = self.current.replace(viewport);
        if previous != viewport {
            log::debug!(
                "viewport resized {}x{} -> {}x{}",
                previous.width,
                previous.height,
                viewport.width,
                viewport.height
            );
        }
        viewport
    }
}
