//! An animated garden: stems grow from the ground, then bloom into radial
//! flowers, redrawn every animation frame on a 2D canvas.
//!
//! The scene, its flowers and the frame scheduler are plain Rust and run
//! headless against any [`surface::Surface`]. Browser glue is only compiled
//! for wasm32.

pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod flower;
pub mod scene;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use config::GardenConfig;
pub use error::GardenError;
pub use flower::{Flower, FlowerParams, GrowthState, Leaf};
pub use scene::Scene;
pub use scheduler::{CancelToken, Clock, FrameScheduler, FrameSource, SteppedFrames};
pub use surface::{RecordingSurface, Surface};
pub use viewport::{Viewport, ViewportHost, ViewportManager};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod render;

    const CANVAS_ID: &str = "garden";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        render::start(CANVAS_ID)?;
        Ok(())
    }

    /// Stop the animation loop.
    #[wasm_bindgen]
    pub fn stop() {
        render::stop();
    }
}
