//! Frame scheduling: per-tick delta computation, update-then-draw over the
//! scene, and a cancellable loop for hosts that can drive one.

use crate::config::GardenConfig;
use crate::scene::Scene;
use crate::surface::Surface;
use crate::viewport::ViewportManager;
use std::cell::Cell;
use std::rc::Rc;

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// The host's "next visual frame" primitive. Each call waits for (or
/// simulates) the next frame and returns its timestamp in milliseconds,
/// or `None` once no more frames will come.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<f64>;
}

/// Shared stop flag for a running scheduler.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct FrameScheduler {
    scene: Scene,
    viewport: ViewportManager,
    max_dt: f64,
    last_frame: f64,
    frames: u64,
    cancel: CancelToken,
}

impl FrameScheduler {
    /// `clock` supplies the reference point for the first frame's delta.
    pub fn new(
        scene: Scene,
        viewport: ViewportManager,
        config: &GardenConfig,
        clock: &impl Clock,
    ) -> Self {
        Self {
            scene,
            viewport,
            max_dt: config.max_dt.max(0.0),
            last_frame: clock.now_ms(),
            frames: 0,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Delta in seconds to apply for a frame at `now`, capped to
    /// `[0, max_dt]`. A clock that steps backwards yields zero.
    pub fn frame_delta(&self, now: f64) -> f64 {
        let elapsed = (now - self.last_frame) / 1000.0;
        if elapsed.is_nan() {
            return 0.0;
        }
        elapsed.clamp(0.0, self.max_dt)
    }

    /// Renders one frame. Returns `false` without drawing once cancelled,
    /// in which case the host should not schedule another frame.
    pub fn tick(&mut self, now: f64, surface: &mut impl Surface) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        let dt = self.frame_delta(now);
        self.last_frame = now;

        self.scene.draw_background(surface, self.viewport.current());
        for flower in self.scene.flowers_mut() {
            flower.update(dt, now);
            flower.draw(surface, now);
        }

        self.frames += 1;
        true
    }

    /// Drives frames from `source` until it runs dry or the scheduler is
    /// cancelled. Returns the number of frames rendered by this call.
    pub fn run(&mut self, source: &mut impl FrameSource, surface: &mut impl Surface) -> u64 {
        let start = self.frames;
        while !self.cancel.is_cancelled() {
            let Some(now) = source.next_frame() else {
                break;
            };
            if !self.tick(now, surface) {
                break;
            }
        }

        let rendered = self.frames - start;
        if self.cancel.is_cancelled() {
            log::info!("garden stopped after {} frames", self.frames);
        }
        rendered
    }
}

/// Fixed-interval frame source, for headless stepping.
#[derive(Clone, Debug)]
pub struct SteppedFrames {
    next: f64,
    interval_ms: f64,
    remaining: usize,
}

impl SteppedFrames {
    pub fn new(start_ms: f64, interval_ms: f64, count: usize) -> Self {
        Self {
            next: start_ms,
            interval_ms,
            remaining: count,
        }
    }
}

impl FrameSource for SteppedFrames {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let now = self.next;
        self.next += self.interval_ms;
        Some(now)
    }
}

impl Clock for SteppedFrames {
    fn now_ms(&self) -> f64 {
        self.next
    }
}
