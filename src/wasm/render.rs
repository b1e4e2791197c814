use super::canvas::{CanvasHost, PerformanceClock};
use crate::config::GardenConfig;
use crate::error::GardenError;
use crate::scene::Scene;
use crate::scheduler::{CancelToken, Clock, FrameScheduler};
use crate::viewport::ViewportManager;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

thread_local! {
    static RUNNING: RefCell<Option<CancelToken>> = RefCell::new(None);
}

fn entropy_seed(clock: &impl Clock) -> u64 {
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (noise << 32) ^ clock.now_ms().to_bits()
}

/// Start the garden on the canvas with id `canvas_id`, sized to the window.
pub fn start(canvas_id: &str) -> Result<(), GardenError> {
    let window = window().ok_or(GardenError::NoWindow)?;
    let document = window.document().ok_or(GardenError::NoDocument)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| GardenError::CanvasNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GardenError::NotACanvas(canvas_id.to_owned()))?;
    let mut ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GardenError::ContextUnavailable)?
        .dyn_into()
        .map_err(|_| GardenError::ContextUnavailable)?;

    // Size the canvas before any flower samples its stem target
    let host = Rc::new(RefCell::new(CanvasHost::new(window.clone(), canvas)));
    let viewport = ViewportManager::attach(&mut *host.borrow_mut());

    let resize_closure = {
        let host = host.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move || {
            viewport.handle_resize(&mut *host.borrow_mut());
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let clock = PerformanceClock::new(&window);
    let config = GardenConfig::with_seed(entropy_seed(&clock));
    let scene = Scene::bootstrap(
        &config,
        viewport.current(),
        &mut StdRng::seed_from_u64(config.seed),
    );
    let mut scheduler = FrameScheduler::new(scene, viewport, &config, &clock);

    if let Some(previous) = RUNNING.with(|r| r.replace(Some(scheduler.cancel_token()))) {
        previous.cancel();
    }

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let raf_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if !scheduler.tick(now, &mut ctx) {
            log::info!("garden stopped after {} frames", scheduler.frames_rendered());
            return;
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = raf_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    log::info!("garden started on #{}", canvas_id);
    Ok(())
}

/// Cancel the running garden, if any. The pending frame draws nothing and
/// does not reschedule.
pub fn stop() {
    if let Some(token) = RUNNING.with(|r| r.borrow_mut().take()) {
        token.cancel();
    }
}
