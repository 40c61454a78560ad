//! WASM exports for the orrery.
//!
//! One [`WebRunner`] lives in a `thread_local!`. The page calls
//! `orrery_init`, then drives `orrery_frame` from `requestAnimationFrame`
//! while `orrery_frame_requested` returns true, forwards pointer events,
//! and reads proxy instances and selection events straight out of wasm
//! memory through the pointer/length accessors.

pub mod runner;

use std::cell::RefCell;

use orrery::{InputEvent, SimConfig};
use wasm_bindgen::prelude::*;

pub use runner::{EventBuffer, JsClock, WebRunner, PLAYBACK_TIME_SCALE};

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `default` (with a console warning)
/// when `orrery_init` has not been called yet.
fn with_runner<R>(default: R, f: impl FnOnce(&mut WebRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            web_sys::console::warn_1(&"orrery: not initialized, call orrery_init() first".into());
            default
        }
    })
}

fn install(runner: WebRunner) {
    RUNNER.with(|cell| {
        if let Some(mut previous) = cell.borrow_mut().replace(runner) {
            previous.shutdown();
        }
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Only the first call installs a logger; later inits keep it.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Generate a system and start the loop at [`PLAYBACK_TIME_SCALE`].
/// Omit `seed` for a fresh system each time.
#[wasm_bindgen]
pub fn orrery_init(seed: Option<u32>) {
    init_logging();
    let config = SimConfig {
        seed: seed.map(u64::from),
        time_scale: PLAYBACK_TIME_SCALE,
        ..SimConfig::default()
    };
    install(WebRunner::new(config));
    log::info!("orrery: initialized");
}

/// Like `orrery_init`, with configuration supplied as JSON. Values are
/// taken as given, so `time_scale` defaults to real time here.
#[wasm_bindgen]
pub fn orrery_init_with_config(json: &str) -> Result<(), JsValue> {
    init_logging();
    let runner = WebRunner::from_json(json).map_err(|e| js_sys::Error::new(&e.to_string()))?;
    install(runner);
    log::info!("orrery: initialized from config");
    Ok(())
}

/// Advance to `now_ms` (the `requestAnimationFrame` timestamp). Returns sub-steps run.
#[wasm_bindgen]
pub fn orrery_frame(now_ms: f64) -> u32 {
    with_runner(0, |r| r.frame(now_ms))
}

/// Whether the runner wants another frame. Reading clears the request.
#[wasm_bindgen]
pub fn orrery_frame_requested() -> bool {
    with_runner(false, |r| r.take_frame_request())
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner((), |r| r.input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner((), |r| r.input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner((), |r| r.input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner((), |r| r.input(InputEvent::Resize { width, height }));
}

/// Cancel the loop and drop every proxy. Safe to call more than once.
#[wasm_bindgen]
pub fn orrery_shutdown() {
    with_runner((), |r| r.shutdown());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(0, |r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.events().ptr())
}

/// Selection event data length in floats.
#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(0, |r| r.events().len())
}

/// Display name of the body a selection event's `index` refers to.
#[wasm_bindgen]
pub fn orrery_body_name(index: u32) -> Option<String> {
    with_runner(None, |r| r.body_name(index))
}
