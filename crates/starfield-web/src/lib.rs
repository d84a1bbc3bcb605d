pub mod host;
pub mod runner;

use std::cell::RefCell;

use starfield::{StarfieldConfig, StarfieldError};
use wasm_bindgen::prelude::*;

pub use host::{CanvasBackend, DomHost};
pub use runner::FrameLoop;

thread_local! {
    static ACTIVE: RefCell<Option<FrameLoop>> = RefCell::new(None);
}

fn with_loop<R>(f: impl FnOnce(&FrameLoop) -> R) -> Option<R> {
    ACTIVE.with(|cell| cell.borrow().as_ref().map(f))
}

fn to_js(e: StarfieldError) -> JsValue {
    log::error!("starfield: {}", e);
    JsValue::from_str(&e.to_string())
}

fn seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (noise << 32) ^ js_sys::Date::now() as u64
}

/// Start the starfield with the shipped look. Calling it again replaces the
/// running instance.
#[wasm_bindgen]
pub fn start_starfield() -> Result<(), JsValue> {
    launch(StarfieldConfig::default())
}

/// Start the starfield with a JSON configuration. Missing fields keep their defaults.
#[wasm_bindgen]
pub fn start_starfield_with_config(json: &str) -> Result<(), JsValue> {
    let config = StarfieldConfig::from_json(json).map_err(to_js)?;
    launch(config)
}

/// Stop the running starfield and remove its surface. No-op when idle.
#[wasm_bindgen]
pub fn stop_starfield() {
    if let Some(active) = ACTIVE.with(|cell| cell.borrow_mut().take()) {
        active.stop();
    }
}

#[wasm_bindgen]
pub fn starfield_width() -> u32 {
    with_loop(|l| l.size().0).unwrap_or(0)
}

#[wasm_bindgen]
pub fn starfield_height() -> u32 {
    with_loop(|l| l.size().1).unwrap_or(0)
}

fn launch(config: StarfieldConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    stop_starfield();
    let frame_loop = FrameLoop::spawn(config, seed()).map_err(to_js)?;
    ACTIVE.with(|cell| {
        *cell.borrow_mut() = Some(frame_loop);
    });
    log::info!("starfield: initialized");
    Ok(())
}
