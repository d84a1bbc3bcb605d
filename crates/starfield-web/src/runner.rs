use std::cell::{Cell, RefCell};
use std::rc::Rc;

use starfield::{Rng, StarfieldConfig, StarfieldResult, StarfieldRunner, SurfaceHost};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Window};

use crate::host::{host_err, CanvasBackend, DomHost};

type SharedRunner = Rc<RefCell<StarfieldRunner<CanvasBackend, Rng>>>;

/// Browser frame loop around a `StarfieldRunner`.
///
/// Owns the `requestAnimationFrame` callback and the window resize listener.
/// wasm-bindgen cannot export the generic runner, so the exported functions
/// keep one of these in a `thread_local!`.
pub struct FrameLoop {
    window: Window,
    runner: SharedRunner,
    frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    resize_cb: Closure<dyn FnMut()>,
    raf_id: Rc<Cell<i32>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Attach a fresh surface and begin animating.
    pub fn spawn(config: StarfieldConfig, seed: u64) -> StarfieldResult<Self> {
        let mut host = DomHost::new()?;
        let runner = starfield::start(&mut host, config, Rng::new(seed))?;
        let runner: SharedRunner = Rc::new(RefCell::new(runner));
        let window = host.window().clone();
        let host = Rc::new(host);

        let raf_id = Rc::new(Cell::new(0));
        let running = Rc::new(Cell::new(true));
        let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        {
            let runner = runner.clone();
            let window = window.clone();
            let raf_id = raf_id.clone();
            let running = running.clone();
            let next = frame_cb.clone();
            *frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                if !running.get() {
                    return;
                }
                if let Err(e) = runner.borrow_mut().frame(timestamp) {
                    log::error!("starfield: frame failed: {}", e);
                }
                if let Some(cb) = next.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => raf_id.set(id),
                        Err(e) => log::error!("starfield: requestAnimationFrame failed: {:?}", e),
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let resize_cb = {
            let runner = runner.clone();
            let host = host.clone();
            Closure::wrap(Box::new(move || {
                let viewport = host.viewport();
                if let Err(e) = runner.borrow_mut().resize(viewport) {
                    log::error!("starfield: resize failed: {}", e);
                }
            }) as Box<dyn FnMut()>)
        };
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        let listening = window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "resize",
                resize_cb.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(host_err);
        let first_frame = listening.and_then(|()| match frame_cb.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(host_err),
            None => Ok(0),
        });
        match first_frame {
            Ok(id) => raf_id.set(id),
            Err(e) => {
                // No loop will ever drive this surface; take it down again.
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                frame_cb.borrow_mut().take();
                runner.borrow_mut().detach();
                return Err(e);
            }
        }

        Ok(Self {
            window,
            runner,
            frame_cb,
            resize_cb,
            raf_id,
            running,
        })
    }

    /// Current backing size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        let runner = self.runner.borrow();
        (runner.engine().surface().width(), runner.engine().surface().height())
    }

    /// Cancel the frame callback, drop the resize listener and detach the canvas.
    pub fn stop(self) {
        self.running.set(false);
        if let Err(e) = self.window.cancel_animation_frame(self.raf_id.get()) {
            log::warn!("starfield: cancelAnimationFrame failed: {:?}", e);
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref())
        {
            log::warn!("starfield: removing resize listener failed: {:?}", e);
        }
        // Breaks the closure's self reference.
        self.frame_cb.borrow_mut().take();
        self.runner.borrow_mut().detach();
        log::info!("starfield: stopped");
    }
}
