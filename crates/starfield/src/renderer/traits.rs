//! Host and backend contracts.
//!
//! The engine itself never touches a platform API. A host creates and removes
//! drawing surfaces and reports viewport and time; a renderer replays the
//! `FrameBuffer` the engine produces. `starfield-web` implements both on top
//! of the DOM and `CanvasRenderingContext2d`.

use super::frame::FrameBuffer;
use super::surface::{Surface, Viewport};
use crate::api::config::SurfaceStyle;
use crate::api::error::StarfieldResult;

/// Drawing backend for one surface.
pub trait Renderer {
    /// Backend identifier (e.g. "canvas2d").
    fn backend(&self) -> &'static str;

    /// Match the backing resolution to `surface`.
    fn resize(&mut self, surface: &Surface) -> StarfieldResult<()>;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameBuffer) -> StarfieldResult<()>;

    /// Take the surface off the host. Nothing is drawn afterwards.
    fn detach(&mut self);
}

/// The environment hosting the starfield: surfaces, viewport and clock.
pub trait SurfaceHost {
    type Backend: Renderer;

    /// Current viewport size and device scale.
    fn viewport(&self) -> Viewport;

    /// Monotonic time in milliseconds.
    fn now_ms(&self) -> f64;

    /// Remove the surface with the given identifier. Returns true if one existed.
    fn remove_surface(&mut self, id: &str) -> bool;

    /// Create and attach a new surface styled by `style`.
    fn create_surface(&mut self, style: &SurfaceStyle) -> StarfieldResult<Self::Backend>;
}
