pub mod camera;
pub mod frame;
pub mod surface;
pub mod traits;

// Re-export key types for convenient access
pub use camera::CameraDrift;
pub use frame::{BlendMode, DrawCommand, FrameBuffer, GradientStop, Rgba};
pub use surface::{wrap_coord, Surface, Viewport};
pub use traits::{Renderer, SurfaceHost};
