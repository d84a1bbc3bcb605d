pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{CameraSpeed, HaloConfig, Span, StarfieldConfig, SurfaceStyle};
pub use api::engine::{FrameReport, Starfield};
pub use api::error::{StarfieldError, StarfieldResult};
pub use api::runner::{start, StarfieldRunner};
pub use components::layer::LayerConfig;
pub use components::star::{PeakPhase, Star};
pub use core::field::ParticleField;
pub use core::rng::{RandomSource, Rng};
pub use core::time::SimClock;
pub use renderer::camera::CameraDrift;
pub use renderer::frame::{BlendMode, DrawCommand, FrameBuffer, GradientStop, Rgba};
pub use renderer::surface::{Surface, Viewport};
pub use renderer::traits::{Renderer, SurfaceHost};
pub use systems::halo::{Halo, HaloSample, HaloState, HaloTransition};
pub use systems::peaks::{PeakAdmission, PeakScheduler, PeakTransitions};

pub use extensions::{ease, lerp, Easing};
