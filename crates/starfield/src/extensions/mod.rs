// extensions/mod.rs
//
// Math helpers shared by the schedulers and the render pipeline.
// Decoupled from stars and surfaces.

pub mod easing;

pub use easing::{Easing, lerp, ease};
