pub mod halo;
pub mod peaks;
pub mod render;
