pub mod layer;
pub mod star;
