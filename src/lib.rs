pub mod engine;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod midi;
pub mod ops;
pub mod ports;
pub mod trace;

pub use engine::Engine;
pub use error::Error;
pub use grid::Grid;
