//! Space-filling curve over a 3-D grid of cells.

pub mod extent;
pub mod snake;
pub mod vector;

pub use extent::{Extents, GridSpec, AUTO_AXIS};
pub use snake::{bounce, triangle_wave, CurveStep, SnakeCurve, SnakeCursor};
pub use vector::Vector3;
