pub mod geometry;
pub mod sink;

pub use geometry::*;
pub use sink::*;
