mod common;
mod sierpinski;

pub use common::{regular_tetrahedron, smoothstep, Tetrahedron};
pub use sierpinski::{SierpinskiGenerator, MAX_DEPTH};
