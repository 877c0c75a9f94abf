use crate::types::MeshData;
use thiserror::Error;

/// Errors a geometry provider can report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("time {0} is not a finite number")]
    NonFiniteTime(f64),

    #[error("time {time} is outside the domain [0, {max}]")]
    OutOfDomain { time: f64, max: f64 },

    #[error("mesh would need {0} vertices, more than a 32-bit index buffer can address")]
    TooManyVertices(usize),
}

/// Produces mesh geometry for a point in animation time
///
/// Implementations must be deterministic: the same `time` always yields the
/// same mesh.
pub trait GeometryProvider {
    fn generate(&self, time: f64) -> Result<MeshData, GeometryError>;

    /// Provider name for logging
    fn name(&self) -> &str {
        "Geometry"
    }
}
