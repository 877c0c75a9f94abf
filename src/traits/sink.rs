use crate::types::MeshData;
use glam::Mat4;

/// Render graph slot that owns the currently displayed geometry
pub trait GeometrySink {
    /// Release everything currently installed
    fn clear(&mut self);

    /// Install a mesh at the given model transform
    fn install(&mut self, mesh: MeshData, transform: Mat4);
}
