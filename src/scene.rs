use anyhow::Context;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::animation::clamp_time;
use crate::traits::{GeometryProvider, GeometrySink};
use crate::types::MeshData;

/// Where the fractal sits in the scene
pub const MESH_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);
pub const MESH_SCALE: f32 = 2.0;

/// Fixed model transform applied to every generated mesh
pub fn model_transform() -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(MESH_SCALE), Quat::IDENTITY, MESH_OFFSET)
}

/// Installed mesh and its model transform
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub mesh: MeshData,
    pub transform: Mat4,
}

/// CPU side render graph
///
/// Holds at most one node. `revision` changes whenever the contents do, which
/// is how the renderer knows its GPU copy is stale.
#[derive(Debug, Default)]
pub struct SceneGraph {
    node: Option<SceneNode>,
    revision: u64,
    rotation: Vec3,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self) -> Option<&SceneNode> {
        self.node.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Rotate the whole scene by the same increment on every axis
    pub fn spin(&mut self, increment: f32) {
        self.rotation += Vec3::splat(increment);
    }

    /// Scene rotation composed with the node transform
    pub fn world_transform(&self) -> Option<Mat4> {
        let scene = Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        self.node.as_ref().map(|node| scene * node.transform)
    }
}

impl GeometrySink for SceneGraph {
    fn clear(&mut self) {
        if self.node.take().is_some() {
            self.revision += 1;
        }
    }

    fn install(&mut self, mesh: MeshData, transform: Mat4) {
        self.node = Some(SceneNode { mesh, transform });
        self.revision += 1;
    }
}

/// Keeps the installed geometry in step with animation time
pub struct SceneMutator<P: GeometryProvider> {
    provider: P,
    installed: Option<f64>,
}

impl<P: GeometryProvider> SceneMutator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            installed: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Time of the geometry currently installed, if any
    pub fn installed_time(&self) -> Option<f64> {
        self.installed
    }

    /// Replace the sink's contents with geometry generated at `time`.
    ///
    /// The time is clamped into the animation domain first. A provider
    /// failure is returned as is; callers treat it as fatal.
    pub fn set_time<S: GeometrySink>(&mut self, time: f64, sink: &mut S) -> anyhow::Result<f64> {
        let time = clamp_time(time);

        sink.clear();
        self.installed = None;

        let mesh = self
            .provider
            .generate(time)
            .with_context(|| format!("{} geometry generation failed at t={time}", self.provider.name()))?;

        log::debug!(
            "Installing {} geometry at t={:.3}: {} triangles",
            self.provider.name(),
            time,
            mesh.triangle_count()
        );

        sink.install(mesh, model_transform());
        self.installed = Some(time);

        Ok(time)
    }
}
