use std::cell::{Cell, RefCell};
use glam::{Mat4, Vec3};
use arcent::scene::{model_transform, SceneGraph, SceneMutator};
use arcent::traits::{GeometryError, GeometryProvider, GeometrySink};
use arcent::types::MeshData;
use arcent::SierpinskiGenerator;

#[derive(Debug, Clone, PartialEq)]
enum SinkOp {
    Clear,
    Install { triangles: usize, transform: Mat4 },
}

/// Sink that records every call it receives
#[derive(Default)]
struct RecordingSink {
    ops: Vec<SinkOp>,
}

impl GeometrySink for RecordingSink {
    fn clear(&mut self) {
        self.ops.push(SinkOp::Clear);
    }

    fn install(&mut self, mesh: MeshData, transform: Mat4) {
        self.ops.push(SinkOp::Install {
            triangles: mesh.triangle_count(),
            transform,
        });
    }
}

/// Provider that remembers the times it was asked for
#[derive(Default)]
struct ProbeProvider {
    requested: RefCell<Vec<f64>>,
    calls: Cell<usize>,
}

impl GeometryProvider for ProbeProvider {
    fn generate(&self, time: f64) -> Result<MeshData, GeometryError> {
        self.calls.set(self.calls.get() + 1);
        self.requested.borrow_mut().push(time);

        let mut mesh = MeshData::default();
        mesh.push_triangle(Vec3::ZERO, Vec3::new(time as f32, 0.0, 0.0), Vec3::Y);
        Ok(mesh)
    }
}

/// Provider that refuses any time past a threshold
struct FailingProvider {
    limit: f64,
}

impl GeometryProvider for FailingProvider {
    fn generate(&self, time: f64) -> Result<MeshData, GeometryError> {
        if time > self.limit {
            Err(GeometryError::OutOfDomain { time, max: self.limit })
        } else {
            let mut mesh = MeshData::default();
            mesh.push_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
            Ok(mesh)
        }
    }

    fn name(&self) -> &str {
        "Failing"
    }
}

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_set_time_clears_before_installing() {
        let mut mutator = SceneMutator::new(ProbeProvider::default());
        let mut sink = RecordingSink::default();

        mutator.set_time(1.5, &mut sink).unwrap();
        mutator.set_time(2.5, &mut sink).unwrap();

        assert_eq!(
            sink.ops,
            vec![
                SinkOp::Clear,
                SinkOp::Install { triangles: 1, transform: model_transform() },
                SinkOp::Clear,
                SinkOp::Install { triangles: 1, transform: model_transform() },
            ]
        );
    }

    #[test]
    fn test_set_time_clamps_into_domain() {
        let mut mutator = SceneMutator::new(ProbeProvider::default());
        let mut sink = RecordingSink::default();

        assert_eq!(mutator.set_time(7.0, &mut sink).unwrap(), 5.0);
        assert_eq!(mutator.set_time(-2.0, &mut sink).unwrap(), 0.0);
        assert_eq!(mutator.set_time(f64::NAN, &mut sink).unwrap(), 0.0);
        assert_eq!(mutator.set_time(3.25, &mut sink).unwrap(), 3.25);

        assert_eq!(*mutator.provider().requested.borrow(), vec![5.0, 0.0, 0.0, 3.25]);
        assert_eq!(mutator.installed_time(), Some(3.25));
    }

    #[test]
    fn test_set_time_generates_once_per_call() {
        let mut mutator = SceneMutator::new(ProbeProvider::default());
        let mut sink = RecordingSink::default();

        for t in [0.5, 0.5, 1.0] {
            mutator.set_time(t, &mut sink).unwrap();
        }

        assert_eq!(mutator.provider().calls.get(), 3);
    }

    #[test]
    fn test_set_time_is_idempotent() {
        let mut mutator = SceneMutator::new(SierpinskiGenerator::default());
        let mut graph = SceneGraph::new();

        mutator.set_time(2.37, &mut graph).unwrap();
        let first = graph.node().cloned().unwrap();

        mutator.set_time(2.37, &mut graph).unwrap();
        let second = graph.node().cloned().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_provider_failure_propagates_and_leaves_no_stale_geometry() {
        let mut mutator = SceneMutator::new(FailingProvider { limit: 1.0 });
        let mut graph = SceneGraph::new();

        mutator.set_time(0.5, &mut graph).unwrap();
        assert!(graph.node().is_some());

        let err = mutator.set_time(2.0, &mut graph).unwrap_err();

        assert!(err.to_string().contains("Failing geometry generation failed"));
        assert!(err.downcast_ref::<GeometryError>().is_some());
        assert!(graph.node().is_none());
        assert_eq!(mutator.installed_time(), None);
    }

    #[test]
    fn test_scene_graph_revision_tracks_each_rebuild() {
        let mut mutator = SceneMutator::new(SierpinskiGenerator::default());
        let mut graph = SceneGraph::new();

        mutator.set_time(0.0, &mut graph).unwrap();
        assert_eq!(graph.revision(), 1);

        // clear + install
        mutator.set_time(0.1, &mut graph).unwrap();
        assert_eq!(graph.revision(), 3);
    }

    #[test]
    fn test_installed_mesh_uses_fixed_transform() {
        let mut mutator = SceneMutator::new(SierpinskiGenerator::default());
        let mut graph = SceneGraph::new();

        mutator.set_time(4.0, &mut graph).unwrap();

        let node = graph.node().unwrap();
        assert_eq!(node.transform, model_transform());
        assert_eq!(node.transform.transform_point3(Vec3::ZERO), Vec3::new(0.0, -0.5, 0.0));
    }
}
