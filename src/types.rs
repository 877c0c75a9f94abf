use glam::{Mat4, Vec3};

/// Mesh vertex as uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub barycentric: [f32; 3], // Corner weights, used for edge glow
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    pub const fn new(position: [f32; 3], normal: [f32; 3], barycentric: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            barycentric,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Append a flat-shaded triangle
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        let base = self.vertices.len() as u32;

        self.vertices.extend([
            Vertex::new(a.to_array(), normal, [1.0, 0.0, 0.0]),
            Vertex::new(b.to_array(), normal, [0.0, 1.0, 0.0]),
            Vertex::new(c.to_array(), normal, [0.0, 0.0, 1.0]),
        ]);
        self.indices.extend([base, base + 1, base + 2]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds of all vertices, None for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

/// Uniform block shared by the vertex and fragment stages
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformBlock {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub fractal_index: f32,
    pub time: f32,
    pub color: f32,
    pub _pad: [f32; 3], // WGSL rounds the struct up to 16 bytes
}

impl UniformBlock {
    pub fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            resolution: [0.0, 0.0],
            fractal_index: 0.0,
            time: 0.0,
            color: 0.0,
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // two mat4x4 (128) + vec2 (8) + three f32 (12), rounded up to 16
        assert_eq!(std::mem::size_of::<UniformBlock>(), 160);
    }

    #[test]
    fn vertex_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
    }

    #[test]
    fn push_triangle_computes_face_normal() {
        let mut mesh = MeshData::default();
        mesh.push_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn bounds_of_empty_mesh() {
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut mesh = MeshData::default();
        mesh.push_triangle(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, -4.0));

        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, 0.0, -4.0));
        assert_eq!(max, Vec3::new(2.0, 3.0, 0.0));
    }
}
