use glam::Vec3;

/// A tetrahedron given by its four corners
pub type Tetrahedron = [Vec3; 4];

pub fn should_terminate_fractal(depth: u32) -> bool {
    depth == 0
}

/// Hermite ease on [0, 1]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Regular tetrahedron centered on the origin with the given circumradius
pub fn regular_tetrahedron(radius: f32) -> Tetrahedron {
    let scale = radius / 3.0_f32.sqrt();
    [
        Vec3::new(1.0, 1.0, 1.0) * scale,
        Vec3::new(1.0, -1.0, -1.0) * scale,
        Vec3::new(-1.0, 1.0, -1.0) * scale,
        Vec3::new(-1.0, -1.0, 1.0) * scale,
    ]
}

/// Corner sub-tetrahedron: every other vertex is pulled toward `corner` by `scale`
pub fn corner_child(tet: &Tetrahedron, corner: usize, scale: f32) -> Tetrahedron {
    let anchor = tet[corner];
    tet.map(|p| anchor + (p - anchor) * scale)
}

pub fn centroid(tet: &Tetrahedron) -> Vec3 {
    (tet[0] + tet[1] + tet[2] + tet[3]) * 0.25
}
