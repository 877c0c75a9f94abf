use crate::animation::MAX_TIME;
use crate::traits::{GeometryError, GeometryProvider};
use crate::types::MeshData;
use super::common::{centroid, corner_child, regular_tetrahedron, should_terminate_fractal, smoothstep, Tetrahedron};

/// Deepest full subdivision level, reached at `MAX_TIME`
pub const MAX_DEPTH: u32 = 5;

const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];

/// Sierpinski tetrahedron whose subdivision level follows animation time.
///
/// The integer part of `t` is the number of completed subdivisions; the
/// fractional part drives the next one, with each corner copy shrinking from
/// full size toward half size, so the mesh changes continuously with `t`.
#[derive(Debug, Clone)]
pub struct SierpinskiGenerator {
    radius: f32,
    max_depth: u32,
}

impl SierpinskiGenerator {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Full levels and the shrink factor of the partial level (None when there is none)
    fn levels(&self, time: f64) -> (u32, Option<f32>) {
        let depth = (time.floor() as u32).min(self.max_depth);
        let phase = (time - depth as f64) as f32;

        if depth >= self.max_depth || phase <= 0.0 {
            (depth, None)
        } else {
            (depth, Some(1.0 - 0.5 * smoothstep(phase)))
        }
    }

    /// Number of leaf tetrahedra emitted for `time`
    pub fn tetrahedron_count(&self, time: f64) -> usize {
        let (depth, partial) = self.levels(time);
        let leaves = if partial.is_some() { depth + 1 } else { depth };
        4usize.checked_pow(leaves).unwrap_or(usize::MAX)
    }

    fn subdivide(tet: &Tetrahedron, depth: u32, partial: Option<f32>, mesh: &mut MeshData) {
        if should_terminate_fractal(depth) {
            match partial {
                Some(scale) => {
                    for corner in 0..4 {
                        Self::emit(&corner_child(tet, corner, scale), mesh);
                    }
                }
                None => Self::emit(tet, mesh),
            }
            return;
        }

        for corner in 0..4 {
            Self::subdivide(&corner_child(tet, corner, 0.5), depth - 1, partial, mesh);
        }
    }

    fn emit(tet: &Tetrahedron, mesh: &mut MeshData) {
        let center = centroid(tet);
        for [i, j, k] in FACES {
            let (a, b, c) = (tet[i], tet[j], tet[k]);
            let normal = (b - a).cross(c - a);
            let face_center = (a + b + c) / 3.0;

            // Wind every face outward
            if normal.dot(face_center - center) < 0.0 {
                mesh.push_triangle(a, c, b);
            } else {
                mesh.push_triangle(a, b, c);
            }
        }
    }
}

impl Default for SierpinskiGenerator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl GeometryProvider for SierpinskiGenerator {
    fn generate(&self, time: f64) -> Result<MeshData, GeometryError> {
        if !time.is_finite() {
            return Err(GeometryError::NonFiniteTime(time));
        }
        if !(0.0..=MAX_TIME).contains(&time) {
            return Err(GeometryError::OutOfDomain { time, max: MAX_TIME });
        }

        let tetrahedra = self.tetrahedron_count(time);
        let vertex_count = tetrahedra.saturating_mul(FACES.len() * 3);
        if vertex_count > u32::MAX as usize {
            return Err(GeometryError::TooManyVertices(vertex_count));
        }

        let (depth, partial) = self.levels(time);
        let mut mesh = MeshData::with_capacity(tetrahedra * FACES.len());
        Self::subdivide(&regular_tetrahedron(self.radius), depth, partial, &mut mesh);

        Ok(mesh)
    }

    fn name(&self) -> &str {
        "Sierpinski"
    }
}

