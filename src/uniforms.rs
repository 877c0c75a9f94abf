use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};
use crate::types::UniformBlock;

pub const DEFAULT_FRACTAL_INDEX: f32 = 10.0;
pub const DEFAULT_COLOR: f32 = 1.01;
/// Shader time runs this many times faster than wall clock time
pub const DEFAULT_TIME_SCALE: f32 = 20.0;

/// Shader parameters edited live from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderParams {
    #[serde(skip)]
    pub resolution: Vec2,
    /// "Arcent Corruption"
    pub fractal_index: f32,
    /// "Entropy Purity"
    pub color: f32,
    #[serde(skip)]
    pub time: f32,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            resolution: Vec2::ZERO,
            fractal_index: DEFAULT_FRACTAL_INDEX,
            color: DEFAULT_COLOR,
            time: 0.0,
        }
    }
}

impl ShaderParams {
    /// Advance shader time by a wall clock delta in seconds
    pub fn advance(&mut self, delta: f32, time_scale: f32) {
        self.time += delta * time_scale;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.resolution = Vec2::new(width as f32, height as f32);
    }

    pub fn to_block(&self, view_proj: Mat4, model: Mat4) -> UniformBlock {
        UniformBlock {
            resolution: self.resolution.to_array(),
            fractal_index: self.fractal_index,
            time: self.time,
            color: self.color,
            ..UniformBlock::new(view_proj, model)
        }
    }
}
