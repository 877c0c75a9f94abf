use crate::animation::{AnimationState, PlaybackSettings};
use crate::config::ArcentConfig;
use crate::frame::FrameInfo;
use crate::scene::{SceneGraph, SceneMutator};
use crate::traits::GeometryProvider;
use crate::uniforms::ShaderParams;

/// What a single frame step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub time: f64,
    pub forward: bool,
    pub regenerated: bool,
}

/// Per-frame update sequence: tick, regenerate on change, spin, shade.
///
/// Owns the animation state outright; the panel only reaches the playback
/// settings through [`FrameDriver::panel_state`].
pub struct FrameDriver<P: GeometryProvider> {
    animation: AnimationState,
    mutator: SceneMutator<P>,
    scene: SceneGraph,
    shader: ShaderParams,
    rotation_increment: f32,
    shader_time_scale: f32,
}

impl<P: GeometryProvider> FrameDriver<P> {
    pub fn new(provider: P, config: &ArcentConfig) -> Self {
        Self {
            animation: config.animation_state(),
            mutator: SceneMutator::new(provider),
            scene: SceneGraph::new(),
            shader: config.shader,
            rotation_increment: config.rotation_increment,
            shader_time_scale: config.shader_time_scale,
        }
    }

    /// Install geometry for the starting time so a paused start is not empty
    pub fn prime(&mut self) -> anyhow::Result<()> {
        self.mutator.set_time(self.animation.time(), &mut self.scene)?;
        Ok(())
    }

    /// Advance one frame. Geometry is rebuilt only when the time moved.
    pub fn update(&mut self, delta: f32) -> anyhow::Result<FrameUpdate> {
        let tick = self.animation.tick();

        let regenerated = if tick.changed {
            self.mutator.set_time(tick.time, &mut self.scene)?;
            true
        } else {
            false
        };

        self.scene.spin(self.rotation_increment);
        self.shader.advance(delta, self.shader_time_scale);

        Ok(FrameUpdate {
            time: self.animation.time(),
            forward: self.animation.is_forward(),
            regenerated,
        })
    }

    /// Explicit frame loop: one update per frame until `stop` says so or the
    /// frames run out. Returns the number of frames processed.
    pub fn run<I, F>(&mut self, frames: I, mut stop: F) -> anyhow::Result<u64>
    where
        I: IntoIterator<Item = FrameInfo>,
        F: FnMut(&FrameInfo, &FrameUpdate) -> bool,
    {
        let mut processed = 0;
        for frame in frames {
            let update = self.update(frame.delta)?;
            processed += 1;

            if stop(&frame, &update) {
                break;
            }
        }
        Ok(processed)
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn shader(&self) -> &ShaderParams {
        &self.shader
    }

    pub fn mutator(&self) -> &SceneMutator<P> {
        &self.mutator
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.shader.resize(width, height);
    }

    /// Everything the parameter panel may touch
    pub fn panel_state(&mut self) -> PanelState<'_> {
        PanelState {
            time: self.animation.time(),
            forward: self.animation.is_forward(),
            playback: self.animation.settings_mut(),
            shader: &mut self.shader,
        }
    }
}

/// Panel view of the driver: writable playback flags and shader params,
/// read-only copies of the controller-owned time and direction
pub struct PanelState<'a> {
    pub time: f64,
    pub forward: bool,
    pub playback: &'a mut PlaybackSettings,
    pub shader: &'a mut ShaderParams,
}
