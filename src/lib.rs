pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod driver;
pub mod frame;
pub mod panel;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod traits;
pub mod types;
pub mod uniforms;

pub use animation::{AnimationState, PlaybackSettings, Tick, MAX_TIME};
pub use driver::{FrameDriver, FrameUpdate};
pub use scene::{SceneGraph, SceneMutator};
pub use scenes::SierpinskiGenerator;
