use std::fs;
use std::path::Path;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use crate::animation::{clamp_time, AnimationState, PlaybackSettings, MAX_SPEED};
use crate::cli::Cli;
use crate::uniforms::{ShaderParams, DEFAULT_TIME_SCALE};

/// Per-frame scene rotation in radians
pub const DEFAULT_ROTATION_INCREMENT: f32 = 0.03;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "The First Arcent".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Initial animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub time: f64,
    pub forward: bool,
    #[serde(flatten)]
    pub playback: PlaybackSettings,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time: 0.0,
            forward: true,
            playback: PlaybackSettings::default(),
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcentConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub shader: ShaderParams,
    pub rotation_increment: f32,
    pub shader_time_scale: f32,
    pub show_ui: bool,
}

impl Default for ArcentConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            animation: AnimationConfig::default(),
            shader: ShaderParams::default(),
            rotation_increment: DEFAULT_ROTATION_INCREMENT,
            shader_time_scale: DEFAULT_TIME_SCALE,
            show_ui: true,
        }
    }
}

impl ArcentConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Config file (if any) with command line overrides applied, validated
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(speed) = cli.speed {
            self.animation.playback.speed = speed;
        }
        if let Some(time) = cli.start_time {
            self.animation.time = time;
        }
        if cli.no_loop {
            self.animation.playback.looping = false;
        }
        if cli.paused {
            self.animation.playback.animate = false;
        }
        if cli.no_ui {
            self.show_ui = false;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let speed = self.animation.playback.speed;
        if !(speed.is_finite() && speed > 0.0) {
            bail!("animation speed must be a positive number, got {speed}");
        }
        if speed > MAX_SPEED {
            bail!("animation speed must be at most {MAX_SPEED}, got {speed}");
        }
        if !self.animation.time.is_finite() {
            bail!("animation start time must be finite, got {}", self.animation.time);
        }
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window size must be non-zero, got {}x{}", self.window.width, self.window.height);
        }
        if !(0.0..=100.0).contains(&self.shader.fractal_index) {
            bail!("shader fractal_index must be within [0, 100], got {}", self.shader.fractal_index);
        }
        if !(0.0..=10.0).contains(&self.shader.color) {
            bail!("shader color must be within [0, 10], got {}", self.shader.color);
        }
        Ok(())
    }

    pub fn animation_state(&self) -> AnimationState {
        AnimationState::starting_at(
            clamp_time(self.animation.time),
            self.animation.forward,
            self.animation.playback,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ArcentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rotation_increment, 0.03);
        assert_eq!(config.shader_time_scale, 20.0);
        assert_eq!(config.animation_state(), AnimationState::default());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ArcentConfig = serde_json::from_str(
            r#"{ "animation": { "time": 2.5, "loop": false }, "shader": { "color": 3.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.animation.time, 2.5);
        assert!(!config.animation.playback.looping);
        assert_eq!(config.animation.playback.speed, 0.01);
        assert_eq!(config.shader.color, 3.0);
        assert_eq!(config.shader.fractal_index, 10.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "animation": {{ "speed": 0.05 }} }}"#).unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            speed: Some(0.2),
            paused: true,
            no_ui: true,
            ..Cli::default()
        };
        let config = ArcentConfig::load(&cli).unwrap();

        assert_eq!(config.animation.playback.speed, 0.2);
        assert!(!config.animation.playback.animate);
        assert!(!config.show_ui);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let cli = Cli {
            speed: Some(0.0),
            ..Cli::default()
        };
        assert!(ArcentConfig::load(&cli).is_err());
    }

    #[test]
    fn rejects_huge_speed() {
        for speed in [MAX_SPEED + 0.001, 1e12, 1e17] {
            let cli = Cli {
                speed: Some(speed),
                ..Cli::default()
            };
            assert!(ArcentConfig::load(&cli).is_err(), "speed {speed} accepted");
        }

        let cli = Cli {
            speed: Some(MAX_SPEED),
            ..Cli::default()
        };
        assert!(ArcentConfig::load(&cli).is_ok());
    }

    #[test]
    fn rejects_out_of_range_slider_values() {
        let mut config = ArcentConfig::default();
        config.shader.fractal_index = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = Cli {
            config: Some("/nonexistent/arcent.json".into()),
            ..Cli::default()
        };
        let err = ArcentConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn start_time_is_clamped_into_domain() {
        let cli = Cli {
            start_time: Some(12.0),
            ..Cli::default()
        };
        let config = ArcentConfig::load(&cli).unwrap();
        assert_eq!(config.animation_state().time(), 5.0);
    }
}
