use serde::{Deserialize, Serialize};

/// Upper bound of the animation time domain `[0, MAX_TIME]`
pub const MAX_TIME: f64 = 5.0;
/// Time advanced per tick unless configured otherwise
pub const DEFAULT_SPEED: f64 = 0.01;
/// Largest speed a config may ask for: one domain width per tick
pub const MAX_SPEED: f64 = MAX_TIME;
/// Distance from the seam at which a looping animation turns around
pub const SEAM_REVERSAL_OFFSET: f64 = 0.1;

/// Clamp any time value into the animation domain. Non-finite input maps to 0.
pub fn clamp_time(time: f64) -> f64 {
    if !time.is_finite() {
        return 0.0;
    }
    time.clamp(0.0, MAX_TIME)
}

/// User-tunable playback flags
///
/// These are the only parts of the animation the control panel may edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Time advanced per tick. Must be finite and non-negative; configs cap
    /// it at [`MAX_SPEED`].
    pub speed: f64,
    pub animate: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            animate: true,
            looping: true,
        }
    }
}

/// Result of a single controller step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub time: f64,
    pub changed: bool,
}

/// Animation time state
///
/// `time` and `forward` are owned by [`AnimationState::tick`]; nothing else
/// writes them once the state is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    time: f64,
    forward: bool,
    settings: PlaybackSettings,
}

impl AnimationState {
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            time: 0.0,
            forward: true,
            settings,
        }
    }

    /// Start from an arbitrary point in the domain
    pub fn starting_at(time: f64, forward: bool, settings: PlaybackSettings) -> Self {
        Self {
            time: clamp_time(time),
            forward,
            settings,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PlaybackSettings {
        &mut self.settings
    }

    /// Advance time by one step.
    ///
    /// Hitting a boundary clamps when looping is off. When looping is on the
    /// value wraps, and a wrap that lands next to the opposite seam (rounds to
    /// 0 or to `MAX_TIME`) turns the animation around just inside the seam it
    /// came from instead. Overshoot by any number of domain widths wraps in a
    /// single step.
    pub fn tick(&mut self) -> Tick {
        if !self.settings.animate {
            return Tick {
                time: self.time,
                changed: false,
            };
        }

        let speed = self.settings.speed;
        let looping = self.settings.looping;
        debug_assert!(speed.is_finite() && speed >= 0.0, "speed must be finite, got {speed}");

        let candidate = if self.forward {
            let candidate = self.time + speed;
            if candidate < MAX_TIME {
                candidate
            } else if !looping {
                MAX_TIME
            } else {
                let wrapped = candidate % MAX_TIME;
                if wrapped.round() == 0.0 {
                    self.forward = false;
                    MAX_TIME - SEAM_REVERSAL_OFFSET
                } else {
                    wrapped
                }
            }
        } else {
            let candidate = self.time - speed;
            if candidate > 0.0 {
                candidate
            } else if !looping {
                0.0
            } else {
                // Wrapped values land in (0, MAX_TIME]
                let mut wrapped = candidate.rem_euclid(MAX_TIME);
                if wrapped == 0.0 {
                    wrapped = MAX_TIME;
                }
                if wrapped.round() == MAX_TIME {
                    self.forward = true;
                    SEAM_REVERSAL_OFFSET
                } else {
                    wrapped
                }
            }
        };

        let changed = candidate != self.time;
        self.time = candidate;

        Tick {
            time: candidate,
            changed,
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(PlaybackSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_options() {
        let state = AnimationState::default();
        assert_eq!(state.time(), 0.0);
        assert!(state.is_forward());
        assert_eq!(state.settings().speed, 0.01);
        assert!(state.settings().animate);
        assert!(state.settings().looping);
    }

    #[test]
    fn first_tick_from_zero_moves_forward() {
        let mut state = AnimationState::default();
        let tick = state.tick();
        assert!(tick.changed);
        assert_eq!(tick.time, 0.01);
        assert_eq!(state.time(), 0.01);
    }

    #[test]
    fn clamp_time_handles_nan_and_bounds() {
        assert_eq!(clamp_time(f64::NAN), 0.0);
        assert_eq!(clamp_time(f64::INFINITY), 0.0);
        assert_eq!(clamp_time(-1.0), 0.0);
        assert_eq!(clamp_time(7.5), MAX_TIME);
        assert_eq!(clamp_time(2.5), 2.5);
    }

    #[test]
    fn starting_at_clamps() {
        let state = AnimationState::starting_at(9.0, true, PlaybackSettings::default());
        assert_eq!(state.time(), MAX_TIME);
    }

    #[test]
    fn settings_deserialize_loop_keyword() {
        let settings: PlaybackSettings =
            serde_json::from_str(r#"{ "speed": 0.02, "loop": false }"#).unwrap();
        assert_eq!(settings.speed, 0.02);
        assert!(!settings.looping);
        assert!(settings.animate);
    }
}
