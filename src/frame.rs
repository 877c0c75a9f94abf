use std::time::Instant;

/// Seconds between FPS readings
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

enum Pacing {
    /// Clock starts on the first frame, so that frame has a zero delta
    RealTime { clock: Option<(Instant, Instant)> },
    Fixed { step: f32 },
}

/// Infinite iterator that yields frame information
///
/// Real-time frames measure the wall clock; fixed-step frames advance by a
/// constant delta and are used for headless runs.
pub struct FrameIterator {
    frame_number: u64,
    elapsed: f32,
    pacing: Pacing,
}

impl FrameIterator {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            elapsed: 0.0,
            pacing: Pacing::RealTime { clock: None },
        }
    }

    pub fn fixed_step(step: f32) -> Self {
        Self {
            frame_number: 0,
            elapsed: 0.0,
            pacing: Pacing::Fixed { step },
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.elapsed
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let delta = match &mut self.pacing {
            Pacing::RealTime { clock } => {
                let now = Instant::now();
                let (start, last) = clock.get_or_insert((now, now));
                let delta = now.duration_since(*last).as_secs_f32();
                *last = now;
                self.elapsed = now.duration_since(*start).as_secs_f32();
                delta
            }
            Pacing::Fixed { step } => {
                self.elapsed += *step;
                *step
            }
        };

        let info = FrameInfo::new(self.frame_number, self.elapsed, delta);
        self.frame_number += 1;

        Some(info)
    }
}

/// Averages frame rate over `FPS_UPDATE_INTERVAL`
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    frames: u32,
    timer: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame; returns the new reading when one is produced
    pub fn update(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.timer += delta;

        if self.timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames as f32 / self.timer;
            self.frames = 0;
            self.timer = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_frames_advance_evenly() {
        let frames: Vec<_> = FrameIterator::fixed_step(0.5).take(3).collect();

        assert_eq!(frames[0], FrameInfo::new(0, 0.5, 0.5));
        assert_eq!(frames[1], FrameInfo::new(1, 1.0, 0.5));
        assert_eq!(frames[2], FrameInfo::new(2, 1.5, 0.5));
    }

    #[test]
    fn real_time_frames_are_numbered() {
        let mut frames = FrameIterator::new();
        let first = frames.next().unwrap();
        let second = frames.next().unwrap();

        assert_eq!(first.number, 0);
        assert_eq!(second.number, 1);
        assert!(second.time >= first.time);
        assert!(second.delta >= 0.0);
    }

    #[test]
    fn real_time_clock_starts_on_first_frame() {
        let mut frames = FrameIterator::new();
        std::thread::sleep(std::time::Duration::from_millis(30));

        let first = frames.next().unwrap();

        assert_eq!(first.delta, 0.0);
        assert_eq!(first.time, 0.0);
    }

    #[test]
    fn fps_counter_reports_once_per_interval() {
        let mut counter = FpsCounter::new();

        for _ in 0..59 {
            assert!(counter.update(1.0 / 60.0).is_none());
        }
        let reading = counter.update(1.0 / 60.0 + 0.001).unwrap();
        assert!((reading - 60.0).abs() < 1.0);
        assert_eq!(counter.fps(), reading);
    }
}
