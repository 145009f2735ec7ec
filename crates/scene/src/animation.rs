use crate::config::AnimationConfig;

/// Frame-coupled animation time.
///
/// Advances by a fixed step once per frame regardless of how much real time
/// passed, so a slow display plays the idle loop slower rather than skipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    // f64 keeps the fixed step resolvable for days of continuous running.
    time: f64,
    step: f32,
    frames: u64,
}

impl AnimationClock {
    pub fn new(step: f32) -> Self {
        Self {
            time: 0.0,
            step,
            frames: 0,
        }
    }

    /// Advance one frame and return the new time.
    pub fn advance(&mut self) -> f64 {
        self.time += f64::from(self.step);
        self.frames += 1;
        self.time
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames advanced since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(AnimationConfig::default().time_step)
    }
}

/// Group rotation and lift for one instant of the idle loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdlePose {
    /// Rotation about the vertical axis, radians.
    pub rotation: f32,
    /// Vertical offset, grid units. Never negative.
    pub offset: f32,
}

impl IdlePose {
    pub const REST: Self = Self {
        rotation: 0.0,
        offset: 0.0,
    };

    pub fn at(time: f64, config: &AnimationConfig) -> Self {
        let sway = (time * f64::from(config.sway_rate)).sin();
        let bounce = time.sin().abs();
        Self {
            rotation: (sway * f64::from(config.sway_amplitude)) as f32,
            offset: (bounce * f64::from(config.bounce_amplitude)) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = AnimationClock::new(0.01);
        assert_eq!(clock.time(), 0.0);
        for _ in 0..100 {
            clock.advance();
        }
        assert_eq!(clock.frames(), 100);
        assert!((clock.time() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut clock = AnimationClock::default();
        let mut last = clock.time();
        for _ in 0..1000 {
            let t = clock.advance();
            assert!(t > last);
            last = t;
        }
    }

    #[test]
    fn clock_keeps_stepping_after_days_of_frames() {
        // Past 2^18 an f32 accumulator can no longer absorb a 0.01 step.
        let mut clock = AnimationClock {
            time: 262_144.0,
            step: 0.01,
            frames: 26_214_400,
        };
        let mut last = clock.time();
        for _ in 0..10_000 {
            let t = clock.advance();
            assert!(t > last);
            assert!((t - last - 0.01).abs() < 1e-6, "step drifted to {}", t - last);
            last = t;
        }
        assert!((clock.time() - 262_244.0).abs() < 1e-3);
    }

    #[test]
    fn pose_at_zero_is_rest() {
        let pose = IdlePose::at(0.0, &AnimationConfig::default());
        assert_eq!(pose, IdlePose::REST);
    }

    #[test]
    fn pose_matches_closed_form() {
        let config = AnimationConfig::default();
        let t = PI / 3.0;
        let pose = IdlePose::at(t, &config);
        assert!((f64::from(pose.rotation) - (t * 0.5).sin() * 0.3).abs() < 1e-6);
        assert!((f64::from(pose.offset) - t.sin().abs() * 0.3).abs() < 1e-6);
        // sin(pi/6) = 0.5
        assert!((pose.rotation - 0.15).abs() < 1e-6);
    }

    #[test]
    fn pose_stays_bounded() {
        let config = AnimationConfig::default();
        for i in 0..20_000 {
            let pose = IdlePose::at(f64::from(i) * 0.013, &config);
            assert!((-0.3..=0.3).contains(&pose.rotation), "{pose:?}");
            assert!((0.0..=0.3).contains(&pose.offset), "{pose:?}");
        }
    }

    #[test]
    fn bounce_peaks_at_half_pi() {
        let pose = IdlePose::at(PI / 2.0, &AnimationConfig::default());
        assert!((pose.offset - 0.3).abs() < 1e-6);
    }
}
