//! Frame timing driven by an external clock
//!
//! The window layer owns the clock; these types only turn its timestamps into
//! safe per-frame deltas.

/// Whether a frame delta can be used to scale motion
pub fn is_usable_delta(delta_time: f32) -> bool {
    delta_time.is_finite() && delta_time > 0.0
}

/// Converts successive timestamps (seconds) into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame: Option<f64>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a timer that has not seen a frame yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` seconds and return its delta.
    ///
    /// The first frame, a clock that ran backwards and a non-finite timestamp
    /// all produce a delta of zero.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last_frame {
            Some(last) if now.is_finite() && now > last => (now - last) as f32,
            _ => 0.0,
        };

        if now.is_finite() {
            self.last_frame = Some(now);
        }
        self.delta_time = delta;
        self.total_time += delta;
        self.frame_count += 1;
        delta
    }

    /// Time since the previous frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all deltas seen so far
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks recorded
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Produces one frames-per-second sample per elapsed second
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    accumulated: f32,
    frames: u32,
}

impl FpsCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame delta; returns a sample each time a full second elapses.
    pub fn record(&mut self, delta_time: f32) -> Option<u32> {
        if !is_usable_delta(delta_time) {
            return None;
        }

        self.accumulated += delta_time;
        self.frames += 1;

        if self.accumulated < 1.0 {
            return None;
        }

        let fps = (self.frames as f32 / self.accumulated).round() as u32;
        self.accumulated -= 1.0;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick(12.5), 0.0);
        assert_relative_eq!(timer.tick(12.75), 0.25);
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.total_time(), 0.25);
    }

    #[test]
    fn test_clock_rewind_and_nan_are_clamped() {
        let mut timer = FrameTimer::new();
        timer.tick(5.0);
        assert_eq!(timer.tick(4.0), 0.0);
        assert_eq!(timer.tick(f64::NAN), 0.0);
        assert_relative_eq!(timer.tick(4.5), 0.5);
        assert!(timer.delta_time().is_finite());
    }

    #[test]
    fn test_usable_delta() {
        assert!(is_usable_delta(0.016));
        assert!(!is_usable_delta(0.0));
        assert!(!is_usable_delta(-0.1));
        assert!(!is_usable_delta(f32::NAN));
        assert!(!is_usable_delta(f32::INFINITY));
    }

    #[test]
    fn test_fps_sample_once_per_second() {
        let mut counter = FpsCounter::new();
        let mut samples = Vec::new();
        for _ in 0..20 {
            if let Some(fps) = counter.record(0.125) {
                samples.push(fps);
            }
        }
        assert_eq!(samples, vec![8, 8]);
        assert_eq!(counter.record(0.0), None);
    }
}
