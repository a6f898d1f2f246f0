use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Frames slower than this are logged.
const SPIKE_THRESHOLD: Duration = Duration::from_millis(250);

/// Measures the wall-clock time between display callbacks.
pub struct FrameClock {
    last_instant: Option<Instant>,
    pub frame_count: u64,
    pub delta: Duration,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: None,
            frame_count: 0,
            delta: Duration::ZERO,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Start a frame at `now` and return the time since the previous one.
    /// The first frame has a zero delta.
    pub fn begin_frame(&mut self, now: Instant) -> Duration {
        self.delta = match self.last_instant {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_instant = Some(now);
        self.frame_count += 1;

        if self.delta > SPIKE_THRESHOLD {
            log::warn!("Frame took {:.1}ms", self.delta.as_secs_f64() * 1000.0);
        }

        if self.frame_count > 1 {
            self.fps_samples[self.fps_sample_index] = self.delta.as_secs_f64();
            self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
            let avg_dt = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
            self.smoothed_frame_time_ms = avg_dt * 1000.0;
            self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
        }

        self.delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.begin_frame(Instant::now()), Duration::ZERO);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn delta_is_time_since_previous_frame() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.begin_frame(t0);
        let delta = clock.begin_frame(t0 + Duration::from_millis(20));
        assert_eq!(delta, Duration::from_millis(20));
        assert_eq!(clock.delta, delta);
    }

    #[test]
    fn smoothed_fps_converges_on_steady_rate() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        for i in 0..=FPS_SAMPLE_COUNT as u64 {
            clock.begin_frame(t0 + Duration::from_millis(i * 10));
        }
        assert!((clock.smoothed_fps - 100.0).abs() < 0.5);
        assert!((clock.smoothed_frame_time_ms - 10.0).abs() < 0.05);
    }

    #[test]
    fn clock_going_backwards_yields_zero_delta() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.begin_frame(t0);
        assert_eq!(clock.begin_frame(t0 - Duration::from_millis(5)), Duration::ZERO);
    }
}
