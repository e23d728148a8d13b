//! Frame pacing

use std::time::{Duration, Instant};

use crate::consts::TARGET_FPS;
use crate::settings::{Pacing, Settings};

/// Limits the frame loop to a target rate.
///
/// The simulation never reads the clock; pacing only decides how long the
/// host sleeps between frames.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    pacing: Pacing,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(target_fps: u32, pacing: Pacing) -> Self {
        let fps = if target_fps == 0 {
            log::warn!("target_fps of 0 requested, using {}", TARGET_FPS);
            TARGET_FPS
        } else {
            target_fps
        };
        Self {
            interval: Duration::from_secs(1) / fps,
            pacing,
            last: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.target_fps, settings.pacing)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Time left before the next frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => (last + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Sleep until the next frame is due (no-op when unthrottled)
    pub fn wait(&mut self) {
        if self.pacing == Pacing::Unthrottled {
            return;
        }
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        let clock = FrameClock::new(60, Pacing::RealTime);
        assert_eq!(clock.interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_zero_fps_falls_back() {
        let clock = FrameClock::new(0, Pacing::RealTime);
        assert_eq!(clock.interval(), Duration::from_secs(1) / TARGET_FPS);
    }

    #[test]
    fn test_unthrottled_never_sleeps() {
        let mut clock = FrameClock::new(1, Pacing::Unthrottled);
        let start = Instant::now();
        for _ in 0..100 {
            clock.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
        assert!(clock.last.is_none());
    }

    #[test]
    fn test_real_time_spaces_frames() {
        let mut clock = FrameClock::new(100, Pacing::RealTime);
        clock.wait();
        let start = Instant::now();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_remaining_before_first_frame() {
        let clock = FrameClock::new(60, Pacing::RealTime);
        assert_eq!(clock.remaining(Instant::now()), Duration::ZERO);
    }
}
