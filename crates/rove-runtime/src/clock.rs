//! Frame clock

use std::time::Instant;

/// Longest wall-clock frame delta `tick()` will report, in seconds
const MAX_DELTA: f64 = 0.25;

/// Tracks game time. One `tick()` per rendered frame, or `advance()` with a
/// fixed step when running without a window.
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames advanced so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from wall time. Call once per frame. A stall longer
    /// than 250ms is reported as 250ms.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.advance(0.0);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed.min(MAX_DELTA))
    }

    /// Advance the clock by an explicit delta. Negative deltas count as zero.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.delta_time = dt.max(0.0);
        self.total_time += self.delta_time;
        self.frame += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame, 1);
    }

    #[test]
    fn test_fixed_advance() {
        let mut clock = GameClock::new();
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.total_time - 1.0).abs() < 1e-9);
        assert_eq!(clock.frame, 60);
    }

    #[test]
    fn test_explicit_advance_is_exact() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(1.0), 1.0);
        assert_eq!(clock.advance(3.0), 3.0);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.total_time, 4.0);
    }

    #[test]
    fn test_wall_clock_stall_is_clamped() {
        let mut clock = GameClock::new();
        clock.tick();
        clock.last_instant = Instant::now()
            .checked_sub(Duration::from_secs(3))
            .unwrap();

        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.total_time, 0.25);
    }
}
