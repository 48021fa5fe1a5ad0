//! Smoothed pointer speed.
//!
//! The tracker keeps an exponentially weighted moving average of the pointer
//! speed in logical pixels per second. Only the previous sample and the
//! current estimate are kept.

use std::time::Duration;

use super::geometry::Point;

/// Weight given to the newest instantaneous speed.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Exponentially weighted pointer speed estimate.
#[derive(Debug, Clone)]
pub struct SpeedTracker {
    smoothing: f64,
    speed: f64,
    previous: Option<(Point, Duration)>,
}

impl Default for SpeedTracker {
    fn default() -> Self { Self::new(DEFAULT_SMOOTHING) }
}

impl SpeedTracker {
    /// Creates a tracker with the given smoothing weight.
    ///
    /// Weights outside `(0, 1]` fall back to [`DEFAULT_SMOOTHING`].
    #[must_use]
    pub fn new(smoothing: f64) -> Self {
        let smoothing = if smoothing > 0.0 && smoothing <= 1.0 {
            smoothing
        } else {
            DEFAULT_SMOOTHING
        };

        Self { smoothing, speed: 0.0, previous: None }
    }

    /// Current estimate in logical pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f64 { self.speed }

    /// The smoothing weight in use.
    #[must_use]
    pub const fn smoothing(&self) -> f64 { self.smoothing }

    /// Forgets the previous sample so the next one only primes the tracker.
    ///
    /// The estimate itself carries over.
    pub fn reset_sample(&mut self) { self.previous = None; }

    /// Feeds one sample and returns the updated estimate.
    ///
    /// `scale_factor` converts pointer travel to logical pixels; values that
    /// are not positive and finite count as `1.0`. A sample whose timestamp
    /// does not advance past the previous one leaves the estimate untouched.
    pub fn record(&mut self, position: Point, timestamp: Duration, scale_factor: f64) -> f64 {
        let previous = self.previous.replace((position, timestamp));

        let Some((last_position, last_timestamp)) = previous else {
            return self.speed;
        };

        let Some(elapsed) = timestamp.checked_sub(last_timestamp) else {
            return self.speed;
        };

        let seconds = elapsed.as_secs_f64();
        if seconds <= 0.0 {
            return self.speed;
        }

        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };

        let instantaneous = last_position.distance_to(&position) / scale / seconds;
        if !instantaneous.is_finite() {
            return self.speed;
        }

        self.speed = self.smoothing.mul_add(instantaneous, (1.0 - self.smoothing) * self.speed);
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn test_first_sample_contributes_nothing() {
        let mut tracker = SpeedTracker::default();
        let speed = tracker.record(Point::new(10.0, 10.0), Duration::from_millis(5), 1.0);
        assert!(approx(speed, 0.0));
    }

    #[test]
    fn test_single_step_ewma() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::from_millis(0), 1.0);
        let speed = tracker.record(Point::new(100.0, 0.0), Duration::from_millis(100), 1.0);
        assert!(approx(speed, 100.0), "got {speed}");
    }

    #[test]
    fn test_converges_to_steady_speed() {
        let mut tracker = SpeedTracker::default();
        let mut t = Duration::ZERO;
        let mut x = 0.0;
        tracker.record(Point::new(x, 0.0), t, 1.0);

        for _ in 0..200 {
            t += Duration::from_millis(10);
            x += 10.0;
            tracker.record(Point::new(x, 0.0), t, 1.0);
        }

        assert!((tracker.speed() - 1000.0).abs() < 1.0, "got {}", tracker.speed());
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::from_millis(10), 1.0);
        let speed = tracker.record(Point::new(100.0, 0.0), Duration::from_millis(10), 1.0);
        assert!(approx(speed, 0.0));
        assert!(tracker.speed().is_finite());
    }

    #[test]
    fn test_backwards_timestamp_is_noop() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::from_millis(50), 1.0);
        let speed = tracker.record(Point::new(100.0, 0.0), Duration::from_millis(10), 1.0);
        assert!(approx(speed, 0.0));
    }

    #[test]
    fn test_rejected_sample_still_becomes_previous() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::from_millis(10), 1.0);
        tracker.record(Point::new(50.0, 0.0), Duration::from_millis(10), 1.0);
        let speed = tracker.record(Point::new(150.0, 0.0), Duration::from_millis(110), 1.0);
        assert!(approx(speed, 100.0), "got {speed}");
    }

    #[test]
    fn test_scale_factor_normalizes_distance() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::ZERO, 2.0);
        let speed = tracker.record(Point::new(200.0, 0.0), Duration::from_millis(100), 2.0);
        assert!(approx(speed, 100.0), "got {speed}");
    }

    #[test]
    fn test_invalid_scale_factor_counts_as_one() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::ZERO, 0.0);
        let speed = tracker.record(Point::new(100.0, 0.0), Duration::from_millis(100), f64::NAN);
        assert!(approx(speed, 100.0), "got {speed}");
    }

    #[test]
    fn test_reset_sample_keeps_estimate() {
        let mut tracker = SpeedTracker::default();
        tracker.record(Point::new(0.0, 0.0), Duration::ZERO, 1.0);
        tracker.record(Point::new(100.0, 0.0), Duration::from_millis(100), 1.0);
        tracker.reset_sample();

        let speed = tracker.record(Point::new(5000.0, 0.0), Duration::from_millis(101), 1.0);
        assert!(approx(speed, 100.0));
    }

    #[test]
    fn test_out_of_range_smoothing_falls_back() {
        assert!(approx(SpeedTracker::new(0.0).smoothing(), DEFAULT_SMOOTHING));
        assert!(approx(SpeedTracker::new(1.5).smoothing(), DEFAULT_SMOOTHING));
        assert!(approx(SpeedTracker::new(f64::NAN).smoothing(), DEFAULT_SMOOTHING));
        assert!(approx(SpeedTracker::new(0.25).smoothing(), 0.25));
    }
}
