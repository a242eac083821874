//! Post-drag momentum.
//!
//! While dragging, the engine keeps a short rolling window of pointer
//! samples. On release the average velocity over that window decides whether
//! the map keeps gliding, and for how long, under constant deceleration.

use crate::core::config::InputOptions;
use crate::core::constants::{
    INERTIA_DECELERATION, INERTIA_MAX_SPEED, INERTIA_MIN_SPEED, INERTIA_WINDOW_MS,
};
use crate::core::geo::Point;
use crate::prelude::{Duration, Instant, VecDeque};
use crate::traits::PointMath;

/// Tuning of the momentum model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaConfig {
    /// px/s²
    pub deceleration: f64,
    /// px/s
    pub max_speed: f64,
    /// px/s
    pub min_speed: f64,
    /// Samples older than this are ignored
    pub window: Duration,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            deceleration: INERTIA_DECELERATION,
            max_speed: INERTIA_MAX_SPEED,
            min_speed: INERTIA_MIN_SPEED,
            window: Duration::from_millis(INERTIA_WINDOW_MS),
        }
    }
}

impl From<&InputOptions> for InertiaConfig {
    fn from(options: &InputOptions) -> Self {
        Self {
            deceleration: options.inertia_deceleration,
            max_speed: options.inertia_max_speed,
            min_speed: options.inertia_min_speed,
            window: Duration::from_millis(options.inertia_window_ms),
        }
    }
}

/// A computed fling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    /// Release velocity after the speed cap, px/s
    pub velocity: Point,
    /// Magnitude of `velocity`
    pub speed: f64,
    /// Time until the glide stops
    pub duration: Duration,
    /// Pointer-space distance travelled while gliding
    pub offset: Point,
}

impl Inertia {
    /// Glide resulting from `velocity`, or `None` when it is too slow to fling
    pub fn from_velocity(velocity: Point, config: &InertiaConfig) -> Option<Inertia> {
        let raw_speed = velocity.length();
        if !raw_speed.is_finite() || raw_speed < config.min_speed || raw_speed == 0.0 {
            return None;
        }

        let velocity = velocity.clamp_length(config.max_speed);
        let speed = raw_speed.min(config.max_speed);
        let seconds = speed / config.deceleration;
        // Constant deceleration: distance is the mean speed times the time
        let offset = velocity.multiply(seconds / 2.0);

        Some(Inertia {
            velocity,
            speed,
            duration: Duration::from_secs_f64(seconds),
            offset,
        })
    }
}

/// Rolling window of `(position, time)` drag samples, oldest first
#[derive(Debug, Clone)]
pub struct DragSamples {
    samples: VecDeque<(Point, Instant)>,
    window: Duration,
}

impl DragSamples {
    pub fn new(window: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
        }
    }

    /// Appends a sample and drops the ones that fell out of the window
    pub fn push(&mut self, position: Point, time: Instant) {
        self.samples.push_back((position, time));
        self.evict(time);
    }

    /// Drops samples older than `window` before `now`
    pub fn evict(&mut self, now: Instant) {
        while let Some(&(_, time)) = self.samples.front() {
            if now.saturating_duration_since(time) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent position
    pub fn last(&self) -> Option<Point> {
        self.samples.back().map(|(position, _)| *position)
    }

    /// Average velocity from the first to the last sample, px/s
    pub fn velocity(&self) -> Option<Point> {
        let (first, first_time) = self.samples.front()?;
        let (last, last_time) = self.samples.back()?;
        let elapsed = last_time.saturating_duration_since(*first_time).as_secs_f64();
        if self.samples.len() < 2 || elapsed <= 0.0 {
            return None;
        }
        Some(last.subtract(first).divide(elapsed))
    }

    /// Fling for a release at `now`; samples that aged out while the
    /// pointer was held still do not count
    pub fn release(&mut self, now: Instant, config: &InertiaConfig) -> Option<Inertia> {
        self.evict(now);
        let velocity = self.velocity()?;
        Inertia::from_velocity(velocity, config)
    }
}

impl Default for DragSamples {
    fn default() -> Self {
        Self::new(Duration::from_millis(INERTIA_WINDOW_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_velocity_and_stopping_distance() {
        let start = Instant::now();
        let mut samples = DragSamples::new(Duration::from_millis(300));
        samples.push(Point::new(0.0, 0.0), start);
        samples.push(Point::new(100.0, 0.0), at(start, 200));

        let velocity = samples.velocity().unwrap();
        assert!((velocity.x - 500.0).abs() < 1e-9);
        assert_eq!(velocity.y, 0.0);

        let inertia = samples.release(at(start, 200), &InertiaConfig::default()).unwrap();
        assert!((inertia.duration.as_secs_f64() - 500.0 / 3000.0).abs() < 1e-6);
        assert!((inertia.offset.x - 41.666_666).abs() < 1e-3);
        assert_eq!(inertia.offset.y, 0.0);
    }

    #[test]
    fn test_old_samples_are_evicted() {
        let start = Instant::now();
        let mut samples = DragSamples::default();
        samples.push(Point::new(0.0, 0.0), start);
        samples.push(Point::new(10.0, 0.0), at(start, 100));
        samples.push(Point::new(20.0, 0.0), at(start, 200));
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.last(), Some(Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_slow_release_does_not_fling() {
        let start = Instant::now();
        let mut samples = DragSamples::default();
        samples.push(Point::new(0.0, 0.0), start);
        samples.push(Point::new(5.0, 0.0), at(start, 100));
        assert!(samples.release(at(start, 100), &InertiaConfig::default()).is_none());
    }

    #[test]
    fn test_holding_still_before_release_cancels_fling() {
        let start = Instant::now();
        let mut samples = DragSamples::default();
        samples.push(Point::new(0.0, 0.0), start);
        samples.push(Point::new(100.0, 0.0), at(start, 50));
        assert!(samples.release(at(start, 400), &InertiaConfig::default()).is_none());
    }

    #[test]
    fn test_speed_is_capped() {
        let inertia =
            Inertia::from_velocity(Point::new(0.0, -6000.0), &InertiaConfig::default()).unwrap();
        assert_eq!(inertia.speed, 1500.0);
        assert!((inertia.velocity.y + 1500.0).abs() < 1e-9);
        assert!((inertia.duration.as_secs_f64() - 0.5).abs() < 1e-9);
        assert!((inertia.offset.y + 375.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_has_no_velocity() {
        let mut samples = DragSamples::default();
        samples.push(Point::new(1.0, 1.0), Instant::now());
        assert!(samples.velocity().is_none());
    }
}
