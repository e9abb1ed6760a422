//! Frame-driven settle animation.
//!
//! A settle moves the main view from where it was released to its open or
//! closed position. Time does not advance on its own: the host calls
//! [`SettleAnimation::step`] from its frame callback with the time elapsed
//! since the previous frame.

use std::time::Duration;

use swipe_reveal_core::Point;

use super::easing::{Easing, lerp_eased};

/// Velocities below this magnitude (px/s) count as no velocity.
const MIN_SETTLE_VELOCITY: f32 = 1.0;

/// Base and maximum settle durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTiming {
    /// Shortest settle without release velocity.
    pub base: Duration,
    /// Upper bound on any settle.
    pub max: Duration,
}

impl SettleTiming {
    /// Build from millisecond values.
    pub fn from_millis(base_ms: u64, max_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// Duration of a settle covering `distance` pixels of a travel range of
    /// `extent` pixels, released at `velocity` px/s along the drag axis.
    ///
    /// Without velocity the duration grows from the base towards twice the
    /// base as the distance approaches the full extent. With velocity it is
    /// the time a body moving at a quarter of that speed needs to cover the
    /// distance. A non-finite velocity counts as none. The result never
    /// exceeds `max` and is zero for zero distance.
    pub fn duration_for(&self, distance: i32, extent: i32, velocity: f32) -> Duration {
        let distance = distance.unsigned_abs();
        if distance == 0 {
            return Duration::ZERO;
        }

        let duration = if !velocity.is_finite() || velocity.abs() < MIN_SETTLE_VELOCITY {
            let ratio = if extent > 0 {
                distance as f32 / extent as f32
            } else {
                1.0
            };
            self.base.mul_f32(1.0 + ratio.min(1.0))
        } else {
            Duration::from_secs_f32(4.0 * distance as f32 / velocity.abs())
        };

        duration.min(self.max)
    }
}

/// Result of advancing a settle by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleStep {
    /// Where the main view's origin should be this frame.
    pub position: Point,
    /// The animation reached its target.
    pub finished: bool,
}

/// An in-flight settle from one origin to another.
#[derive(Debug, Clone)]
pub struct SettleAnimation {
    from: Point,
    to: Point,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl SettleAnimation {
    /// Create a settle animation with the default quintic ease-out curve.
    pub fn new(from: Point, to: Point, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::EaseOutQuint,
        }
    }

    /// Set the easing curve using builder pattern.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The origin the animation ends at.
    #[inline]
    pub fn target(&self) -> Point {
        self.to
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns true once the animation has reached its target.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Position at the current elapsed time.
    pub fn current(&self) -> Point {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Point::new(
            lerp_eased(self.easing, self.from.x as f32, self.to.x as f32, t).round() as i32,
            lerp_eased(self.easing, self.from.y as f32, self.to.y as f32, t).round() as i32,
        )
    }

    /// Advance by `dt` and return the new position.
    pub fn step(&mut self, dt: Duration) -> SettleStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        SettleStep {
            position: self.current(),
            finished: self.is_finished(),
        }
    }
}
