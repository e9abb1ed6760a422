//! Easing curves for settle animations.
//!
//! A curve maps linear progress (0.0 to 1.0) to eased progress. Settling
//! rows decelerate into place, so only ease-out style curves are offered
//! besides the linear identity.

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Quadratic ease-out.
    EaseOut,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Quintic ease-out: a fast start and a long, soft landing.
    ///
    /// This is the curve used when a row settles after a release.
    #[default]
    EaseOutQuint,
}

/// Apply an easing curve to a progress value.
///
/// Input outside `0.0..=1.0` is clamped.
///
/// # Example
///
/// ```
/// use swipe_reveal::widget::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseOutQuint, 0.5) > ease(Easing::EaseOut, 0.5));
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseOut => ease_out_pow(t, 2),
        Easing::EaseOutCubic => ease_out_pow(t, 3),
        Easing::EaseOutQuint => ease_out_pow(t, 5),
    }
}

/// Interpolate between two values along an easing curve.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

#[inline]
fn ease_out_pow(t: f32, power: i32) -> f32 {
    1.0 - (1.0 - t).powi(power)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseOutCubic,
            Easing::EaseOutQuint,
        ] {
            assert_eq!(ease(easing, 0.0), 0.0);
            assert_eq!(ease(easing, 1.0), 1.0);
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ease(Easing::EaseOutQuint, -0.5), 0.0);
        assert_eq!(ease(Easing::EaseOutQuint, 1.5), 1.0);
    }

    #[test]
    fn test_higher_power_is_ahead() {
        let quad = ease(Easing::EaseOut, 0.3);
        let cubic = ease(Easing::EaseOutCubic, 0.3);
        let quint = ease(Easing::EaseOutQuint, 0.3);
        assert!(quad < cubic);
        assert!(cubic < quint);
    }

    #[test]
    fn test_lerp_eased() {
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.5), 150.0);
        assert_eq!(lerp_eased(Easing::EaseOutQuint, 100.0, 0.0, 1.0), 0.0);
    }
}
