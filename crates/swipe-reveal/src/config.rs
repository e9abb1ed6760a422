//! Widget configuration.
//!
//! [`SwipeRevealConfig`] carries everything fixed at construction time: the
//! drag edge, the reveal mode, gesture thresholds expressed in
//! density-independent pixels, settle timing and padding. It can be built in
//! code with the `with_*` methods or loaded from TOML:
//!
//! ```
//! use swipe_reveal::{DragEdge, SwipeRevealConfig};
//!
//! let config = SwipeRevealConfig::from_toml_str(r#"
//!     drag_edge = "right"
//!     mode = "same_level"
//!     min_fling_velocity_dp = 450.0
//!     density = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.drag_edge, DragEdge::Right);
//! assert_eq!(config.dp_to_px(10.0), 20.0);
//! ```

use serde::{Deserialize, Serialize};
use swipe_reveal_core::{DebugOptions, Insets};

use crate::error::ConfigError;
use crate::widget::animation::SettleTiming;
use crate::widget::{DragEdge, RevealMode};

/// Default minimum fling velocity in dp per second.
pub const DEFAULT_MIN_FLING_VELOCITY_DP: f32 = 300.0;

/// Default distance in dp the main view must travel before the ancestor is
/// asked to stop intercepting the touch stream.
pub const DEFAULT_MIN_DIST_REQUEST_DISALLOW_PARENT_DP: f32 = 1.0;

/// Default touch slop in dp.
pub const DEFAULT_TOUCH_SLOP_DP: f32 = 8.0;

/// Default width of the edge-drag trigger zone in dp.
pub const DEFAULT_EDGE_SIZE_DP: f32 = 20.0;

/// Default base settle duration in milliseconds.
pub const DEFAULT_BASE_SETTLE_MS: u64 = 256;

/// Default upper bound for a settle animation in milliseconds.
pub const DEFAULT_MAX_SETTLE_MS: u64 = 600;

/// Configuration for a [`SwipeRevealLayout`](crate::SwipeRevealLayout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeRevealConfig {
    /// Side from which the secondary view is revealed.
    pub drag_edge: DragEdge,
    /// Whether the secondary view stays put or travels with the main view.
    pub mode: RevealMode,
    /// Release velocity (dp/s) that decides open/close regardless of position.
    pub min_fling_velocity_dp: f32,
    /// Distance (dp) from the nearer end of the travel range after which the
    /// ancestor is asked not to intercept.
    pub min_dist_request_disallow_parent_dp: f32,
    /// Cumulative along-axis movement (dp) that turns a touch into a drag.
    pub touch_slop_dp: f32,
    /// Width (dp) of the edge-drag trigger zone along the drag edge.
    pub edge_size_dp: f32,
    /// Physical pixels per density-independent pixel.
    pub density: f32,
    /// Base settle duration in milliseconds.
    pub base_settle_ms: u64,
    /// Upper bound for a settle animation in milliseconds.
    pub max_settle_ms: u64,
    /// Padding around the children, in pixels.
    pub padding: Insets,
    /// Opt-in diagnostics.
    pub debug: DebugOptions,
}

impl Default for SwipeRevealConfig {
    fn default() -> Self {
        Self {
            drag_edge: DragEdge::default(),
            mode: RevealMode::default(),
            min_fling_velocity_dp: DEFAULT_MIN_FLING_VELOCITY_DP,
            min_dist_request_disallow_parent_dp: DEFAULT_MIN_DIST_REQUEST_DISALLOW_PARENT_DP,
            touch_slop_dp: DEFAULT_TOUCH_SLOP_DP,
            edge_size_dp: DEFAULT_EDGE_SIZE_DP,
            density: 1.0,
            base_settle_ms: DEFAULT_BASE_SETTLE_MS,
            max_settle_ms: DEFAULT_MAX_SETTLE_MS,
            padding: Insets::ZERO,
            debug: DebugOptions::default(),
        }
    }
}

impl SwipeRevealConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(ConfigError::Invalid {
                field: "density",
                message: format!("must be positive, got {}", self.density),
            });
        }

        let non_negative = [
            ("min_fling_velocity_dp", self.min_fling_velocity_dp),
            (
                "min_dist_request_disallow_parent_dp",
                self.min_dist_request_disallow_parent_dp,
            ),
            ("touch_slop_dp", self.touch_slop_dp),
            ("edge_size_dp", self.edge_size_dp),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    message: format!("must be zero or positive, got {value}"),
                });
            }
        }

        if self.max_settle_ms < self.base_settle_ms {
            return Err(ConfigError::Invalid {
                field: "max_settle_ms",
                message: format!(
                    "must not be shorter than base_settle_ms ({} < {})",
                    self.max_settle_ms, self.base_settle_ms
                ),
            });
        }

        Ok(())
    }

    /// Replace every out-of-range value with its default.
    ///
    /// A `max_settle_ms` shorter than `base_settle_ms` is raised to it.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.density.is_finite() && self.density > 0.0) {
            self.density = defaults.density;
        }
        let non_negative = [
            (&mut self.min_fling_velocity_dp, defaults.min_fling_velocity_dp),
            (
                &mut self.min_dist_request_disallow_parent_dp,
                defaults.min_dist_request_disallow_parent_dp,
            ),
            (&mut self.touch_slop_dp, defaults.touch_slop_dp),
            (&mut self.edge_size_dp, defaults.edge_size_dp),
        ];
        for (value, default) in non_negative {
            if !(value.is_finite() && *value >= 0.0) {
                *value = default;
            }
        }
        self.max_settle_ms = self.max_settle_ms.max(self.base_settle_ms);
        self
    }

    /// Set the drag edge using builder pattern.
    pub fn with_drag_edge(mut self, edge: DragEdge) -> Self {
        self.drag_edge = edge;
        self
    }

    /// Set the reveal mode using builder pattern.
    pub fn with_mode(mut self, mode: RevealMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the minimum fling velocity (dp/s) using builder pattern.
    pub fn with_min_fling_velocity(mut self, dp_per_second: f32) -> Self {
        self.min_fling_velocity_dp = dp_per_second;
        self
    }

    /// Set the minimum distance before disallowing parent interception (dp).
    pub fn with_min_dist_request_disallow_parent(mut self, dp: f32) -> Self {
        self.min_dist_request_disallow_parent_dp = dp;
        self
    }

    /// Set the touch slop (dp) using builder pattern.
    pub fn with_touch_slop(mut self, dp: f32) -> Self {
        self.touch_slop_dp = dp;
        self
    }

    /// Set the edge-drag zone width (dp) using builder pattern.
    pub fn with_edge_size(mut self, dp: f32) -> Self {
        self.edge_size_dp = dp;
        self
    }

    /// Set the display density using builder pattern.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set the padding using builder pattern.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the debug options using builder pattern.
    pub fn with_debug(mut self, debug: DebugOptions) -> Self {
        self.debug = debug;
        self
    }

    /// Convert density-independent pixels to physical pixels.
    #[inline]
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.density
    }

    /// Convert physical pixels to density-independent pixels.
    #[inline]
    pub fn px_to_dp(&self, px: f32) -> f32 {
        px / self.density
    }

    /// Touch slop in whole pixels.
    pub fn touch_slop_px(&self) -> i32 {
        self.dp_to_px(self.touch_slop_dp).round() as i32
    }

    /// Edge-drag zone width in whole pixels.
    pub fn edge_size_px(&self) -> i32 {
        self.dp_to_px(self.edge_size_dp).round() as i32
    }

    /// Minimum disallow distance in pixels.
    pub fn min_dist_request_disallow_parent_px(&self) -> f32 {
        self.dp_to_px(self.min_dist_request_disallow_parent_dp)
    }

    /// Settle timing derived from the configured durations.
    pub fn settle_timing(&self) -> SettleTiming {
        SettleTiming::from_millis(self.base_settle_ms, self.max_settle_ms)
    }
}
