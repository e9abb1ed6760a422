//! Logging facilities for swipe-reveal.
//!
//! swipe-reveal uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; applications do that themselves:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("swipe_reveal::drag=debug")
//!         .init();
//! }
//! ```
//!
//! Chatty per-event output (every pointer event, every geometry pass) is
//! additionally gated by [`DebugOptions`], an explicit value carried in the
//! widget configuration rather than a process-wide switch.

use serde::{Deserialize, Serialize};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "swipe_reveal_core::signal";
    /// Saved state container target.
    pub const SAVED_STATE: &str = "swipe_reveal_core::saved_state";
    /// Gesture classification target.
    pub const GESTURE: &str = "swipe_reveal::gesture";
    /// Capture, clamp and release target.
    pub const DRAG: &str = "swipe_reveal::drag";
    /// Drag state transitions target.
    pub const STATE: &str = "swipe_reveal::state";
    /// Measurement and layout target.
    pub const LAYOUT: &str = "swipe_reveal::layout";
    /// Row state binder target.
    pub const BINDER: &str = "swipe_reveal::binder";
}

/// Opt-in verbose diagnostics for a single widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Trace every pointer event and the resulting touch decision.
    pub trace_pointer_events: bool,
    /// Trace the rectangles produced by every layout pass.
    pub trace_geometry: bool,
}

impl DebugOptions {
    /// All diagnostics enabled.
    pub fn verbose() -> Self {
        Self {
            trace_pointer_events: true,
            trace_geometry: true,
        }
    }
}
