//! The swipe-reveal widget and its building blocks.
//!
//! - [`SwipeRevealLayout`]: the container the host embeds in each row
//! - [`RevealGeometry`]: open/closed rectangles and the arithmetic on them
//! - [`PointerEvent`]/[`TouchResponse`]: input and the touch decision
//! - [`DragState`]/[`SlideEvent`]: what the widget reports
//! - [`animation`]: the settle animation driven by the host's frames
//!
//! Gesture classification and drag handling are internal; the widget wires
//! them together for every event passed to
//! [`SwipeRevealLayout::handle_pointer`].

pub mod animation;
mod drag;
mod events;
mod geometry;
mod gesture;
mod layout;
mod state;
mod swipe_reveal_layout;

pub use drag::SnapTarget;
pub use events::{PointerEvent, TouchResponse, Velocity};
pub use geometry::{DragEdge, RevealGeometry, RevealMode};
pub use layout::{ChildSpec, MeasureSpec};
pub use state::{DragState, SlideEvent};
pub use swipe_reveal_layout::{SharedLayout, SwipeRevealLayout};
