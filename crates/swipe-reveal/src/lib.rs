//! A swipe-to-reveal row container.
//!
//! [`SwipeRevealLayout`] holds a main view on top of a secondary view. A drag
//! along one configured edge slides the main view aside to reveal the
//! secondary view (typically action buttons), snapping fully open or fully
//! closed on release. [`RowStateBinder`] remembers which rows are open or
//! locked while list rows are recycled, and can keep at most one row open.
//!
//! The crate is toolkit-agnostic. The host reports child sizes, forwards
//! pointer events, calls [`SwipeRevealLayout::advance_frame`] once per frame
//! while a settle is running, and draws the children where the widget says.
//!
//! # Example
//!
//! ```
//! use swipe_reveal::{
//!     ChildSpec, MeasureSpec, Rect, RowStateBinder, SwipeRevealConfig, SwipeRevealLayout,
//! };
//!
//! let binder = RowStateBinder::new();
//! binder.set_open_only_one(true);
//!
//! let row = SwipeRevealLayout::shared(SwipeRevealConfig::default());
//! {
//!     let mut row = row.lock();
//!     row.measure(
//!         &[ChildSpec::fixed(96, 64), ChildSpec::fill()],
//!         MeasureSpec::Exact(320),
//!         MeasureSpec::Exact(64),
//!     )
//!     .unwrap();
//!     row.layout(Rect::new(0, 0, 320, 64)).unwrap();
//! }
//!
//! binder.bind(&row, "message-17");
//! binder.open_row("message-17");
//! assert!(binder.is_open("message-17"));
//! ```
//!
//! # Logging
//!
//! All diagnostics go through `tracing` under the targets listed in
//! [`logging::targets`]. Per-event output is additionally opt-in through
//! [`DebugOptions`] in the configuration.

pub mod config;
pub mod error;
pub mod model;
pub mod widget;

pub use config::SwipeRevealConfig;
pub use error::{ConfigError, LayoutError, Result, StateError, SwipeError};
pub use model::{RowRecord, RowStateBinder};
pub use widget::{
    ChildSpec, DragEdge, DragState, MeasureSpec, PointerEvent, RevealGeometry, RevealMode,
    SharedLayout, SlideEvent, SnapTarget, SwipeRevealLayout, TouchResponse, Velocity,
};

pub use swipe_reveal_core::{
    ConnectionGuard, ConnectionId, DebugOptions, Insets, Point, Rect, SavedState, Signal, Size,
    logging,
};
