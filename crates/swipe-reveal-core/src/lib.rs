//! Core systems for swipe-reveal.
//!
//! This crate provides the plumbing the swipe-reveal widget is built on:
//!
//! - **Signal/Slot System**: Type-safe notification of state and slide changes
//! - **Geometry**: Integer pixel points, sizes, rectangles and insets
//! - **Saved State**: An opaque key-value container for persisting state
//!   across process or view recreation
//! - **Logging**: `tracing` targets and debug options
//!
//! # Signals
//!
//! ```
//! use swipe_reveal_core::{Point, Signal};
//!
//! let moved = Signal::<Point>::new();
//! let id = moved.connect(|origin| println!("main view now at {origin:?}"));
//! moved.emit(Point::new(-48, 0));
//! assert!(moved.disconnect(id));
//! ```
//!
//! # Saved state
//!
//! ```
//! use swipe_reveal_core::SavedState;
//!
//! let mut state = SavedState::new();
//! state.put("rows.visible", &vec![1, 2, 3]).unwrap();
//!
//! let restored = SavedState::from_json(&state.to_json().unwrap()).unwrap();
//! let rows: Vec<i32> = restored.get("rows.visible").unwrap().unwrap();
//! assert_eq!(rows, vec![1, 2, 3]);
//! ```

mod error;
pub mod geometry;
pub mod logging;
mod saved_state;
pub mod signal;

pub use error::{StateError, StateResult};
pub use geometry::{Insets, Point, Rect, Size};
pub use logging::DebugOptions;
pub use saved_state::SavedState;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
