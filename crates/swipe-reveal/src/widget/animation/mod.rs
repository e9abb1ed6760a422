//! Settle animation support.
//!
//! When a drag is released, or `open(true)`/`close(true)` is called, the main
//! view glides to its target along an easing curve. The host drives the
//! animation one frame at a time.

mod easing;
mod settle;

pub use easing::{Easing, ease, lerp_eased};
pub use settle::{SettleAnimation, SettleStep, SettleTiming};
