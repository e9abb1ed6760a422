//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use swipe_reveal::{
    ChildSpec, DragEdge, MeasureSpec, Rect, SharedLayout, SlideEvent, SwipeRevealConfig,
    SwipeRevealLayout,
};

pub const FRAME: Duration = Duration::from_millis(16);
pub const BOUNDS: Rect = Rect::new(0, 0, 300, 80);

/// Install a subscriber honoring `RUST_LOG` once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Children for a 300x80 row: a 100 px wide secondary view for horizontal
/// edges, a 40 px tall one for vertical edges, and a filling main view.
pub fn children(edge: DragEdge) -> [ChildSpec; 2] {
    let secondary = if edge.is_horizontal() {
        ChildSpec::fixed(100, 80).with_fill_height()
    } else {
        ChildSpec::fixed(300, 40).with_fill_width()
    };
    [secondary, ChildSpec::fill()]
}

pub fn laid_out(config: SwipeRevealConfig) -> SwipeRevealLayout {
    init_tracing();
    let mut row = SwipeRevealLayout::new(config);
    row.measure(
        &children(row.drag_edge()),
        MeasureSpec::Exact(BOUNDS.width()),
        MeasureSpec::Exact(BOUNDS.height()),
    )
    .unwrap();
    row.layout(BOUNDS).unwrap();
    row
}

pub fn shared_row(edge: DragEdge) -> SharedLayout {
    Arc::new(Mutex::new(laid_out(
        SwipeRevealConfig::new().with_drag_edge(edge),
    )))
}

pub fn settle(row: &mut SwipeRevealLayout) {
    let mut frames = 0;
    while row.advance_frame(FRAME) {
        frames += 1;
        assert!(frames < 1_000, "settle never finished");
    }
}

pub fn record_slides(row: &SwipeRevealLayout) -> Arc<Mutex<Vec<SlideEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    row.slide.connect(move |event| sink.lock().push(*event));
    events
}
