//! Row state binding across recycled widgets.

mod common;

use std::sync::Arc;

use common::{FRAME, children, settle, shared_row};
use swipe_reveal::{
    DragEdge, DragState, MeasureSpec, Point, PointerEvent, RowRecord, RowStateBinder, SavedState,
    SharedLayout, SwipeRevealConfig, SwipeRevealLayout, Velocity,
};

fn settle_shared(row: &SharedLayout) {
    settle(&mut row.lock());
}

#[test]
fn binding_applies_remembered_state() {
    let binder = RowStateBinder::new();
    binder.open_row("a");
    binder.lock_rows(["b"]);
    let row = shared_row(DragEdge::Left);

    binder.bind(&row, "a");
    assert!(row.lock().is_open());
    assert!(!row.lock().is_drag_locked());

    binder.bind(&row, "b");
    assert!(row.lock().is_closed());
    assert!(row.lock().is_drag_locked());

    // The first key keeps its record while another key is shown.
    assert!(binder.is_open("a"));

    binder.bind(&row, "a");
    assert!(row.lock().is_open());
    assert!(!row.lock().is_drag_locked());
}

#[test]
fn new_keys_start_closed_and_unlocked() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Right);
    row.lock().open(false);

    binder.bind(&row, "fresh");

    assert!(row.lock().is_closed());
    assert_eq!(binder.record("fresh"), Some(RowRecord::default()));
}

#[test]
fn drag_on_bound_row_updates_its_record() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Left);
    binder.bind(&row, "a");

    {
        let mut row = row.lock();
        row.handle_pointer(PointerEvent::down(150, 40));
        row.handle_pointer(PointerEvent::moved(160, 40));
        row.handle_pointer(PointerEvent::moved(230, 40));
        row.handle_pointer(PointerEvent::up(230, 40, Velocity::ZERO));
    }
    // Released but still settling.
    assert!(!binder.is_open("a"));
    settle_shared(&row);
    assert!(binder.is_open("a"));

    binder.close_row("a");
    assert!(!binder.is_open("a"));
    settle_shared(&row);
    assert!(row.lock().is_closed());
}

#[test]
fn rebinding_aborts_a_running_settle() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Left);
    binder.bind(&row, "a");
    binder.open_row("a");
    row.lock().advance_frame(FRAME);
    assert!(row.lock().is_settling());

    binder.bind(&row, "b");

    let row = row.lock();
    assert!(!row.is_settling());
    assert!(row.is_closed());
}

#[test]
fn rebinding_aborts_a_captured_drag() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Left);
    binder.bind(&row, "a");
    {
        let mut row = row.lock();
        row.handle_pointer(PointerEvent::down(150, 40));
        row.handle_pointer(PointerEvent::moved(160, 40));
        row.handle_pointer(PointerEvent::moved(190, 40));
        assert_eq!(row.state(), DragState::Dragging);
    }

    binder.bind(&row, "b");
    {
        let row = row.lock();
        assert!(row.is_closed());
        assert_eq!(row.main_rect().origin, Point::new(0, 0));
    }

    // The rest of the interrupted stream no longer moves the row.
    {
        let mut row = row.lock();
        row.handle_pointer(PointerEvent::moved(240, 40));
        row.handle_pointer(PointerEvent::up(240, 40, Velocity::ZERO));
        assert!(!row.is_settling());
        assert!(row.is_closed());
        assert_eq!(row.main_rect().origin, Point::new(0, 0));
    }
    assert!(!binder.is_open("a"));
    assert!(!binder.is_open("b"));
}

#[test]
fn single_open_closes_other_bound_rows() {
    let binder = RowStateBinder::new();
    binder.set_open_only_one(true);
    let first = shared_row(DragEdge::Left);
    let second = shared_row(DragEdge::Left);
    binder.bind(&first, "a");
    binder.bind(&second, "b");

    binder.open_row("b");
    settle_shared(&second);
    assert!(second.lock().is_open());

    binder.open_row("a");
    assert!(second.lock().is_settling());
    settle_shared(&first);
    settle_shared(&second);

    assert!(first.lock().is_open());
    assert!(second.lock().is_closed());
    assert!(binder.is_open("a"));
    assert!(!binder.is_open("b"));
    assert_eq!(binder.open_count(), 1);
}

#[test]
fn single_open_reacts_to_drags() {
    let binder = RowStateBinder::new();
    binder.set_open_only_one(true);
    let first = shared_row(DragEdge::Left);
    let second = shared_row(DragEdge::Left);
    binder.bind(&first, "a");
    binder.bind(&second, "b");
    binder.open_row("b");
    settle_shared(&second);

    {
        let mut first = first.lock();
        first.handle_pointer(PointerEvent::down(150, 40));
        first.handle_pointer(PointerEvent::moved(160, 40));
        first.handle_pointer(PointerEvent::moved(170, 40));
        first.handle_pointer(PointerEvent::up(170, 40, Velocity::new(400.0, 0.0)));
    }
    settle_shared(&first);
    settle_shared(&second);

    assert!(first.lock().is_open());
    assert!(second.lock().is_closed());
    assert!(!binder.is_open("b"));
}

#[test]
fn single_open_with_one_recycled_widget() {
    let binder = RowStateBinder::new();
    binder.set_open_only_one(true);
    let row = shared_row(DragEdge::Right);

    binder.bind(&row, "a");
    binder.open_row("a");
    settle_shared(&row);
    assert!(binder.is_open("a"));

    // "b" is not bound yet: the widget showing "a" closes.
    binder.open_row("b");
    assert!(!binder.is_open("a"));
    binder.bind(&row, "b");
    assert!(row.lock().is_open());

    binder.bind(&row, "c");
    assert!(row.lock().is_closed());

    assert!(!binder.is_open("a"));
    assert!(binder.is_open("b"));
    assert!(!binder.is_open("c"));
}

#[test]
fn single_open_when_binding_an_open_row() {
    let mut saved = SavedState::new();
    let seed = RowStateBinder::new();
    seed.open_row("a");
    seed.open_row("b");
    seed.save_states(&mut saved).unwrap();

    let binder = RowStateBinder::new();
    binder.restore_states(&saved).unwrap();
    let first = shared_row(DragEdge::Left);
    let second = shared_row(DragEdge::Left);
    binder.bind(&first, "a");
    assert!(first.lock().is_open());

    binder.set_open_only_one(true);
    binder.bind(&second, "b");

    assert!(second.lock().is_open());
    assert!(first.lock().is_closed());
    assert!(!first.lock().is_settling());
    assert!(!binder.is_open("a"));
    assert!(binder.is_open("b"));
}

#[test]
fn locking_bound_rows_takes_effect_immediately() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Left);
    binder.bind(&row, "a");

    binder.lock_rows(["a"]);
    {
        let mut row = row.lock();
        assert!(row.is_drag_locked());
        row.handle_pointer(PointerEvent::down(150, 40));
        row.handle_pointer(PointerEvent::moved(200, 40));
        assert!(row.is_closed());
    }

    binder.unlock_rows(["a"]);
    assert!(!row.lock().is_drag_locked());
}

#[test]
fn restore_on_fresh_binder_reproduces_records() {
    let binder = RowStateBinder::new();
    binder.open_row("a");
    binder.lock_rows(["a", "c"]);
    binder.close_row("b");

    let mut saved = SavedState::new();
    binder.save_states(&mut saved).unwrap();
    let json = saved.to_json().unwrap();

    let restored = RowStateBinder::new();
    restored
        .restore_states(&SavedState::from_json(&json).unwrap())
        .unwrap();

    for key in ["a", "b", "c"] {
        assert_eq!(restored.record(key), binder.record(key), "{key}");
    }
    assert_eq!(restored.record("d"), None);
}

#[test]
fn dropped_widgets_are_forgotten() {
    let binder = RowStateBinder::new();
    let row = shared_row(DragEdge::Left);
    binder.bind(&row, "a");
    drop(row);

    binder.open_row("a");
    assert!(binder.is_open("a"));

    let replacement = shared_row(DragEdge::Left);
    binder.bind(&replacement, "a");
    assert!(replacement.lock().is_open());
    assert_eq!(Arc::strong_count(&replacement), 1);
}

#[test]
fn errors_convert_into_swipe_error() -> swipe_reveal::Result<()> {
    let config = SwipeRevealConfig::from_toml_str(
        r#"
        drag_edge = "right"
        density = 2.0
        "#,
    )?;
    let row = SwipeRevealLayout::shared(config);
    {
        let mut row = row.lock();
        row.measure(
            &children(DragEdge::Right),
            MeasureSpec::Exact(300),
            MeasureSpec::Exact(80),
        )?;
        row.layout(common::BOUNDS)?;
    }

    let binder = RowStateBinder::new();
    binder.bind(&row, "a");
    binder.open_row("a");

    let mut saved = SavedState::new();
    binder.save_states(&mut saved)?;
    let restored = RowStateBinder::new();
    restored.restore_states(&saved)?;
    assert!(restored.is_open("a"));

    let bad = SwipeRevealConfig::from_toml_str("density = -1.0");
    assert!(matches!(
        bad.map_err(swipe_reveal::SwipeError::from),
        Err(swipe_reveal::SwipeError::Config(_))
    ));
    Ok(())
}
