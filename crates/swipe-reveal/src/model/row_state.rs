//! Per-row open/locked state that survives view recycling.
//!
//! List containers reuse a handful of row views for many data items. The
//! [`RowStateBinder`] keeps a [`RowRecord`] for each item key and re-applies
//! it whenever a recycled [`SwipeRevealLayout`] is bound to a new key, so a
//! row that was left open is still open when it scrolls back into view.
//!
//! # Example
//!
//! ```
//! use swipe_reveal::{RowStateBinder, SavedState};
//!
//! let binder = RowStateBinder::new();
//! binder.open_row("inbox/42");
//! binder.lock_rows(["inbox/7"]);
//!
//! let mut saved = SavedState::new();
//! binder.save_states(&mut saved).unwrap();
//!
//! let restored = RowStateBinder::new();
//! restored.restore_states(&saved).unwrap();
//! assert!(restored.is_open("inbox/42"));
//! assert!(restored.is_locked("inbox/7"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use swipe_reveal_core::logging::targets;
use swipe_reveal_core::{ConnectionGuard, SavedState, StateResult};

use crate::widget::{DragState, SharedLayout, SwipeRevealLayout};

/// Key under which [`RowStateBinder::save_states`] stores its records.
pub const SAVED_STATE_KEY: &str = "swipe_reveal.row_states";

/// Remembered state of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowRecord {
    /// The row was last seen open or opening.
    pub open: bool,
    /// Dragging the row is disabled.
    pub locked: bool,
}

type WeakLayout = Weak<Mutex<SwipeRevealLayout>>;

/// A widget currently showing a key, plus its state subscription.
struct Binding {
    widget: WeakLayout,
    _connection: ConnectionGuard<DragState>,
}

impl Binding {
    fn is(&self, widget: &SharedLayout) -> bool {
        std::ptr::eq(self.widget.as_ptr(), Arc::as_ptr(widget))
    }
}

#[derive(Default)]
struct BinderInner {
    records: HashMap<String, RowRecord>,
    bindings: HashMap<String, Binding>,
    open_only_one: bool,
}

impl BinderInner {
    /// Mark every key except `key` closed and return the widgets bound to
    /// those keys.
    fn close_others(&mut self, key: &str) -> Vec<WeakLayout> {
        for (other, record) in self.records.iter_mut() {
            if other != key {
                record.open = false;
            }
        }
        self.bindings
            .iter()
            .filter(|(other, _)| other.as_str() != key)
            .map(|(_, binding)| binding.widget.clone())
            .collect()
    }

    fn bound_widget(&self, key: &str) -> Option<SharedLayout> {
        self.bindings.get(key).and_then(|binding| binding.widget.upgrade())
    }
}

/// Remembers open and locked state per row key.
///
/// The binder is a cheap, clonable handle; clones share the same records.
/// Widgets are held weakly, so dropping a row view needs no cleanup.
#[derive(Clone, Default)]
pub struct RowStateBinder {
    inner: Arc<Mutex<BinderInner>>,
}

impl RowStateBinder {
    /// Create an empty binder. Several rows may be open at once until
    /// [`set_open_only_one`](Self::set_open_only_one) is enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most one open row.
    pub fn set_open_only_one(&self, open_only_one: bool) {
        self.inner.lock().open_only_one = open_only_one;
    }

    /// Returns true if at most one row may be open.
    pub fn is_open_only_one(&self) -> bool {
        self.inner.lock().open_only_one
    }

    /// Show `key` in `widget`.
    ///
    /// Any gesture in progress on the widget is aborted, the widget is
    /// detached from the key it showed before, and the remembered state of
    /// `key` is applied without animation. Keys seen for the first time start
    /// closed and unlocked.
    #[tracing::instrument(skip(self, widget), target = "swipe_reveal::binder", level = "debug")]
    pub fn bind(&self, widget: &SharedLayout, key: &str) {
        widget.lock().abort();

        let (record, others) = {
            let mut inner = self.inner.lock();
            inner
                .bindings
                .retain(|_, binding| !binding.is(widget) && binding.widget.strong_count() > 0);
            inner.bindings.remove(key);

            let record = *inner.records.entry(key.to_owned()).or_default();
            let others = if inner.open_only_one && record.open {
                inner.close_others(key)
            } else {
                Vec::new()
            };
            (record, others)
        };

        for other in &others {
            close_other(other, Some(widget), false);
        }

        let connection = {
            let mut layout = widget.lock();
            if record.open {
                layout.open(false);
            } else {
                layout.close(false);
            }
            layout.set_drag_locked(record.locked);

            let inner = Arc::downgrade(&self.inner);
            let this = Arc::downgrade(widget);
            let bound_key = key.to_owned();
            layout.drag_state_changed.connect_scoped(move |&state| {
                if let Some(inner) = inner.upgrade() {
                    on_state_changed(&inner, &bound_key, &this, state);
                }
            })
        };

        self.inner.lock().bindings.insert(
            key.to_owned(),
            Binding {
                widget: Arc::downgrade(widget),
                _connection: connection,
            },
        );
    }

    /// Open `key`, animating its widget if it is bound.
    pub fn open_row(&self, key: &str) {
        let (bound, others) = {
            let mut inner = self.inner.lock();
            inner.records.entry(key.to_owned()).or_default().open = true;
            let bound = inner.bound_widget(key);
            let others = if bound.is_none() && inner.open_only_one {
                inner.close_others(key)
            } else {
                Vec::new()
            };
            (bound, others)
        };

        match bound {
            Some(widget) => widget.lock().open(true),
            None => {
                for other in &others {
                    close_other(other, None, true);
                }
            }
        }
    }

    /// Close `key`, animating its widget if it is bound.
    pub fn close_row(&self, key: &str) {
        let bound = {
            let mut inner = self.inner.lock();
            inner.records.entry(key.to_owned()).or_default().open = false;
            inner.bound_widget(key)
        };
        if let Some(widget) = bound {
            widget.lock().close(true);
        }
    }

    /// Disable dragging for `keys`.
    pub fn lock_rows<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_locked(keys, true);
    }

    /// Re-enable dragging for `keys`.
    pub fn unlock_rows<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_locked(keys, false);
    }

    fn set_locked<I, S>(&self, keys: I, locked: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bound: Vec<SharedLayout> = {
            let mut inner = self.inner.lock();
            keys.into_iter()
                .filter_map(|key| {
                    let key = key.as_ref();
                    inner.records.entry(key.to_owned()).or_default().locked = locked;
                    inner.bound_widget(key)
                })
                .collect()
        };
        for widget in bound {
            widget.lock().set_drag_locked(locked);
        }
    }

    /// The record for `key`, if the key has been seen.
    pub fn record(&self, key: &str) -> Option<RowRecord> {
        self.inner.lock().records.get(key).copied()
    }

    /// Returns true if `key` is remembered as open.
    pub fn is_open(&self, key: &str) -> bool {
        self.record(key).is_some_and(|record| record.open)
    }

    /// Returns true if `key` is locked.
    pub fn is_locked(&self, key: &str) -> bool {
        self.record(key).is_some_and(|record| record.locked)
    }

    /// Number of keys remembered as open.
    pub fn open_count(&self) -> usize {
        self.inner
            .lock()
            .records
            .values()
            .filter(|record| record.open)
            .count()
    }

    /// Store all records in `state`.
    pub fn save_states(&self, state: &mut SavedState) -> StateResult<()> {
        let snapshot: BTreeMap<String, RowRecord> = {
            let inner = self.inner.lock();
            inner
                .records
                .iter()
                .map(|(key, record)| (key.clone(), *record))
                .collect()
        };
        tracing::debug!(target: targets::BINDER, rows = snapshot.len(), "saving row states");
        state.put(SAVED_STATE_KEY, &snapshot)
    }

    /// Replace all records with those stored by [`save_states`](Self::save_states).
    ///
    /// Call before binding any widget. A state without binder records leaves
    /// the binder unchanged.
    pub fn restore_states(&self, state: &SavedState) -> StateResult<()> {
        let Some(records) = state.get::<HashMap<String, RowRecord>>(SAVED_STATE_KEY)? else {
            return Ok(());
        };

        let mut inner = self.inner.lock();
        if !inner.bindings.is_empty() {
            tracing::warn!(
                target: targets::BINDER,
                bound = inner.bindings.len(),
                "row states restored after widgets were bound; rebind to apply them"
            );
        }
        tracing::debug!(target: targets::BINDER, rows = records.len(), "restoring row states");
        inner.records = records;
        Ok(())
    }
}

impl std::fmt::Debug for RowStateBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("RowStateBinder")
            .field("records", &inner.records.len())
            .field("bindings", &inner.bindings.len())
            .field("open_only_one", &inner.open_only_one)
            .finish()
    }
}

fn on_state_changed(
    inner: &Mutex<BinderInner>,
    key: &str,
    widget: &WeakLayout,
    state: DragState,
) {
    let open = state.is_opening_or_open();
    let others = {
        let mut inner = inner.lock();
        inner.records.entry(key.to_owned()).or_default().open = open;
        if open && inner.open_only_one {
            inner.close_others(key)
        } else {
            Vec::new()
        }
    };
    tracing::trace!(target: targets::BINDER, key, ?state, "row state changed");

    let this = widget.upgrade();
    for other in &others {
        close_other(other, this.as_ref(), true);
    }
}

/// Close a widget bound to another key.
///
/// A widget that is locked elsewhere on this thread (for example the one
/// whose notification is being handled) is skipped.
fn close_other(other: &WeakLayout, except: Option<&SharedLayout>, animate: bool) {
    let Some(other) = other.upgrade() else {
        return;
    };
    if except.is_some_and(|except| Arc::ptr_eq(except, &other)) {
        return;
    }
    match other.try_lock() {
        Some(mut layout) => {
            if !layout.is_closed() {
                layout.close(animate);
            }
        }
        None => {
            tracing::warn!(target: targets::BINDER, "skipped closing a row that is busy");
        }
    }
}

static_assertions::assert_impl_all!(RowStateBinder: Send, Sync);
