//! Typed notifications from a widget to its observers.
//!
//! A [`Signal`] owns a table of slots. Emitting runs every slot on the
//! emitting thread, which for swipe-reveal is the UI thread driving the
//! widget. Connecting returns a [`ConnectionId`]; [`Signal::connect_scoped`]
//! instead returns a [`ConnectionGuard`] that removes the slot when dropped,
//! which is how the row binder follows a recycled widget.
//!
//! Slots are collected before any of them runs and the table is unlocked
//! while they execute, so a slot may connect, disconnect or emit on the same
//! signal. A slot connected during an emission first runs on the next one.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use swipe_reveal_core::Signal;
//!
//! let offset_changed = Signal::<f32>::new();
//! let updates = Arc::new(AtomicUsize::new(0));
//!
//! let counter = updates.clone();
//! let id = offset_changed.connect(move |offset| {
//!     assert!((0.0..=1.0).contains(offset));
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! offset_changed.emit(0.25);
//! offset_changed.disconnect(id);
//! offset_changed.emit(0.5);
//! assert_eq!(updates.load(Ordering::Relaxed), 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle for one connected slot, accepted by [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A notification carrying `Args` to any number of slots.
///
/// Use `()` for notifications without a payload. The order in which slots
/// run is unspecified.
pub struct Signal<Args> {
    connections: Arc<SlotTable<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Add `slot`. It stays connected until [`disconnect`](Self::disconnect)
    /// is called with the returned id or the signal is dropped.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Add `slot` for as long as the returned guard lives.
    ///
    /// The guard holds the slot table weakly and may outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id,
        }
    }

    /// Remove one slot. Returns false if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of slots currently connected.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppress (or resume) emissions. Slots stay connected while blocked.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Run every connected slot with `args`, unless blocked.
    #[tracing::instrument(skip_all, target = "swipe_reveal_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// Keeps a slot connected; dropping it disconnects the slot.
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use swipe_reveal_core::Signal;
///
/// let state_changed = Signal::<&'static str>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// let guard = state_changed.connect_scoped(move |state| sink.lock().push(*state));
/// state_changed.emit("opening");
/// drop(guard);
/// state_changed.emit("open");
///
/// assert_eq!(*seen.lock(), ["opening"]);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<SlotTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.lock().remove(self.id);
        }
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_emission_reaches_slot() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = received.clone();
        signal.connect(move |&value| {
            sink.lock().push(value);
        });

        signal.emit(3);
        signal.emit(5);
        assert_eq!(*received.lock(), vec![3, 5]);
    }

    #[test]
    fn test_disconnect_is_reported_once() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = received.clone();
        let id = signal.connect(move |&value| {
            sink.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_blocked_signal_drops_emissions() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = received.clone();
        signal.connect(move |&value| {
            sink.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_disconnect_all_empties_table() {
        let signal = Signal::<()>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_dropping_guard_disconnects() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let sink = received.clone();
            let _guard = signal.connect_scoped(move |&value| {
                sink.lock().push(value);
            });
            signal.emit(1);
        }
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_outlives_signal() {
        let guard = {
            let signal = Signal::<i32>::new();
            signal.connect_scoped(|_| {})
        };
        // Dropping after the signal is gone must not panic.
        drop(guard);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));
        let own_id = Arc::new(Mutex::new(None));

        let reentrant = signal.clone();
        let sink = received.clone();
        let own_id_clone = own_id.clone();
        let id = signal.connect(move |&value| {
            sink.lock().push(value);
            if let Some(id) = own_id_clone.lock().take() {
                reentrant.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_slot_may_emit_reentrantly() {
        let signal = Arc::new(Signal::<u32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let reentrant = signal.clone();
        let sink = received.clone();
        signal.connect(move |&depth| {
            sink.lock().push(depth);
            if depth == 0 {
                reentrant.emit(depth + 1);
            }
        });

        signal.emit(0);
        assert_eq!(*received.lock(), vec![0, 1]);
    }
}
