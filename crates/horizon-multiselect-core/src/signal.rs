//! Signal/slot system for Horizon Multiselect.
//!
//! This module provides the observer mechanism the selection models use to
//! publish structural changes. Signals are emitted by a model when its state
//! changes, and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//! - [`SignalBlocker`] - RAII guard that blocks emission for a scope
//!
//! # Re-entrancy
//!
//! Slots run synchronously on the emitting thread, in connection order.
//! [`Signal::emit`] releases its internal lock before invoking any slot, so a
//! slot may emit, connect to, or disconnect from the very signal that is
//! calling it. Connections made during an emission take effect from the next
//! emission onward.
//!
//! # Example
//!
//! ```
//! use horizon_multiselect_core::Signal;
//!
//! let label_changed = Signal::<String>::new();
//!
//! let conn_id = label_changed.connect(|text| {
//!     println!("Label changed to: {}", text);
//! });
//!
//! label_changed.emit("Harry".to_string());
//! label_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Connection<Args>>>;

/// A connected slot and the order it was connected in.
///
/// Slot keys are reused after a disconnect, so emission order comes from
/// `seq`, never from key order.
struct Connection<Args> {
    slot: Slot<Args>,
    seq: u64,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(usize, usize)` for multiple arguments.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`; slots must be `Send + Sync` as well. Slots
/// always run on the thread that calls [`emit`](Self::emit).
pub struct Signal<Args> {
    /// All active connections, shared with outstanding [`ConnectionGuard`]s.
    slots: Arc<SlotTable<Args>>,
    /// Sequence number handed to the next connection.
    next_seq: AtomicU64,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotMap::with_key())),
            next_seq: AtomicU64::new(0),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_multiselect_core::Signal;
    ///
    /// let signal = Signal::<i64>::new();
    /// let id = signal.connect(|id| println!("Checked item {}", id));
    /// signal.emit(4);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().insert(Connection {
            slot: Arc::new(slot),
            seq,
        })
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the connection table, so it
    /// may safely outlive the signal.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_multiselect_core::Signal;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<i32>::new();
    /// let counter = Arc::new(AtomicI32::new(0));
    /// {
    ///     let counter_clone = counter.clone();
    ///     let _guard = signal.connect_scoped(move |&n| {
    ///         counter_clone.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42);
    /// }
    /// signal.emit(43);
    /// assert_eq!(counter.load(Ordering::SeqCst), 42);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            slots: Arc::downgrade(&self.slots),
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Prefer [`SignalBlocker`]
    /// when the block should end with a scope.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Otherwise every slot that
    /// was connected when `emit` was called is invoked, in connection order.
    #[tracing::instrument(skip_all, target = "horizon_multiselect_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Snapshot so slots can touch this signal without deadlocking.
        let mut connections: Vec<(u64, Slot<Args>)> = self
            .slots
            .lock()
            .values()
            .map(|conn| (conn.seq, conn.slot.clone()))
            .collect();
        connections.sort_unstable_by_key(|&(seq, _)| seq);
        let slots: Vec<Slot<Args>> = connections.into_iter().map(|(_, slot)| slot).collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
pub struct ConnectionGuard<Args> {
    slots: Weak<SlotTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether the signal this guard belongs to still exists.
    pub fn is_attached(&self) -> bool {
        self.slots.strong_count() > 0
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().remove(self.id);
        }
    }
}

/// Blocks a signal for as long as the blocker is alive.
///
/// The previous blocked state is restored on drop, so blockers nest.
///
/// ```
/// use horizon_multiselect_core::{Signal, SignalBlocker};
///
/// let signal = Signal::<()>::new();
/// {
///     let _blocker = SignalBlocker::new(&signal);
///     assert!(signal.is_blocked());
/// }
/// assert!(!signal.is_blocked());
/// ```
pub struct SignalBlocker<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    previous: bool,
}

impl<'a, Args: 'static> SignalBlocker<'a, Args> {
    /// Block `signal` until the returned guard is dropped.
    pub fn new(signal: &'a Signal<Args>) -> Self {
        let previous = signal.is_blocked();
        signal.set_blocked(true);
        Self { signal, previous }
    }
}

impl<Args: 'static> Drop for SignalBlocker<'_, Args> {
    fn drop(&mut self) {
        self.signal.set_blocked(self.previous);
    }
}
