//! Property system for Horizon Multiselect.
//!
//! Properties hold a value behind interior mutability and report whether a
//! write actually changed it, which is what lets the owner decide whether a
//! change notification is due.
//!
//! # Example
//!
//! ```
//! use horizon_multiselect_core::{Property, Signal};
//!
//! struct Chip {
//!     visible: Property<bool>,
//!     visible_changed: Signal<bool>,
//! }
//!
//! impl Chip {
//!     fn set_visible(&self, visible: bool) {
//!         if self.visible.set(visible) {
//!             self.visible_changed.emit(visible);
//!         }
//!     }
//! }
//! # let chip = Chip { visible: Property::new(false), visible_changed: Signal::new() };
//! # chip.set_visible(true);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
///
/// # Thread Safety
///
/// `Property<T>` uses a `RwLock` internally and is `Send + Sync` whenever `T` is.
///
/// # Example
///
/// ```
/// use horizon_multiselect_core::Property;
///
/// let prop = Property::new(false);
/// assert!(!prop.set(false));
/// assert!(prop.set(true));
/// assert!(prop.get());
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// A read-only view of this property.
    pub fn read_only(&self) -> ReadOnlyProperty<'_, T> {
        ReadOnlyProperty::new(self)
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// A read-only view of a property.
///
/// Useful for exposing a property publicly while keeping the setter private.
pub struct ReadOnlyProperty<'a, T> {
    inner: &'a Property<T>,
}

impl<'a, T: Clone> ReadOnlyProperty<'a, T> {
    /// Create a read-only view of a property.
    pub fn new(property: &'a Property<T>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }
}
