//! Selectable item records.
//!
//! A [`SelectableItem`] is the record shown in both the popup list and the
//! checked-items strip. The same record is shared between the items source,
//! the popup selection and the strip through [`ItemRef`], so flipping its
//! `checked` flag is visible everywhere at once.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use horizon_multiselect_core::{Property, ReadOnlyProperty, Signal};
use serde::{Deserialize, Serialize};

/// The identifier type used as the sole equality and ordering key.
pub type ItemId = i64;

/// A shared reference to an item.
pub type ItemRef = Arc<SelectableItem>;

/// A single selectable record with an identifier, label and checked flag.
///
/// Equality, ordering and hashing consider only [`id`](Self::id); the label is
/// display data and the flag is mutable state.
///
/// # Signals
///
/// - `checked_changed`: Emitted with the new value when the flag flips
pub struct SelectableItem {
    id: ItemId,
    label: String,
    checked: Property<bool>,

    /// Emitted when the checked flag changes. Args: new value
    pub checked_changed: Signal<bool>,
}

impl SelectableItem {
    /// Create an unchecked item.
    pub fn new(id: ItemId, label: impl Into<String>) -> Self {
        Self::with_checked(id, label, false)
    }

    /// Create an item with an initial checked flag.
    pub fn with_checked(id: ItemId, label: impl Into<String>, checked: bool) -> Self {
        Self {
            id,
            label: label.into(),
            checked: Property::new(checked),
            checked_changed: Signal::new(),
        }
    }

    /// Create a shared item reference.
    pub fn shared(id: ItemId, label: impl Into<String>, checked: bool) -> ItemRef {
        Arc::new(Self::with_checked(id, label, checked))
    }

    /// The item identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the item is currently checked.
    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// Read-only access to the checked property.
    pub fn checked(&self) -> ReadOnlyProperty<'_, bool> {
        self.checked.read_only()
    }

    /// Set the checked flag.
    ///
    /// Returns `true` and emits `checked_changed` if the flag flipped.
    pub fn set_checked(&self, checked: bool) -> bool {
        if self.checked.set(checked) {
            self.checked_changed.emit(checked);
            true
        } else {
            false
        }
    }

    /// Snapshot this item as a serializable record.
    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            id: self.id,
            label: self.label.clone(),
            checked: self.is_checked(),
        }
    }
}

impl From<ItemRecord> for SelectableItem {
    fn from(record: ItemRecord) -> Self {
        Self::with_checked(record.id, record.label, record.checked)
    }
}

impl PartialEq for SelectableItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SelectableItem {}

impl PartialOrd for SelectableItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SelectableItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for SelectableItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SelectableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("checked", &self.is_checked())
            .finish()
    }
}

/// Serializable form of an item, used to load and persist items.
///
/// Accepts `view_name` for the label and `is_check` for the flag as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item identifier.
    pub id: ItemId,
    /// Display label.
    #[serde(alias = "view_name")]
    pub label: String,
    /// Persisted checked flag.
    #[serde(default, alias = "is_check")]
    pub checked: bool,
}

impl ItemRecord {
    /// Create a record.
    pub fn new(id: ItemId, label: impl Into<String>, checked: bool) -> Self {
        Self {
            id,
            label: label.into(),
            checked,
        }
    }
}
