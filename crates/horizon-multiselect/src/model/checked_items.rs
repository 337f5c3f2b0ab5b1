//! The sorted checked-items list shown in the compact strip.
//!
//! [`CheckedItems`] is kept sorted ascending by item id with no duplicate ids
//! at every observable point: each mutation is a single sorted insert or a
//! single removal, bracketed by [`ListSignals`] so a view can re-render rows
//! incrementally.

use horizon_multiselect_core::Signal;

use super::item::{ItemId, ItemRef};

/// Signals emitted around structural changes to a [`CheckedItems`] list.
///
/// - **Before modifications**: `rows_about_to_be_*` / `model_about_to_reset`
/// - **After modifications**: `rows_*` / `model_reset`
pub struct ListSignals {
    /// Emitted just before a row is inserted. Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after a row has been inserted. Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before a row is removed. Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after a row has been removed. Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted before the list is cleared.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the list has been cleared.
    pub model_reset: Signal<()>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for row insertion around `insert_fn`.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits signals for row removal around `remove_fn`.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits signals for a reset around `reset_fn`.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

/// An ordered, deduplicated list of checked items.
#[derive(Default)]
pub struct CheckedItems {
    items: Vec<ItemRef>,
    signals: ListSignals,
}

impl CheckedItems {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The list's change signals.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Inserts an item, keeping the list sorted by id.
    ///
    /// Scans from the front: an entry with the same id means the item is
    /// already present and nothing happens; otherwise the item goes right
    /// before the first entry with a greater id, or at the end.
    ///
    /// Returns the row the item was inserted at, or `None` if already present.
    pub fn insert_sorted(&mut self, item: ItemRef) -> Option<usize> {
        let mut row = self.items.len();
        for (idx, existing) in self.items.iter().enumerate() {
            if existing.id() == item.id() {
                return None;
            }
            if existing.id() > item.id() {
                row = idx;
                break;
            }
        }

        let items = &mut self.items;
        self.signals.emit_rows_inserted(row, row, || {
            items.insert(row, item);
        });
        Some(row)
    }

    /// Removes the item with the given id.
    ///
    /// Returns the removed item and the row it occupied, or `None` if absent.
    pub fn remove_id(&mut self, id: ItemId) -> Option<(usize, ItemRef)> {
        let row = self.position(id)?;
        let mut removed = None;
        let items = &mut self.items;
        self.signals.emit_rows_removed(row, row, || {
            removed = Some(items.remove(row));
        });
        removed.map(|item| (row, item))
    }

    /// Removes every item.
    ///
    /// Returns `true` if anything was removed. An empty list emits nothing.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let items = &mut self.items;
        self.signals.emit_reset(|| items.clear());
        true
    }

    /// Returns the row of the item with the given id.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id()).ok()
    }

    /// Returns `true` if an item with the given id is present.
    pub fn contains_id(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, sorted by id.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Iterate over the items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }

    /// The ids of the items, ascending.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id()).collect()
    }
}

impl std::fmt::Debug for CheckedItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckedItems")
            .field("ids", &self.ids())
            .finish()
    }
}
