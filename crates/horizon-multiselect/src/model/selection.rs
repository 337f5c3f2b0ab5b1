//! Selection model for the popup list.
//!
//! This module provides [`PopupSelection`], which tracks the popup list's
//! multi-selection over the items source. Every mutation reports the
//! [`SelectionChange`] it produced and emits it on `selection_changed`.
//!
//! # Example
//!
//! ```
//! use horizon_multiselect::model::{PopupSelection, SelectableItem, SelectionFlags};
//!
//! let mut selection = PopupSelection::new();
//! let harry = SelectableItem::shared(2, "Harry", false);
//!
//! let change = selection.select(harry.clone(), SelectionFlags::TOGGLE);
//! assert_eq!(change.added.len(), 1);
//! assert!(selection.is_selected(2));
//!
//! selection.selection_changed.connect(|change| {
//!     println!("Selection changed: +{} -{}", change.added.len(), change.removed.len());
//! });
//! ```

use std::collections::HashSet;

use horizon_multiselect_core::logging::targets;
use horizon_multiselect_core::Signal;

use super::item::{ItemId, ItemRef};

/// Items added to and removed from a selection by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Items that became selected.
    pub added: Vec<ItemRef>,
    /// Items that stopped being selected.
    pub removed: Vec<ItemRef>,
}

impl SelectionChange {
    /// A change with only additions.
    pub fn added(added: Vec<ItemRef>) -> Self {
        Self {
            added,
            removed: Vec::new(),
        }
    }

    /// A change with only removals.
    pub fn removed(removed: Vec<ItemRef>) -> Self {
        Self {
            added: Vec::new(),
            removed,
        }
    }

    /// Returns `true` if nothing was added or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Appends another change to this one.
    pub fn extend(&mut self, other: SelectionChange) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
    }
}

/// Flags controlling selection operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionFlags {
    /// Clear existing selection before applying operation.
    pub clear: bool,
    /// Select the specified item.
    pub select: bool,
    /// Deselect the specified item.
    pub deselect: bool,
    /// Toggle selection state of the specified item.
    pub toggle: bool,
}

impl SelectionFlags {
    /// No operation.
    pub const NONE: Self = Self::empty();

    /// Clear existing selection.
    pub const CLEAR: Self = Self {
        clear: true,
        ..Self::empty()
    };

    /// Select the item.
    pub const SELECT: Self = Self {
        select: true,
        ..Self::empty()
    };

    /// Deselect the item.
    pub const DESELECT: Self = Self {
        deselect: true,
        ..Self::empty()
    };

    /// Toggle selection of the item.
    pub const TOGGLE: Self = Self {
        toggle: true,
        ..Self::empty()
    };

    /// Clear existing selection and select the item.
    pub const CLEAR_AND_SELECT: Self = Self {
        clear: true,
        select: true,
        ..Self::empty()
    };

    const fn empty() -> Self {
        Self {
            clear: false,
            select: false,
            deselect: false,
            toggle: false,
        }
    }
}

/// Manages the popup list's multi-selection.
///
/// Items are tracked by id; the selected items are kept in selection order.
///
/// # Signals
///
/// - `selection_changed`: Emitted when selection changes, with the
///   [`SelectionChange`] that describes it
pub struct PopupSelection {
    /// Set of selected item ids for O(1) lookup.
    selected_ids: HashSet<ItemId>,

    /// Selected items in selection order.
    selected: Vec<ItemRef>,

    /// Emitted when selection changes.
    pub selection_changed: Signal<SelectionChange>,
}

impl Default for PopupSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self {
            selected_ids: HashSet::new(),
            selected: Vec::new(),
            selection_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Checks if the item with the given id is selected.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Returns true if any items are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the number of selected items.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the selected items in selection order.
    pub fn selected_items(&self) -> &[ItemRef] {
        &self.selected
    }

    /// Returns the selected ids, ascending.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.selected_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Performs a selection operation on an item.
    ///
    /// The behavior depends on the flags:
    /// - `clear`: Deselects all items first
    /// - `select`: Adds the item to selection
    /// - `deselect`: Removes the item from selection
    /// - `toggle`: Toggles the selection state
    pub fn select(&mut self, item: ItemRef, flags: SelectionFlags) -> SelectionChange {
        let mut change = SelectionChange::default();

        if flags.clear && !self.selected.is_empty() {
            change.removed = std::mem::take(&mut self.selected);
            self.selected_ids.clear();
        }

        let id = item.id();
        let was_selected = self.selected_ids.contains(&id);

        if flags.toggle {
            if was_selected {
                self.take(id, &mut change.removed);
            } else {
                self.add_to_selection(item.clone());
                change.added.push(item);
            }
        } else if flags.select && !was_selected {
            self.add_to_selection(item.clone());
            change.added.push(item);
        } else if flags.deselect && was_selected {
            self.take(id, &mut change.removed);
        }

        // Items cleared and then re-selected did not change.
        let reselected: HashSet<ItemId> = change
            .removed
            .iter()
            .map(|removed| removed.id())
            .filter(|id| self.selected_ids.contains(id))
            .collect();
        change.removed.retain(|removed| !reselected.contains(&removed.id()));
        change.added.retain(|added| !reselected.contains(&added.id()));

        self.finish(change)
    }

    /// Selects every given item that is not already selected.
    pub fn select_items<I>(&mut self, items: I) -> SelectionChange
    where
        I: IntoIterator<Item = ItemRef>,
    {
        let mut change = SelectionChange::default();
        for item in items {
            if !self.selected_ids.contains(&item.id()) {
                self.add_to_selection(item.clone());
                change.added.push(item);
            }
        }
        self.finish(change)
    }

    /// Deselects the item with the given id, if selected.
    pub fn deselect_id(&mut self, id: ItemId) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.selected_ids.contains(&id) {
            self.take(id, &mut change.removed);
        }
        self.finish(change)
    }

    /// Clears all selection.
    pub fn clear_selection(&mut self) -> SelectionChange {
        let mut change = SelectionChange::default();
        if !self.selected.is_empty() {
            change.removed = std::mem::take(&mut self.selected);
            self.selected_ids.clear();
        }
        self.finish(change)
    }

    /// Clears all selection without emitting `selection_changed`.
    ///
    /// Used when the items source is replaced wholesale.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.selected_ids.clear();
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn add_to_selection(&mut self, item: ItemRef) {
        if self.selected_ids.insert(item.id()) {
            self.selected.push(item);
        }
    }

    fn take(&mut self, id: ItemId, removed: &mut Vec<ItemRef>) {
        self.selected_ids.remove(&id);
        if let Some(pos) = self.selected.iter().position(|item| item.id() == id) {
            let item = self.selected.remove(pos);
            if !removed.iter().any(|r| r.id() == id) {
                removed.push(item);
            }
        }
    }

    fn finish(&self, change: SelectionChange) -> SelectionChange {
        if !change.is_empty() {
            tracing::trace!(
                target: targets::SELECTION,
                added = change.added.len(),
                removed = change.removed.len(),
                "popup selection changed"
            );
            self.selection_changed.emit(change.clone());
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectableItem;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn item(id: ItemId) -> ItemRef {
        SelectableItem::shared(id, format!("item {id}"), false)
    }

    #[test]
    fn test_selection_creation() {
        let selection = PopupSelection::new();
        assert!(!selection.has_selection());
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_multi_selection() {
        let mut selection = PopupSelection::new();

        selection.select(item(0), SelectionFlags::SELECT);
        selection.select(item(1), SelectionFlags::SELECT);

        assert!(selection.is_selected(0));
        assert!(selection.is_selected(1));
        assert_eq!(selection.selected_count(), 2);
    }

    #[test]
    fn test_toggle_selection() {
        let mut selection = PopupSelection::new();

        let change = selection.select(item(3), SelectionFlags::TOGGLE);
        assert_eq!(change.added.len(), 1);
        assert!(selection.is_selected(3));

        let change = selection.select(item(3), SelectionFlags::TOGGLE);
        assert_eq!(change.removed.len(), 1);
        assert!(!selection.is_selected(3));
    }

    #[test]
    fn test_select_already_selected_is_empty_change() {
        let mut selection = PopupSelection::new();
        selection.select(item(1), SelectionFlags::SELECT);

        let change = selection.select(item(1), SelectionFlags::SELECT);
        assert!(change.is_empty());
    }

    #[test]
    fn test_clear_and_select_reports_net_change() {
        let mut selection = PopupSelection::new();
        selection.select_items([item(1), item(2)]);

        let change = selection.select(item(2), SelectionFlags::CLEAR_AND_SELECT);
        let removed: Vec<_> = change.removed.iter().map(|i| i.id()).collect();
        assert_eq!(removed, vec![1]);
        assert!(change.added.is_empty());
        assert_eq!(selection.selected_ids(), vec![2]);
    }

    #[test]
    fn test_deselect_id() {
        let mut selection = PopupSelection::new();
        selection.select_items([item(1), item(3), item(5)]);

        let change = selection.deselect_id(3);
        assert_eq!(change.removed.len(), 1);
        assert_eq!(selection.selected_ids(), vec![1, 5]);

        assert!(selection.deselect_id(3).is_empty());
    }

    #[test]
    fn test_selection_order_preserved() {
        let mut selection = PopupSelection::new();
        selection.select_items([item(5), item(1), item(3)]);

        let order: Vec<_> = selection.selected_items().iter().map(|i| i.id()).collect();
        assert_eq!(order, vec![5, 1, 3]);
        assert_eq!(selection.selected_ids(), vec![1, 3, 5]);
    }

    #[test]
    fn test_selection_signal() {
        let mut selection = PopupSelection::new();
        let added_count = Arc::new(AtomicUsize::new(0));
        let emissions = Arc::new(AtomicUsize::new(0));

        let added_clone = added_count.clone();
        let emissions_clone = emissions.clone();
        selection.selection_changed.connect(move |change| {
            added_clone.fetch_add(change.added.len(), Ordering::SeqCst);
            emissions_clone.fetch_add(1, Ordering::SeqCst);
        });

        selection.select(item(0), SelectionFlags::SELECT);
        selection.select(item(1), SelectionFlags::SELECT);
        selection.select(item(1), SelectionFlags::SELECT);

        assert_eq!(added_count.load(Ordering::SeqCst), 2);
        assert_eq!(emissions.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reset_is_silent() {
        let mut selection = PopupSelection::new();
        selection.select_items([item(1), item(2)]);

        let emissions = Arc::new(AtomicUsize::new(0));
        let emissions_clone = emissions.clone();
        selection.selection_changed.connect(move |_| {
            emissions_clone.fetch_add(1, Ordering::SeqCst);
        });

        selection.reset();
        assert!(!selection.has_selection());
        assert_eq!(emissions.load(Ordering::SeqCst), 0);
        assert!(!selection.selection_changed.is_blocked());
    }
}
