//! Keeps the popup selection, the checked-items strip and the item flags in step.
//!
//! [`SelectionSynchronizer`] owns the popup's [`PopupSelection`] and the
//! strip's [`CheckedItems`]. It reacts to two notifications:
//!
//! - the popup selection changed (items toggled in the popup), and
//! - items were removed from the strip.
//!
//! A strip removal is never applied to the strip directly. It is propagated
//! upstream by deselecting the popup, and the resulting popup change comes
//! back through [`on_source_selection_changed`](SelectionSynchronizer::on_source_selection_changed),
//! which updates the flags and the strip. Each hop only removes, so the round
//! trip always terminates.

use horizon_multiselect_core::logging::{span_names, targets};
use horizon_multiselect_core::{PerfSpan, Signal};

use crate::model::{CheckedItems, ItemRef, ItemsSource, PopupSelection, SelectionChange};

/// Synchronizes the three views of one multi-selection.
///
/// # Signals
///
/// - `checked_items_changed`: Emitted with the full checked list after any
///   insertion or removal; never emitted when nothing structurally changed
pub struct SelectionSynchronizer {
    popup: PopupSelection,
    checked: CheckedItems,

    /// Emitted when the checked list changes. Args: checked items, ascending by id
    pub checked_items_changed: Signal<Vec<ItemRef>>,
}

impl Default for SelectionSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSynchronizer {
    /// Creates a synchronizer with an empty selection.
    pub fn new() -> Self {
        Self {
            popup: PopupSelection::new(),
            checked: CheckedItems::new(),
            checked_items_changed: Signal::new(),
        }
    }

    /// The popup list's selection.
    pub fn popup(&self) -> &PopupSelection {
        &self.popup
    }

    /// Mutable access to the popup selection, for hosts that drive it directly.
    ///
    /// Changes made here must be fed back through
    /// [`on_source_selection_changed`](Self::on_source_selection_changed).
    pub fn popup_mut(&mut self) -> &mut PopupSelection {
        &mut self.popup
    }

    /// The checked items shown in the strip.
    pub fn checked_items(&self) -> &CheckedItems {
        &self.checked
    }

    /// Selects every item whose persisted flag is set and adds it to the strip.
    ///
    /// An absent or empty source is a no-op. Returns `true` if the strip changed.
    pub fn initialize(&mut self, source: Option<&ItemsSource>) -> bool {
        let Some(source) = source else {
            return false;
        };
        let _span = PerfSpan::new(span_names::INITIALIZE);

        let persisted = source.checked_items();
        if persisted.is_empty() {
            return false;
        }

        tracing::debug!(
            target: targets::SYNC,
            count = persisted.len(),
            "initializing selection from persisted flags"
        );
        self.popup.select_items(persisted.iter().cloned());
        self.on_source_selection_changed(&persisted, &[])
    }

    /// Applies a popup selection change to the item flags and the strip.
    ///
    /// Additions are applied first, in the same order the popup applies them:
    /// each sets the flag and is inserted in id order, unless an item with the
    /// same id is already in the strip. Then each removal clears the flag and
    /// takes the item out of the strip if present. An item listed in both ends
    /// up unchecked.
    ///
    /// Returns `true` and emits `checked_items_changed` only if the strip changed.
    pub fn on_source_selection_changed(&mut self, added: &[ItemRef], removed: &[ItemRef]) -> bool {
        let mut changed = false;

        for item in added {
            item.set_checked(true);
            if let Some(row) = self.checked.insert_sorted(item.clone()) {
                tracing::trace!(target: targets::SYNC, id = item.id(), row, "inserted into strip");
                changed = true;
            }
        }

        for item in removed {
            item.set_checked(false);
            if let Some((row, _)) = self.checked.remove_id(item.id()) {
                tracing::trace!(target: targets::SYNC, id = item.id(), row, "removed from strip");
                changed = true;
            }
        }

        if changed {
            self.checked_items_changed.emit(self.checked.items().to_vec());
        }
        changed
    }

    /// Propagates strip removals upstream to the popup selection.
    ///
    /// Deselects every popup item whose id matches a removed item. The strip
    /// and the flags are left alone; the returned change must be routed back
    /// into [`on_source_selection_changed`](Self::on_source_selection_changed).
    pub fn on_display_selection_changed(&mut self, removed: &[ItemRef]) -> SelectionChange {
        let mut change = SelectionChange::default();
        for item in removed {
            change.extend(self.popup.deselect_id(item.id()));
        }

        if !change.is_empty() {
            tracing::trace!(
                target: targets::SYNC,
                removed = change.removed.len(),
                "strip removal propagated to popup"
            );
        }
        change
    }

    /// Rebuilds the selection for a new items source.
    ///
    /// The popup selection is cleared silently, the strip is cleared, and the
    /// selection is initialized from the new source's persisted flags. Items
    /// of the previous source keep their flags.
    ///
    /// `checked_items_changed` is emitted at most once. Returns `true` if the
    /// strip changed.
    pub fn reset(&mut self, source: Option<&ItemsSource>) -> bool {
        let _span = PerfSpan::new(span_names::RESET);

        self.popup.reset();
        let cleared = self.checked.clear();
        let repopulated = self.initialize(source);

        if cleared && !repopulated {
            self.checked_items_changed.emit(Vec::new());
        }
        cleared || repopulated
    }

    /// Checks that the three views agree for every item in `source`.
    ///
    /// An item must be checked exactly when it is in the strip and exactly
    /// when the popup has it selected, and the strip must be strictly
    /// ascending by id.
    pub fn is_consistent(&self, source: &ItemsSource) -> bool {
        let sorted = self
            .checked
            .items()
            .windows(2)
            .all(|pair| pair[0].id() < pair[1].id());

        sorted
            && source.iter().all(|item| {
                let in_strip = self.checked.contains_id(item.id());
                item.is_checked() == in_strip && self.popup.is_selected(item.id()) == in_strip
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, SelectableItem, SelectionFlags};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn source(ids: &[ItemId]) -> ItemsSource {
        ItemsSource::new(
            ids.iter()
                .map(|&id| SelectableItem::shared(id, format!("item {id}"), false))
                .collect(),
        )
        .unwrap()
    }

    fn item(source: &ItemsSource, id: ItemId) -> ItemRef {
        source.find(id).cloned().unwrap()
    }

    #[test]
    fn test_added_items_are_checked_and_sorted() {
        let source = source(&[1, 3, 5]);
        let mut sync = SelectionSynchronizer::new();

        for id in [5, 1, 3] {
            let change = sync.popup_mut().select(item(&source, id), SelectionFlags::SELECT);
            sync.on_source_selection_changed(&change.added, &change.removed);
        }

        assert_eq!(sync.checked_items().ids(), vec![1, 3, 5]);
        assert!(source.iter().all(|item| item.is_checked()));
        assert!(sync.is_consistent(&source));
    }

    #[test]
    fn test_removed_items_are_unchecked() {
        let source = source(&[1, 2]);
        let mut sync = SelectionSynchronizer::new();
        let one = item(&source, 1);

        sync.on_source_selection_changed(std::slice::from_ref(&one), &[]);
        assert!(one.is_checked());

        assert!(sync.on_source_selection_changed(&[], std::slice::from_ref(&one)));
        assert!(!one.is_checked());
        assert!(sync.checked_items().is_empty());
    }

    #[test]
    fn test_removing_absent_item_is_noop() {
        let source = source(&[1, 2]);
        let mut sync = SelectionSynchronizer::new();
        let two = item(&source, 2);

        assert!(!sync.on_source_selection_changed(&[], &[two]));
    }

    #[test]
    fn test_item_added_and_removed_in_one_change_ends_unchecked() {
        let source = source(&[1, 2]);
        let mut sync = SelectionSynchronizer::new();
        let two = item(&source, 2);

        let popup = sync.popup_mut();
        popup.select(two.clone(), SelectionFlags::SELECT);
        popup.deselect_id(2);

        sync.on_source_selection_changed(std::slice::from_ref(&two), std::slice::from_ref(&two));

        assert!(!two.is_checked());
        assert!(sync.checked_items().is_empty());
        assert!(sync.is_consistent(&source));
    }

    #[test]
    fn test_republish_only_on_structural_change() {
        let source = source(&[1, 2]);
        let mut sync = SelectionSynchronizer::new();
        let published = Arc::new(Mutex::new(Vec::new()));

        let published_clone = published.clone();
        sync.checked_items_changed.connect(move |items| {
            let ids: Vec<ItemId> = items.iter().map(|item| item.id()).collect();
            published_clone.lock().push(ids);
        });

        let one = item(&source, 1);
        sync.on_source_selection_changed(std::slice::from_ref(&one), &[]);
        sync.on_source_selection_changed(std::slice::from_ref(&one), &[]);
        sync.on_source_selection_changed(&[], &[]);

        assert_eq!(*published.lock(), vec![vec![1]]);
    }

    #[test]
    fn test_display_removal_only_touches_popup() {
        let source = source(&[1, 3, 5]);
        let mut sync = SelectionSynchronizer::new();
        let all: Vec<ItemRef> = source.items().to_vec();
        sync.popup_mut().select_items(all.clone());
        sync.on_source_selection_changed(&all, &[]);

        let three = item(&source, 3);
        let hop = sync.on_display_selection_changed(std::slice::from_ref(&three));

        assert_eq!(hop.removed.len(), 1);
        assert!(!sync.popup().is_selected(3));
        assert_eq!(sync.checked_items().ids(), vec![1, 3, 5]);
        assert!(three.is_checked());

        sync.on_source_selection_changed(&hop.added, &hop.removed);
        assert_eq!(sync.checked_items().ids(), vec![1, 5]);
        assert!(!three.is_checked());
        assert!(sync.is_consistent(&source));
    }

    #[test]
    fn test_initialize_without_source() {
        let mut sync = SelectionSynchronizer::new();
        assert!(!sync.initialize(None));
        assert!(!sync.initialize(Some(&ItemsSource::empty())));
        assert!(sync.checked_items().is_empty());
    }

    #[test]
    fn test_reset_rebuilds_from_new_source() {
        let old = source(&[1, 2]);
        let mut sync = SelectionSynchronizer::new();
        let old_one = item(&old, 1);
        sync.popup_mut().select(old_one.clone(), SelectionFlags::SELECT);
        sync.on_source_selection_changed(std::slice::from_ref(&old_one), &[]);

        let new = ItemsSource::new(vec![
            SelectableItem::shared(7, "seven", true),
            SelectableItem::shared(8, "eight", false),
        ])
        .unwrap();

        let emissions = Arc::new(Mutex::new(0));
        let count = emissions.clone();
        sync.checked_items_changed.connect(move |_| *count.lock() += 1);

        assert!(sync.reset(Some(&new)));
        assert_eq!(sync.checked_items().ids(), vec![7]);
        assert_eq!(sync.popup().selected_ids(), vec![7]);
        assert_eq!(*emissions.lock(), 1);
        assert!(old_one.is_checked());
        assert!(sync.is_consistent(&new));
    }

    #[test]
    fn test_reset_to_nothing_publishes_empty_list() {
        let source = source(&[1]);
        let mut sync = SelectionSynchronizer::new();
        let one = item(&source, 1);
        sync.on_source_selection_changed(std::slice::from_ref(&one), &[]);

        let published = Arc::new(Mutex::new(None));
        let slot = published.clone();
        sync.checked_items_changed
            .connect(move |items| *slot.lock() = Some(items.len()));

        assert!(sync.reset(None));
        assert_eq!(*published.lock(), Some(0));
    }
}
