//! MultiSelectComboBox control state.
//!
//! The MultiSelectComboBox provides dropdown multi-selection with:
//! - A popup list of checkable items from an [`ItemsSource`]
//! - A compact strip showing the checked items, sorted by id
//! - Two-way binding of the checked items
//! - Chip removal directly from the strip
//!
//! Rendering is left to the host toolkit. The host forwards user
//! interaction here and re-renders from the signals.
//!
//! # Example
//!
//! ```
//! use horizon_multiselect::{ItemsSource, MultiSelectComboBox, SelectableItem};
//!
//! let source = ItemsSource::new(vec![
//!     SelectableItem::shared(0, "Tom", false),
//!     SelectableItem::shared(1, "John Doe", false),
//!     SelectableItem::shared(4, "Zhao Qi", true),
//! ]).unwrap();
//!
//! let mut combo = MultiSelectComboBox::new().with_items_source(source);
//! assert_eq!(combo.display_text(), "Zhao Qi");
//!
//! combo.checked_items_changed.connect(|items| {
//!     println!("{} item(s) checked", items.len());
//! });
//!
//! combo.toggle_item(0);
//! assert_eq!(combo.display_text(), "Tom, Zhao Qi");
//!
//! combo.remove_from_strip(4);
//! assert_eq!(combo.checked_ids(), vec![0]);
//! ```

use std::collections::{HashSet, VecDeque};

use horizon_multiselect_core::logging::{span_names, targets};
use horizon_multiselect_core::{PerfSpan, Property, Signal};

use crate::config::MultiSelectConfig;
use crate::model::{
    CheckedItems, ItemId, ItemRef, ItemsSource, PopupSelection, SelectionChange, SelectionFlags,
};
use crate::widget::SelectionSynchronizer;

// ============================================================================
// Selection Events
// ============================================================================

/// A pending selection notification from one of the two sub-lists.
#[derive(Debug)]
enum SelectionEvent {
    /// The popup selection changed.
    Popup(SelectionChange),
    /// Items were removed from the strip.
    Strip(Vec<ItemRef>),
}

// ============================================================================
// MultiSelectComboBox
// ============================================================================

/// A dropdown that allows checking multiple items.
///
/// # Signals
///
/// - `checked_items_changed(Vec<ItemRef>)`: Emitted once per interaction that
///   changed the strip, with the checked items ascending by id
/// - `items_source_changed(usize)`: Emitted when the items source is replaced,
///   with the new item count
/// - `popup_visibility_changed(bool)`: Emitted when the popup opens or closes
pub struct MultiSelectComboBox {
    /// The candidate items shown in the popup.
    items_source: Option<ItemsSource>,

    /// Keeps popup selection, strip and item flags consistent.
    synchronizer: SelectionSynchronizer,

    /// Presentation settings.
    config: MultiSelectConfig,

    /// Whether the popup is currently visible.
    popup_visible: Property<bool>,

    /// Selection events waiting to be processed.
    pending: VecDeque<SelectionEvent>,

    // Signals
    /// Signal emitted when the checked items change.
    pub checked_items_changed: Signal<Vec<ItemRef>>,
    /// Signal emitted when the items source is replaced.
    pub items_source_changed: Signal<usize>,
    /// Signal emitted when the popup visibility changes.
    pub popup_visibility_changed: Signal<bool>,
}

impl MultiSelectComboBox {
    /// Create a combo box with no items and default settings.
    pub fn new() -> Self {
        Self {
            items_source: None,
            synchronizer: SelectionSynchronizer::new(),
            config: MultiSelectConfig::default(),
            popup_visible: Property::new(false),
            pending: VecDeque::new(),
            checked_items_changed: Signal::new(),
            items_source_changed: Signal::new(),
            popup_visibility_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Items Source
    // =========================================================================

    /// The current items source.
    pub fn items_source(&self) -> Option<&ItemsSource> {
        self.items_source.as_ref()
    }

    /// Replace the items source.
    ///
    /// The selection is rebuilt from the new items' persisted flags.
    ///
    /// Items of the previous source keep their flags even though they leave
    /// the strip. "Checked exactly when in the strip and selected in the
    /// popup" holds only for items of the current source.
    pub fn set_items_source(&mut self, source: Option<ItemsSource>) {
        self.pending.clear();
        self.items_source = source;

        let changed = self.synchronizer.reset(self.items_source.as_ref());
        let count = self.count();
        tracing::debug!(target: targets::COMBO_BOX, count, "items source replaced");

        if count == 0 {
            self.hide_popup();
        }
        self.items_source_changed.emit(count);
        if changed {
            self.checked_items_changed.emit(self.checked_items().to_vec());
        }
    }

    /// Set the items source using builder pattern.
    pub fn with_items_source(mut self, source: ItemsSource) -> Self {
        self.set_items_source(Some(source));
        self
    }

    /// Get the number of candidate items.
    pub fn count(&self) -> usize {
        self.items_source.as_ref().map_or(0, ItemsSource::len)
    }

    /// Find a candidate item by id.
    pub fn find_item(&self, id: ItemId) -> Option<&ItemRef> {
        self.items_source.as_ref()?.find(id)
    }

    // =========================================================================
    // Checked Items
    // =========================================================================

    /// The checked items, ascending by id.
    pub fn checked_items(&self) -> &[ItemRef] {
        self.synchronizer.checked_items().items()
    }

    /// The ids of the checked items, ascending.
    pub fn checked_ids(&self) -> Vec<ItemId> {
        self.synchronizer.checked_items().ids()
    }

    /// The strip's list model, for row-level change signals.
    pub fn checked_list(&self) -> &CheckedItems {
        self.synchronizer.checked_items()
    }

    /// The popup list's selection.
    pub fn popup_selection(&self) -> &PopupSelection {
        self.synchronizer.popup()
    }

    /// Check exactly the items with the given ids.
    ///
    /// The difference from the current selection goes through the same path
    /// as a popup interaction. Ids not in the items source are ignored.
    pub fn set_checked_items<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        let wanted: HashSet<ItemId> = ids.into_iter().collect();
        let Some(source) = self.items_source.as_ref() else {
            if !wanted.is_empty() {
                tracing::warn!(
                    target: targets::COMBO_BOX,
                    count = wanted.len(),
                    "checked items set without an items source"
                );
            }
            return;
        };

        for id in &wanted {
            if source.find(*id).is_none() {
                tracing::warn!(target: targets::COMBO_BOX, id, "ignoring unknown item id");
            }
        }

        let popup = self.synchronizer.popup_mut();
        let mut change = SelectionChange::default();

        let deselect: Vec<ItemId> = popup
            .selected_items()
            .iter()
            .map(|item| item.id())
            .filter(|id| !wanted.contains(id))
            .collect();
        for id in deselect {
            change.extend(popup.deselect_id(id));
        }

        let select: Vec<ItemRef> = source
            .iter()
            .filter(|item| wanted.contains(&item.id()))
            .cloned()
            .collect();
        change.extend(popup.select_items(select));

        self.dispatch(SelectionEvent::Popup(change));
    }

    /// Set the checked items using builder pattern.
    pub fn with_checked_items<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.set_checked_items(ids);
        self
    }

    // =========================================================================
    // User Interaction
    // =========================================================================

    /// Toggle an item's checkbox in the popup.
    ///
    /// Returns `false` if no item has the given id.
    pub fn toggle_item(&mut self, id: ItemId) -> bool {
        let Some(item) = self.find_item(id).cloned() else {
            return false;
        };

        let change = self
            .synchronizer
            .popup_mut()
            .select(item, SelectionFlags::TOGGLE);
        self.dispatch(SelectionEvent::Popup(change));
        true
    }

    /// Remove an item's chip from the strip.
    ///
    /// Returns `false` if the item is not in the strip.
    pub fn remove_from_strip(&mut self, id: ItemId) -> bool {
        let checked = self.synchronizer.checked_items();
        let Some(item) = checked.position(id).map(|row| checked.items()[row].clone()) else {
            return false;
        };

        self.dispatch(SelectionEvent::Strip(vec![item]));
        true
    }

    /// Uncheck every item.
    pub fn clear_checked(&mut self) {
        let change = self.synchronizer.popup_mut().clear_selection();
        self.dispatch(SelectionEvent::Popup(change));
    }

    // =========================================================================
    // Host Hooks
    // =========================================================================

    /// Notify the control that the host's native popup selection changed.
    ///
    /// The internal popup selection is brought in line with the change before
    /// it is applied to the strip and the item flags.
    pub fn handle_popup_selection_changed(&mut self, change: SelectionChange) {
        let popup = self.synchronizer.popup_mut();
        popup.select_items(change.added.iter().cloned());
        for item in &change.removed {
            popup.deselect_id(item.id());
        }

        self.dispatch(SelectionEvent::Popup(change));
    }

    /// Notify the control that items were deselected in the host's strip.
    pub fn handle_strip_selection_changed(&mut self, removed: Vec<ItemRef>) {
        self.dispatch(SelectionEvent::Strip(removed));
    }

    /// Queue an event and process the queue until it is empty.
    ///
    /// A strip event only deselects popup items; the popup change it raises
    /// is queued behind it, so the strip and the flags are updated exactly
    /// once per removal.
    fn dispatch(&mut self, event: SelectionEvent) {
        self.pending.push_back(event);
        let _span = PerfSpan::new(span_names::DISPATCH);

        let mut changed = false;
        while let Some(event) = self.pending.pop_front() {
            match event {
                SelectionEvent::Popup(change) => {
                    if change.is_empty() {
                        continue;
                    }
                    changed |= self
                        .synchronizer
                        .on_source_selection_changed(&change.added, &change.removed);
                }
                SelectionEvent::Strip(removed) => {
                    let change = self.synchronizer.on_display_selection_changed(&removed);
                    if !change.is_empty() {
                        self.pending.push_back(SelectionEvent::Popup(change));
                    }
                }
            }
        }

        if changed {
            tracing::debug!(
                target: targets::COMBO_BOX,
                checked = self.checked_items().len(),
                "checked items changed"
            );
            self.checked_items_changed.emit(self.checked_items().to_vec());
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The presentation settings.
    pub fn config(&self) -> &MultiSelectConfig {
        &self.config
    }

    /// Replace the presentation settings.
    pub fn set_config(&mut self, config: MultiSelectConfig) {
        self.config = config;
    }

    /// Set the presentation settings using builder pattern.
    pub fn with_config(mut self, config: MultiSelectConfig) -> Self {
        self.set_config(config);
        self
    }

    /// The strip text shown when nothing is checked.
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.config.placeholder = text.into();
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Render the strip as text.
    ///
    /// Labels are joined with the configured separator. If more items are
    /// checked than `max_strip_items`, the rest are summarized as `+N`.
    pub fn display_text(&self) -> String {
        let items = self.checked_items();
        if items.is_empty() {
            return self.config.placeholder.clone();
        }

        let limit = self.config.max_strip_items.unwrap_or(items.len());
        let mut parts: Vec<String> = items
            .iter()
            .take(limit)
            .map(|item| item.label().to_string())
            .collect();

        let hidden = items.len().saturating_sub(limit);
        if hidden > 0 {
            parts.push(format!("+{hidden}"));
        }
        parts.join(&self.config.separator)
    }

    // =========================================================================
    // Popup Control
    // =========================================================================

    /// Whether the popup is visible.
    pub fn is_popup_visible(&self) -> bool {
        self.popup_visible.get()
    }

    /// Number of popup rows visible without scrolling.
    pub fn visible_rows(&self) -> usize {
        self.count().min(self.config.max_visible_items.max(1))
    }

    /// Show the dropdown popup. Does nothing when there are no items.
    pub fn show_popup(&mut self) {
        if self.count() == 0 {
            return;
        }
        if self.popup_visible.set(true) {
            self.popup_visibility_changed.emit(true);
        }
    }

    /// Hide the dropdown popup.
    pub fn hide_popup(&mut self) {
        if self.popup_visible.set(false) {
            self.popup_visibility_changed.emit(false);
        }
    }

    /// Toggle the popup visibility.
    pub fn toggle_popup(&mut self) {
        if self.is_popup_visible() {
            self.hide_popup();
        } else {
            self.show_popup();
        }
    }
}

impl Default for MultiSelectComboBox {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
