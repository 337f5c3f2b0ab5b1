//! Data model for the multi-select combo box.
//!
//! Three views describe the same selection state:
//!
//! - `PopupSelection`: the popup list's multi-selection
//! - `CheckedItems`: the sorted, deduplicated list shown in the compact strip
//! - `SelectableItem::is_checked`: the flag carried by each item record
//!
//! All three share the same `ItemRef` records owned by an `ItemsSource`.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐ selection_changed ┌──────────────┐  rows_*   ┌─────────────┐
//! │PopupSelection│──────────────────>│ Synchronizer │──────────>│CheckedItems │
//! └──────────────┘                   └──────────────┘           └─────────────┘
//!        ^                                  │ set_checked
//!        │ deselect (strip removal)         v
//!        └──────────────────────────  SelectableItem
//! ```

mod checked_items;
mod item;
mod items_source;
pub mod selection;

pub use checked_items::{CheckedItems, ListSignals};
pub use item::{ItemId, ItemRecord, ItemRef, SelectableItem};
pub use items_source::ItemsSource;
pub use selection::{PopupSelection, SelectionChange, SelectionFlags};
