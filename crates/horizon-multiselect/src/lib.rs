//! Horizon Multiselect - a multi-select combo box control.
//!
//! The control shows a popup list of checkable items and a compact strip of
//! the checked ones. Three views of the same selection are kept consistent:
//!
//! - the popup list's multi-selection ([`PopupSelection`])
//! - the strip's checked items, sorted by id with no duplicates ([`CheckedItems`])
//! - each item's own checked flag ([`SelectableItem::is_checked`])
//!
//! Rendering belongs to the host toolkit, which forwards user interaction to
//! [`MultiSelectComboBox`] and re-renders from its signals.
//!
//! # Example
//!
//! ```
//! use horizon_multiselect::prelude::*;
//!
//! fn main() -> Result<(), MultiSelectError> {
//!     let source = ItemsSource::from_toml_str(r#"
//!         [[items]]
//!         id = 0
//!         label = "Tom"
//!
//!         [[items]]
//!         id = 4
//!         label = "Zhao Qi"
//!         checked = true
//!     "#)?;
//!
//!     let mut combo = MultiSelectComboBox::new().with_items_source(source);
//!     combo.toggle_item(0);
//!     assert_eq!(combo.checked_ids(), vec![0, 4]);
//!     Ok(())
//! }
//! ```

pub use horizon_multiselect_core::*;

pub mod config;
pub mod debug;
pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use config::MultiSelectConfig;
pub use debug::{DebugFormatOptions, DebugStyle, SelectionDebug};
pub use error::{MultiSelectError, Result};
pub use model::{
    CheckedItems, ItemId, ItemRecord, ItemRef, ItemsSource, ListSignals, PopupSelection,
    SelectableItem, SelectionChange, SelectionFlags,
};
pub use widget::{MultiSelectComboBox, SelectionSynchronizer};
