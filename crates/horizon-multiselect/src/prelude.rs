//! Prelude module for Horizon Multiselect.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_multiselect::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::{Property, ReadOnlyProperty};
pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Item Model
// ============================================================================

pub use crate::model::{ItemId, ItemRecord, ItemRef, ItemsSource, SelectableItem};
pub use crate::model::{CheckedItems, PopupSelection, SelectionChange, SelectionFlags};

// ============================================================================
// Control
// ============================================================================

pub use crate::config::MultiSelectConfig;
pub use crate::error::MultiSelectError;
pub use crate::widget::{MultiSelectComboBox, SelectionSynchronizer};
