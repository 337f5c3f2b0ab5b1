//! Control state for the multi-select combo box.
//!
//! - [`SelectionSynchronizer`]: the selection bookkeeping shared by any host
//! - [`MultiSelectComboBox`]: the control a host toolkit drives and renders

mod combo_box;
mod synchronizer;

pub use combo_box::MultiSelectComboBox;
pub use synchronizer::SelectionSynchronizer;
