//! Core systems for Horizon Multiselect.
//!
//! This crate provides the observer plumbing shared by the multi-select
//! controls:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Logging**: Tracing targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_multiselect_core::Signal;
//!
//! let rows_inserted = Signal::<usize>::new();
//!
//! let conn_id = rows_inserted.connect(|row| {
//!     println!("Row inserted at: {}", row);
//! });
//!
//! rows_inserted.emit(3);
//! rows_inserted.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use horizon_multiselect_core::{Property, Signal};
//!
//! struct Flag {
//!     checked: Property<bool>,
//!     checked_changed: Signal<bool>,
//! }
//!
//! impl Flag {
//!     fn set_checked(&self, checked: bool) {
//!         if self.checked.set(checked) {
//!             self.checked_changed.emit(checked);
//!         }
//!     }
//! }
//!
//! let flag = Flag { checked: Property::new(false), checked_changed: Signal::new() };
//! flag.set_checked(true);
//! assert!(flag.checked.get());
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal, SignalBlocker};
