//! Logging facilities for Horizon Multiselect.
//!
//! Horizon Multiselect uses the `tracing` crate for instrumentation. Every
//! event is tagged with one of the [`targets`] below so applications can
//! filter by subsystem. To see logs, install a subscriber:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_multiselect::sync=trace"))
//!     .init();
//! ```

/// Span names used throughout Horizon Multiselect for tracing.
pub mod span_names {
    /// Initializing the selection from persisted flags.
    pub const INITIALIZE: &str = "horizon_multiselect::initialize";
    /// Rebuilding the selection after the items source was replaced.
    pub const RESET: &str = "horizon_multiselect::reset";
    /// Draining the control's selection event queue.
    pub const DISPATCH: &str = "horizon_multiselect::dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_multiselect_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_multiselect_core::signal";
    /// Performance span target.
    pub const PERF: &str = "horizon_multiselect::perf";
    /// Selection synchronization target.
    pub const SYNC: &str = "horizon_multiselect::sync";
    /// Popup selection model target.
    pub const SELECTION: &str = "horizon_multiselect::selection";
    /// Items source loading target.
    pub const SOURCE: &str = "horizon_multiselect::source";
    /// Combo box control target.
    pub const COMBO_BOX: &str = "horizon_multiselect::combo_box";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_multiselect::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
