//! Debug views of a combo box's selection state.
//!
//! [`SelectionDebug`] lists every candidate item with its checked flag and
//! popup selection, followed by the strip:
//!
//! ```text
//! Items (5 total, 1 checked):
//! ├── ☐ Tom [0]
//! ├── ☐ John Doe [1]
//! ├── ☐ Harry [2]
//! ├── ☐ Ma Six [3]
//! └── ☑ Zhao Qi [4] (selected)
//! Strip: Zhao Qi [4]
//! ```
//!
//! An item whose flag and popup state disagree is easy to spot: it shows a
//! check mark without `(selected)`, or the reverse.

use std::fmt;

use crate::model::SelectableItem;
use crate::widget::MultiSelectComboBox;

/// Style options for selection debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugStyle {
    /// ASCII characters for list branches and check marks.
    Ascii,
    /// Unicode box-drawing characters and ballot boxes.
    #[default]
    Unicode,
    /// Single-line summary of the checked items.
    Compact,
}

/// Configuration for selection debug output.
#[derive(Debug, Clone)]
pub struct DebugFormatOptions {
    /// The style of the output.
    pub style: DebugStyle,
    /// Whether to show item ids.
    pub show_ids: bool,
    /// Whether to show item labels.
    pub show_labels: bool,
}

impl Default for DebugFormatOptions {
    fn default() -> Self {
        Self {
            style: DebugStyle::default(),
            show_ids: true,
            show_labels: true,
        }
    }
}

impl DebugFormatOptions {
    /// Create options for id-only output.
    pub fn ids_only() -> Self {
        Self {
            show_labels: false,
            ..Default::default()
        }
    }

    /// Create options for ASCII-only output.
    pub fn ascii() -> Self {
        Self {
            style: DebugStyle::Ascii,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing a combo box's selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionDebug {
    options: DebugFormatOptions,
}

impl SelectionDebug {
    /// Create a debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: DebugFormatOptions) -> Self {
        Self { options }
    }

    /// Format the selection state of a combo box.
    pub fn format(&self, combo: &MultiSelectComboBox) -> String {
        self.display(combo).to_string()
    }

    /// A [`fmt::Display`] view of the selection state of a combo box.
    pub fn display<'a>(&'a self, combo: &'a MultiSelectComboBox) -> impl fmt::Display + 'a {
        SelectionView {
            options: &self.options,
            combo,
        }
    }
}

struct SelectionView<'a> {
    options: &'a DebugFormatOptions,
    combo: &'a MultiSelectComboBox,
}

impl SelectionView<'_> {
    fn item_name(&self, item: &SelectableItem) -> String {
        match (self.options.show_labels, self.options.show_ids) {
            (true, true) => format!("{} [{}]", item.label(), item.id()),
            (true, false) => item.label().to_string(),
            _ => item.id().to_string(),
        }
    }

    fn strip_text(&self) -> String {
        let checked = self.combo.checked_items();
        if checked.is_empty() {
            return "(empty)".to_string();
        }
        checked
            .iter()
            .map(|item| self.item_name(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn fmt_list(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (corner, last, checked_mark, unchecked_mark) = match self.options.style {
            DebugStyle::Unicode => (
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
                "\u{2611}",
                "\u{2610}",
            ),
            _ => ("+--", "`--", "[x]", "[ ]"),
        };

        let items = self.combo.items_source().map(|source| source.items()).unwrap_or(&[]);
        let checked = items.iter().filter(|item| item.is_checked()).count();
        writeln!(f, "Items ({} total, {} checked):", items.len(), checked)?;

        if items.is_empty() {
            writeln!(f, "  (empty)")?;
        }
        for (idx, item) in items.iter().enumerate() {
            let branch = if idx + 1 == items.len() { last } else { corner };
            let mark = if item.is_checked() { checked_mark } else { unchecked_mark };
            write!(f, "{branch} {mark} {}", self.item_name(item))?;
            if self.combo.popup_selection().is_selected(item.id()) {
                write!(f, " (selected)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Strip: {}", self.strip_text())
    }
}

impl fmt::Display for SelectionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.options.style {
            DebugStyle::Compact => write!(
                f,
                "checked {}/{}: {}",
                self.combo.checked_items().len(),
                self.combo.count(),
                self.strip_text()
            ),
            DebugStyle::Ascii | DebugStyle::Unicode => self.fmt_list(f),
        }
    }
}
