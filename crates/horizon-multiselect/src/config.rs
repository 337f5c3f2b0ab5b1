//! Presentation settings for the multi-select combo box.
//!
//! ```
//! use horizon_multiselect::MultiSelectConfig;
//!
//! let config = MultiSelectConfig::from_toml_str(r#"
//! placeholder = "Pick people..."
//! max_strip_items = 3
//! "#).unwrap();
//!
//! assert_eq!(config.separator, ", ");
//! assert_eq!(config.max_strip_items, Some(3));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MultiSelectError, Result};

/// Default number of rows shown in the popup before it scrolls.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 10;

/// Display settings for a [`MultiSelectComboBox`](crate::MultiSelectComboBox).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSelectConfig {
    /// Text shown in the strip when nothing is checked.
    pub placeholder: String,
    /// Separator placed between labels in the strip text.
    pub separator: String,
    /// Maximum rows visible in the popup at once.
    pub max_visible_items: usize,
    /// Maximum labels shown in the strip; the rest collapse into `+N`.
    pub max_strip_items: Option<usize>,
}

impl Default for MultiSelectConfig {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            separator: ", ".to_string(),
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            max_strip_items: None,
        }
    }
}

impl MultiSelectConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the strip separator using builder pattern.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the popup row limit using builder pattern. Clamped to at least 1.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    /// Set the strip label limit using builder pattern.
    pub fn with_max_strip_items(mut self, count: Option<usize>) -> Self {
        self.max_strip_items = count;
        self
    }

    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        Ok(config.normalized())
    }

    /// Load a configuration from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = || std::fs::read_to_string(path).map_err(|err| MultiSelectError::io(path, err));

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text()?),
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                let config: Self = serde_json::from_str(&text()?)?;
                Ok(config.normalized())
            }
            _ => Err(MultiSelectError::unsupported_format(path)),
        }
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    fn normalized(mut self) -> Self {
        self.max_visible_items = self.max_visible_items.max(1);
        self
    }
}
