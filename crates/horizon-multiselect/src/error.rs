//! Error types for Horizon Multiselect.
//!
//! Only the data boundary can fail: building an items source from records,
//! or loading items and configuration from disk. Selection bookkeeping itself
//! is infallible, and looking up an item that is not present is a no-op.

use std::path::PathBuf;

use crate::model::ItemId;

/// Result type alias for multiselect operations.
pub type Result<T> = std::result::Result<T, MultiSelectError>;

/// Errors that can occur at the multiselect data boundary.
#[derive(Debug, thiserror::Error)]
pub enum MultiSelectError {
    /// Two items in one source share an identifier.
    #[error("Duplicate item id {id} in items source")]
    DuplicateItemId { id: ItemId },

    /// The file extension does not name a supported format.
    #[error("Unsupported file format for '{path}' (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MultiSelectError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported-format error.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_message() {
        let err = MultiSelectError::DuplicateItemId { id: 3 };
        assert_eq!(err.to_string(), "Duplicate item id 3 in items source");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = MultiSelectError::io(
            "people.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("people.toml"));
        assert!(err.source().is_some());
    }
}
