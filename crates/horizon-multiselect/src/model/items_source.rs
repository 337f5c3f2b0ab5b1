//! The ordered candidate list shown in the popup.
//!
//! [`ItemsSource`] owns the shared item records the control works with. Items
//! are usually populated from an external data source; JSON and TOML files
//! are supported directly:
//!
//! ```toml
//! [[items]]
//! id = 0
//! label = "Tom"
//!
//! [[items]]
//! id = 4
//! label = "Zhao Qi"
//! checked = true
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use horizon_multiselect_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::item::{ItemId, ItemRecord, ItemRef, SelectableItem};
use crate::error::{MultiSelectError, Result};

/// On-disk shape of an items file: a top-level `items` array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemsDocument {
    #[serde(default)]
    items: Vec<ItemRecord>,
}

/// An ordered collection of items with unique identifiers.
///
/// Cloning an `ItemsSource` is cheap and shares the item records.
#[derive(Debug, Clone, Default)]
pub struct ItemsSource {
    items: Vec<ItemRef>,
}

impl ItemsSource {
    /// Create an empty source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a source from shared items.
    ///
    /// Fails with [`MultiSelectError::DuplicateItemId`] if two items share an id.
    pub fn new(items: Vec<ItemRef>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(MultiSelectError::DuplicateItemId { id: item.id() });
            }
        }
        Ok(Self { items })
    }

    /// Create a source from serializable records.
    pub fn from_records(records: impl IntoIterator<Item = ItemRecord>) -> Result<Self> {
        Self::new(
            records
                .into_iter()
                .map(|record| Arc::new(SelectableItem::from(record)))
                .collect(),
        )
    }

    /// Parse a JSON array of records, or an object with an `items` array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let records: Vec<ItemRecord> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value::<ItemsDocument>(value)?.items
        };
        Self::from_records(records)
    }

    /// Parse a TOML document with an `[[items]]` array of tables.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let document: ItemsDocument = toml::from_str(toml_str)?;
        Self::from_records(document.items)
    }

    /// Load a source from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let source = match extension.as_deref() {
            Some("json") => {
                let text = std::fs::read_to_string(path)
                    .map_err(|err| MultiSelectError::io(path, err))?;
                Self::from_json_str(&text)?
            }
            Some("toml") => {
                let text = std::fs::read_to_string(path)
                    .map_err(|err| MultiSelectError::io(path, err))?;
                Self::from_toml_str(&text)?
            }
            _ => return Err(MultiSelectError::unsupported_format(path)),
        };

        tracing::debug!(
            target: targets::SOURCE,
            path = %path.display(),
            count = source.len(),
            "loaded items source"
        );
        Ok(source)
    }

    /// Snapshot all items, including their current checked flags.
    pub fn to_records(&self) -> Vec<ItemRecord> {
        self.items.iter().map(|item| item.to_record()).collect()
    }

    /// Serialize the items as a pretty-printed JSON array.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }

    /// Serialize the items as a TOML `[[items]]` document.
    pub fn to_toml_string(&self) -> Result<String> {
        let document = ItemsDocument {
            items: self.to_records(),
        };
        Ok(toml::to_string(&document)?)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in source order.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Iterate over the items in source order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }

    /// The item at a row, if any.
    pub fn get(&self, index: usize) -> Option<&ItemRef> {
        self.items.get(index)
    }

    /// Find an item by identifier.
    pub fn find(&self, id: ItemId) -> Option<&ItemRef> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items whose checked flag is set, in source order.
    pub fn checked_items(&self) -> Vec<ItemRef> {
        self.items
            .iter()
            .filter(|item| item.is_checked())
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a ItemsSource {
    type Item = &'a ItemRef;
    type IntoIter = std::slice::Iter<'a, ItemRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PEOPLE_TOML: &str = r#"
        [[items]]
        id = 0
        label = "Tom"

        [[items]]
        id = 1
        label = "John Doe"

        [[items]]
        id = 4
        view_name = "Zhao Qi"
        is_check = true
    "#;

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = ItemsSource::new(vec![
            SelectableItem::shared(1, "a", false),
            SelectableItem::shared(2, "b", false),
            SelectableItem::shared(1, "c", false),
        ])
        .unwrap_err();

        assert!(matches!(err, MultiSelectError::DuplicateItemId { id: 1 }));
    }

    #[test]
    fn test_from_toml() {
        let source = ItemsSource::from_toml_str(PEOPLE_TOML).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.find(4).map(|item| item.label()), Some("Zhao Qi"));

        let checked: Vec<_> = source.checked_items().iter().map(|item| item.id()).collect();
        assert_eq!(checked, vec![4]);
    }

    #[test]
    fn test_from_json_array_and_document() {
        let array = ItemsSource::from_json_str(
            r#"[{"id": 2, "label": "Harry"}, {"id": 3, "label": "Ma Six", "checked": true}]"#,
        )
        .unwrap();
        assert_eq!(array.len(), 2);
        assert!(array.find(3).unwrap().is_checked());

        let document =
            ItemsSource::from_json_str(r#"{"items": [{"id": 2, "label": "Harry"}]}"#).unwrap();
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ItemsSource::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, MultiSelectError::Json(_)));
    }

    #[test]
    fn test_persisted_flags_written_back() {
        let source = ItemsSource::from_toml_str(PEOPLE_TOML).unwrap();
        source.find(0).unwrap().set_checked(true);

        let reloaded = ItemsSource::from_toml_str(&source.to_toml_string().unwrap()).unwrap();
        let checked: Vec<_> = reloaded.checked_items().iter().map(|item| item.id()).collect();
        assert_eq!(checked, vec![0, 4]);

        let json = source.to_json_string().unwrap();
        let reloaded = ItemsSource::from_json_str(&json).unwrap();
        assert_eq!(reloaded.to_records(), source.to_records());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(PEOPLE_TOML.as_bytes()).unwrap();

        let source = ItemsSource::load(file.path()).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ItemsSource::load(file.path()).unwrap_err();
        assert!(matches!(err, MultiSelectError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ItemsSource::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, MultiSelectError::Io { .. }));
    }

    #[test]
    fn test_clone_shares_records() {
        let source = ItemsSource::from_toml_str(PEOPLE_TOML).unwrap();
        let copy = source.clone();
        copy.find(1).unwrap().set_checked(true);
        assert!(source.find(1).unwrap().is_checked());
    }
}
