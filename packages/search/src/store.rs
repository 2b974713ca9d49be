//! Pass record stores.
//!
//! The search engine treats persistence as a key-value store of raw pass
//! records queried by attribute. Records are returned as raw JSON values;
//! `pass_finder_pass` validates their shape when it builds a pass.

use std::path::{Path, PathBuf};

use pass_finder_search_models::RecordField;
use serde_json::Value;

/// Name of the table TinyDB writes records into.
const TINYDB_DEFAULT_TABLE: &str = "_default";

/// Errors from loading or querying a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the store file failed.
    #[error("Failed to read record store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store is valid JSON but not a list or table of records.
    #[error("Unsupported record store layout: {message}")]
    Layout {
        /// Description of what was found.
        message: String,
    },
}

/// A store of raw pass records.
///
/// Implementations must be `Send + Sync` so a search engine holding one
/// can be shared between threads.
pub trait RecordStore: Send + Sync {
    /// Every record, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn all(&self) -> Result<Vec<Value>, StoreError>;

    /// Records whose `field` is a string equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn find_eq(&self, field: RecordField, value: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| string_field(record, field) == Some(value))
            .collect())
    }

    /// Records whose `field` is a string equal to `value` ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn find_eq_ignore_case(
        &self,
        field: RecordField,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let value = value.to_lowercase();
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| string_field(record, field).is_some_and(|s| s.to_lowercase() == value))
            .collect())
    }

    /// Records whose numeric `field` lies strictly between `low` and
    /// `high`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn find_between(
        &self,
        field: RecordField,
        low: f64,
        high: f64,
    ) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| {
                record
                    .get(field.as_ref())
                    .and_then(Value::as_f64)
                    .is_some_and(|v| low < v && v < high)
            })
            .collect())
    }

    /// Primary names followed by non-blank alternative names, in store
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn name_corpus(&self) -> Result<Vec<String>, StoreError> {
        let records = self.all()?;
        let names = records
            .iter()
            .filter_map(|r| string_field(r, RecordField::Name));
        let alts = records
            .iter()
            .filter_map(|r| string_field(r, RecordField::Alt))
            .filter(|alt| !alt.trim().is_empty());
        Ok(names.chain(alts).map(str::to_string).collect())
    }
}

fn string_field(record: &Value, field: RecordField) -> Option<&str> {
    record.get(field.as_ref()).and_then(Value::as_str)
}

/// An in-memory store loaded from a JSON document.
///
/// The document is either a list of records or a TinyDB database, whose
/// `_default` table maps document ids to records. TinyDB records are kept
/// in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordStore {
    records: Vec<Value>,
}

impl JsonRecordStore {
    #[must_use]
    pub const fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Parses a store document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `json` is not valid JSON or has neither
    /// supported layout.
    pub fn parse(json: &str) -> Result<Self, StoreError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Loads a store document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&json)?;
        log::info!("Loaded {} pass records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Builds a store from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Layout`] if `document` has neither supported
    /// layout.
    pub fn from_value(document: Value) -> Result<Self, StoreError> {
        match document {
            Value::Array(records) => Ok(Self::new(records)),
            Value::Object(mut tables) => {
                let Some(Value::Object(table)) = tables.remove(TINYDB_DEFAULT_TABLE) else {
                    return Err(StoreError::Layout {
                        message: format!("object without a '{TINYDB_DEFAULT_TABLE}' table"),
                    });
                };
                let mut entries: Vec<(String, Value)> = table.into_iter().collect();
                entries.sort_by_key(|(id, _)| id.parse::<u64>().unwrap_or(u64::MAX));
                Ok(Self::new(entries.into_iter().map(|(_, r)| r).collect()))
            }
            other => Err(StoreError::Layout {
                message: format!("expected a list or table, found {other}"),
            }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for JsonRecordStore {
    fn all(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store() -> JsonRecordStore {
        JsonRecordStore::new(vec![
            json!({ "name": "Stilfser Joch", "alt": "Passo dello Stelvio", "region": "Lombardei", "height": 2757 }),
            json!({ "name": "Passo di Gavia", "alt": null, "region": "Lombardei", "height": 2621 }),
            json!({ "name": "Grossglockner", "alt": "", "region": "Salzburg", "height": 2504.0 }),
        ])
    }

    fn names(records: &[Value]) -> Vec<&str> {
        records.iter().filter_map(|r| r["name"].as_str()).collect()
    }

    #[test]
    fn finds_exact_string_matches() {
        let store = store();
        let hits = store.find_eq(RecordField::Alt, "Passo dello Stelvio").unwrap();
        assert_eq!(names(&hits), vec!["Stilfser Joch"]);
        assert!(store.find_eq(RecordField::Name, "stilfser joch").unwrap().is_empty());
    }

    #[test]
    fn finds_case_insensitive_matches() {
        let hits = store()
            .find_eq_ignore_case(RecordField::Region, "LOMBARDEI")
            .unwrap();
        assert_eq!(names(&hits), vec!["Stilfser Joch", "Passo di Gavia"]);
    }

    #[test]
    fn between_is_exclusive() {
        let store = store();
        let hits = store.find_between(RecordField::Height, 2504.0, 2757.0).unwrap();
        assert_eq!(names(&hits), vec!["Passo di Gavia"]);
        let hits = store.find_between(RecordField::Height, 2500.0, 2800.0).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn corpus_lists_names_then_alternatives() {
        assert_eq!(
            store().name_corpus().unwrap(),
            vec!["Stilfser Joch", "Passo di Gavia", "Grossglockner", "Passo dello Stelvio"]
        );
    }

    #[test]
    fn parses_tinydb_documents_in_id_order() {
        let store = JsonRecordStore::parse(
            r#"{"_default": {
                "10": {"name": "C"},
                "2": {"name": "B"},
                "1": {"name": "A"}
            }}"#,
        )
        .unwrap();
        assert_eq!(names(&store.all().unwrap()), vec!["A", "B", "C"]);
    }

    #[test]
    fn parses_record_lists() {
        let store = JsonRecordStore::parse(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rejects_unknown_layouts() {
        assert!(matches!(
            JsonRecordStore::parse(r#"{"passes": []}"#),
            Err(StoreError::Layout { .. })
        ));
        assert!(matches!(
            JsonRecordStore::parse("42"),
            Err(StoreError::Layout { .. })
        ));
        assert!(matches!(
            JsonRecordStore::parse("[{"),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonRecordStore::from_path("/nonexistent/passes.json").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/passes.json"));
    }
}
