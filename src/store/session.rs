use crate::error::StoreError;
use crate::models::DocumentationRecord;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_FILENAME: &str = "api_documentation.json";

/// Records generated during one session, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    records: Vec<DocumentationRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: DocumentationRecord) {
        self.records.push(record);
        tracing::debug!(total = self.records.len(), "Appended documentation record");
    }

    pub fn list(&self) -> &[DocumentationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Pretty-printed JSON array of every record.
    pub fn serialize(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.records).map_err(StoreError::Serialize)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = self.serialize()?;
        std::fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), records = self.records.len(), "Saved documentation");
        Ok(())
    }

    /// Replaces the collection with the records in `path`.
    ///
    /// On any failure the current records are left untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
            _ => StoreError::Io {
                path: path.display().to_string(),
                source,
            },
        })?;

        let count = self.replace_from_json(&contents)?;
        tracing::info!(path = %path.display(), records = count, "Loaded documentation");
        Ok(count)
    }

    /// In-memory half of [`SessionStore::load_from_file`].
    pub fn replace_from_json(&mut self, json: &str) -> Result<usize, StoreError> {
        let records: Vec<DocumentationRecord> =
            serde_json::from_str(json).map_err(StoreError::Parse)?;
        self.records = records;
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, Parameters};
    use serde_json::{Map, Value, json};

    fn record(name: &str, parameters: Parameters) -> DocumentationRecord {
        DocumentationRecord {
            api_name: name.to_string(),
            method: HttpMethod::Post,
            endpoint: format!("/api/v1/{}", name.to_lowercase()),
            description: "does things".to_string(),
            parameters,
            generated_doc: format!("# {}\n\nGenerated docs.", name),
            timestamp: "2024-05-01T10:15:30.123456".to_string(),
        }
    }

    fn populated() -> SessionStore {
        let mut params = Map::new();
        params.insert("number1".into(), json!("integer"));

        let mut store = SessionStore::new();
        store.append(record("Sum", Parameters::Structured(params)));
        store.append(record("Login", Parameters::Freeform("user, pass".into())));
        store.append(record("Health", Parameters::Absent));
        store
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = populated();
        let names: Vec<_> = store.list().iter().map(|r| r.api_name.as_str()).collect();

        assert_eq!(names, vec!["Sum", "Login", "Health"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn append_does_not_deduplicate() {
        let mut store = SessionStore::new();
        store.append(record("Sum", Parameters::Absent));
        store.append(record("Sum", Parameters::Absent));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn serialize_is_stable_without_appends() {
        let store = populated();
        let first: Value = serde_json::from_str(&store.serialize().unwrap()).unwrap();
        let second: Value = serde_json::from_str(&store.serialize().unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn serialize_uses_persisted_keys() {
        let store = populated();
        let value: Value = serde_json::from_str(&store.serialize().unwrap()).unwrap();
        let first = value[0].as_object().unwrap();

        for key in [
            "api_name",
            "method",
            "endpoint",
            "description",
            "parameters",
            "generated_doc",
            "timestamp",
        ] {
            assert!(first.contains_key(key), "missing key {}", key);
        }
        assert_eq!(value[0]["method"], json!("POST"));
        assert_eq!(value[2]["parameters"], Value::Null);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILENAME);
        let store = populated();
        store.save_to_file(&path).unwrap();

        let mut restored = SessionStore::new();
        let count = restored.load_from_file(&path).unwrap();

        assert_eq!(count, 3);
        assert_eq!(restored.list(), store.list());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, "stale contents that are much longer than needed").unwrap();

        let mut store = SessionStore::new();
        store.append(record("Sum", Parameters::Absent));
        store.save_to_file(&path).unwrap();

        let mut restored = SessionStore::new();
        assert_eq!(restored.load_from_file(&path).unwrap(), 1);
    }

    #[test]
    fn save_to_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("docs.json");

        let err = populated().save_to_file(&path).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn load_missing_file_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = populated();

        let err = store
            .load_from_file(dir.path().join("nope.json"))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_malformed_file_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not valid json").unwrap();
        let mut store = populated();

        let err = store.load_from_file(&path).unwrap_err();

        assert!(matches!(err, StoreError::Parse(_)));
        assert_eq!(store.list(), populated().list());
    }

    #[test]
    fn load_wrong_shape_keeps_existing_records() {
        let mut store = populated();

        let err = store
            .replace_from_json(r#"{"api_name": "not an array"}"#)
            .unwrap_err();

        assert!(matches!(err, StoreError::Parse(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_replaces_rather_than_appends() {
        let mut store = populated();

        let count = store
            .replace_from_json(
                r#"[{
                    "api_name": "Users",
                    "method": "GET",
                    "endpoint": "/api/v1/users",
                    "description": "",
                    "parameters": null,
                    "generated_doc": "docs",
                    "timestamp": "2025-02-03T04:05:06.789012"
                }]"#,
            )
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.list()[0].api_name, "Users");
        assert_eq!(store.list()[0].method, HttpMethod::Get);
    }

    #[test]
    fn load_accepts_offset_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utc.json");
        std::fs::write(
            &path,
            r#"[{
                "api_name": "Users",
                "method": "GET",
                "endpoint": "/api/v1/users",
                "description": "",
                "parameters": null,
                "generated_doc": "docs",
                "timestamp": "2024-05-01T10:15:30+00:00"
            }]"#,
        )
        .unwrap();
        let mut store = SessionStore::new();

        assert_eq!(store.load_from_file(&path).unwrap(), 1);
        assert_eq!(store.list()[0].timestamp, "2024-05-01T10:15:30+00:00");
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = populated();
        store.clear();

        assert!(store.is_empty());
    }
}
