//! Store operations
//!
//! Each call opens the file, does one linear pass, and (for mutations that
//! change something) rewrites it. Nothing is cached between calls.

use std::path::{Path, PathBuf};

use super::errors::StoreResult;
use super::file::StoreFile;
use super::record::Record;
use crate::observability::Logger;

/// Result of a store operation that completed without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Bytes to hand back to the caller
    Payload(Vec<u8>),
    /// `add` found a record with the same id; nothing was written
    Conflict { id: String },
    /// No record with this id; nothing was written
    NotFound { id: String },
}

impl Outcome {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Payload(_) => "payload",
            Outcome::Conflict { .. } => "conflict",
            Outcome::NotFound { .. } => "not_found",
        }
    }
}

/// A record store backed by one JSON file
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Point a store at `path`. The file is not touched until an operation runs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Raw file content, undecoded. Creates the file if it is missing.
    pub fn list(&self) -> StoreResult<Vec<u8>> {
        let mut file = StoreFile::open(&self.path)?;
        file.read_raw()
    }

    /// Append `record` unless its id is already present.
    ///
    /// On success the payload is the full encoded store after the append.
    pub fn add(&self, record: Record) -> StoreResult<Outcome> {
        let mut file = StoreFile::open(&self.path)?;
        let mut records = file.load()?;

        if records.iter().any(|r| r.id == record.id) {
            Logger::warn(
                "RECORD_CONFLICT",
                &[("id", &record.id), ("path", &self.display_path())],
            );
            return Ok(Outcome::Conflict { id: record.id });
        }

        records.push(record);
        let content = file.flush(&records)?;
        Ok(Outcome::Payload(content))
    }

    /// Decode `item` and [`add`](Self::add) it.
    pub fn add_item(&self, item: &str) -> StoreResult<Outcome> {
        let record = Record::from_item(item)?;
        self.add(record)
    }

    /// Drop every record whose id is `id`.
    ///
    /// The file is only rewritten when at least one record was removed.
    pub fn remove(&self, id: &str) -> StoreResult<Outcome> {
        let mut file = StoreFile::open(&self.path)?;
        let mut records = file.load()?;

        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            Logger::warn(
                "RECORD_NOT_FOUND",
                &[("id", id), ("path", &self.display_path())],
            );
            return Ok(Outcome::NotFound { id: id.to_string() });
        }

        let content = file.flush(&records)?;
        Ok(Outcome::Payload(content))
    }

    /// First record whose id is `id`, encoded on its own.
    pub fn find_by_id(&self, id: &str) -> StoreResult<Outcome> {
        let mut file = StoreFile::open(&self.path)?;
        let records = file.load()?;

        match records.iter().find(|r| r.id == id) {
            Some(record) => Ok(Outcome::Payload(record.encode()?)),
            None => Ok(Outcome::NotFound { id: id.to_string() }),
        }
    }

    /// Decoded view of the whole store
    pub fn records(&self) -> StoreResult<Vec<Record>> {
        StoreFile::open(&self.path)?.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{take_captured, Severity};
    use crate::store::StoreError;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> RecordStore {
        RecordStore::open(temp_dir.path().join("users.json"))
    }

    #[test]
    fn test_add_to_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let outcome = store.add(Record::new("1", "a@b.com", 30)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Payload(br#"[{"id":"1","email":"a@b.com","age":30}]"#.to_vec())
        );
        assert_eq!(store.records().unwrap(), vec![Record::new("1", "a@b.com", 30)]);
    }

    #[test]
    fn test_add_duplicate_is_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.add(Record::new("1", "a@b.com", 30)).unwrap();
        let before = fs::read(store.path()).unwrap();

        let outcome = store.add(Record::new("1", "other@b.com", 99)).unwrap();
        assert_eq!(outcome, Outcome::Conflict { id: "1".into() });
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_add_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.add(Record::new("b", "", 1)).unwrap();
        store.add(Record::new("a", "", 2)).unwrap();

        let ids: Vec<_> = store.records().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_remove_drops_all_matches() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(
            store.path(),
            r#"[{"id":"1","email":"","age":0},{"id":"2","email":"","age":0},{"id":"1","email":"","age":5}]"#,
        )
        .unwrap();

        let outcome = store.remove("1").unwrap();
        assert_eq!(
            outcome,
            Outcome::Payload(br#"[{"id":"2","email":"","age":0}]"#.to_vec())
        );
    }

    #[test]
    fn test_remove_last_record_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.add(Record::new("1", "a@b.com", 30)).unwrap();

        assert_eq!(store.remove("1").unwrap(), Outcome::Payload(b"[]".to_vec()));
        assert_eq!(fs::read(store.path()).unwrap(), b"[]");
    }

    #[test]
    fn test_remove_missing_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        // Pretty-printed on purpose: a rewrite would compact it.
        let original = "[\n  {\"id\": \"1\", \"email\": \"a@b.com\", \"age\": 30}\n]\n";
        fs::write(store.path(), original).unwrap();

        let outcome = store.remove("2").unwrap();
        assert_eq!(outcome, Outcome::NotFound { id: "2".into() });
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
    }

    #[test]
    fn test_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.add(Record::new("1", "a@b.com", 30)).unwrap();
        store.add(Record::new("2", "c@d.com", 40)).unwrap();

        assert_eq!(
            store.find_by_id("2").unwrap(),
            Outcome::Payload(br#"{"id":"2","email":"c@d.com","age":40}"#.to_vec())
        );
        assert_eq!(
            store.find_by_id("3").unwrap(),
            Outcome::NotFound { id: "3".into() }
        );
    }

    #[test]
    fn test_list_creates_file_and_returns_raw_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(store.list().unwrap().is_empty());
        assert!(store.path().exists());

        fs::write(store.path(), "not even json").unwrap();
        assert_eq!(store.list().unwrap(), b"not even json");
    }

    #[test]
    fn test_add_item_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let err = store.add_item("{\"id\":").unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Payload(Vec::new()).label(), "payload");
        assert_eq!(Outcome::Conflict { id: "x".into() }.label(), "conflict");
        assert_eq!(Outcome::NotFound { id: "x".into() }.label(), "not_found");
    }

    #[test]
    fn test_conflict_and_miss_are_logged_as_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.add(Record::new("1", "a@b.com", 30)).unwrap();
        Logger::set_threshold(Severity::Warn);
        take_captured();

        store.add(Record::new("1", "a@b.com", 30)).unwrap();
        store.remove("2").unwrap();

        let lines = take_captured();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "RECORD_CONFLICT");
        assert_eq!(lines[0]["severity"], "WARN");
        assert_eq!(lines[0]["id"], "1");
        assert_eq!(lines[1]["event"], "RECORD_NOT_FOUND");
        assert_eq!(lines[1]["id"], "2");
    }

    #[test]
    fn test_flush_is_logged_with_counts() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        Logger::set_threshold(Severity::Info);
        take_captured();

        store.add(Record::new("1", "a@b.com", 30)).unwrap();

        let lines = take_captured();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "STORE_FLUSHED");
        assert_eq!(lines[0]["severity"], "INFO");
        assert_eq!(lines[0]["records"], "1");
        assert_eq!(lines[0]["bytes"], "39");
    }

    #[test]
    fn test_store_records_without_id_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), r#"[{"email":"anon@b.com","age":1}]"#).unwrap();

        let outcome = store.add(Record::new("1", "a@b.com", 30)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Payload(
                br#"[{"id":"","email":"anon@b.com","age":1},{"id":"1","email":"a@b.com","age":30}]"#
                    .to_vec()
            )
        );
    }
}
