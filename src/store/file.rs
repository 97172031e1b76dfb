//! Scoped handle on the store file
//!
//! A `StoreFile` owns the open file for the length of one operation and is
//! closed on drop, whichever path the operation leaves by.
//!
//! Rewrites are truncate-then-write on the same handle, followed by
//! `sync_all`. There is no locking: two processes mutating the same file can
//! lose an update.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{decode_records, encode_records, Record};
use crate::observability::Logger;

/// An open store file
pub struct StoreFile {
    path: PathBuf,
    file: File,
}

impl StoreFile {
    /// Opens the store file read/write, creating it empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be created or opened.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let file = options
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;

        Logger::trace("STORE_OPENED", &[("path", &path.display().to_string())]);

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path this handle was opened on
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file from the start, without interpreting it.
    pub fn read_raw(&mut self) -> StoreResult<Vec<u8>> {
        let mut content = Vec::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_end(&mut content))
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(content)
    }

    /// Reads and decodes the whole store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if non-empty content is not a JSON array
    /// of records.
    pub fn load(&mut self) -> StoreResult<Vec<Record>> {
        let content = self.read_raw()?;
        let records = decode_records(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        Logger::trace(
            "STORE_LOADED",
            &[
                ("path", &self.path.display().to_string()),
                ("records", &records.len().to_string()),
            ],
        );

        Ok(records)
    }

    /// Replaces the file content with the encoded `records` and returns the
    /// bytes written.
    pub fn flush(&mut self, records: &[Record]) -> StoreResult<Vec<u8>> {
        let content = encode_records(records)?;

        self.file
            .set_len(0)
            .and_then(|_| self.file.seek(SeekFrom::Start(0)))
            .and_then(|_| self.file.write_all(&content))
            .and_then(|_| self.file.sync_all())
            .map_err(|e| StoreError::io(&self.path, e))?;

        Logger::info(
            "STORE_FLUSHED",
            &[
                ("bytes", &content.len().to_string()),
                ("path", &self.path.display().to_string()),
                ("records", &records.len().to_string()),
            ],
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");

        let mut store = StoreFile::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("users.json");

        let err = StoreFile::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_flush_shrinks_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        fs::write(
            &path,
            r#"[{"id":"1","email":"a@b.com","age":30},{"id":"2","email":"c@d.com","age":40}]"#,
        )
        .unwrap();

        let mut store = StoreFile::open(&path).unwrap();
        let mut records = store.load().unwrap();
        records.truncate(1);
        let written = store.flush(&records).unwrap();
        drop(store);

        assert_eq!(fs::read(&path).unwrap(), written);
        assert_eq!(written, br#"[{"id":"1","email":"a@b.com","age":30}]"#);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = StoreFile::open(&path).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("users.json"));
    }

    #[test]
    fn test_read_raw_returns_bytes_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        fs::write(&path, "anything at all\n").unwrap();

        let mut store = StoreFile::open(&path).unwrap();
        assert_eq!(store.read_raw().unwrap(), b"anything at all\n");
    }
}
