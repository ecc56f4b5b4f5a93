//! Storage ports and their implementations.
//!
//! The service talks to byte storage and the run catalog only through these
//! traits, so tests can inject in-memory fakes and the CLI a filesystem
//! store.

use crate::error::{CleaningError, Result};
use crate::types::CleaningRunRecord;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Byte storage addressed by path.
pub trait DatasetStore: Send + Sync {
    /// Fetch the bytes at `path`, or `DatasetNotFound`.
    fn get(&self, path: &str) -> Result<Vec<u8>>;
    /// Write `bytes` at `path`, overwriting.
    fn put(&self, path: &str, bytes: &[u8]) -> Result<()>;
}

/// Catalog of completed cleaning runs.
pub trait CleaningCatalog: Send + Sync {
    /// Persist a run record and return its assigned id.
    fn record_run(&self, record: &CleaningRunRecord) -> Result<i64>;
}

/// Map-backed store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let store = Self::new();
        let mut entries = store.entries.lock().unwrap();
        entries.insert(path.into(), bytes);
        drop(entries);
        store
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }
}

impl DatasetStore for InMemoryStore {
    fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| CleaningError::DatasetNotFound(path.to_string()))
    }

    fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Vec-backed catalog assigning sequential ids, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: Mutex<Vec<CleaningRunRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CleaningRunRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl CleaningCatalog for InMemoryCatalog {
    fn record_run(&self, record: &CleaningRunRecord) -> Result<i64> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(records.len() as i64)
    }
}

/// Filesystem store rooted at a directory. Paths are resolved relative to
/// the root; `put` creates missing parent directories.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DatasetStore for FsStore {
    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        if !full.exists() {
            return Err(CleaningError::DatasetNotFound(path.to_string()));
        }
        Ok(fs::read(&full)?)
    }

    fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), full.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_in_memory_store_roundtrip() {
        let store = InMemoryStore::new();
        store.put("data/x.csv", b"a,b\n1,2\n").unwrap();
        assert_eq!(store.get("data/x.csv").unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn test_in_memory_store_missing_path() {
        let store = InMemoryStore::new();
        let err = store.get("nope.csv").unwrap_err();
        assert_eq!(err.error_code(), "DATASET_NOT_FOUND");
    }

    #[test]
    fn test_in_memory_catalog_sequential_ids() {
        let catalog = InMemoryCatalog::new();
        let record = CleaningRunRecord {
            dataset_id: 7,
            tipo_limpieza: "multiple".to_string(),
            parametros_usados: Vec::new(),
            num_registros_afectados: 0,
            ruta_dataset_limpio: "clean/clean_multi_x.csv".to_string(),
            estado: "Completada".to_string(),
            fecha_limpieza: "2026-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(catalog.record_run(&record).unwrap(), 1);
        assert_eq!(catalog.record_run(&record).unwrap(), 2);
        assert_eq!(catalog.records().len(), 2);
    }

    #[test]
    fn test_fs_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("clean/clean_multi_x.csv", b"a\n1\n").unwrap();
        assert_eq!(store.get("clean/clean_multi_x.csv").unwrap(), b"a\n1\n");
    }

    #[test]
    fn test_fs_store_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let err = store.get("missing.csv").unwrap_err();
        assert_eq!(err.error_code(), "DATASET_NOT_FOUND");
    }
}
