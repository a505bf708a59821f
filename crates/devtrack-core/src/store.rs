//! Snapshot persistence: a string-keyed store plus the file-backed and
//! in-memory implementations.
//!
//! Each key holds one complete JSON snapshot of a sequence; every mutation
//! rewrites the whole value. There are no transactional guarantees across
//! keys and no schema versioning; unreadable or unparsable content is
//! degraded to "absent" by the callers, never surfaced.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage key for the build log snapshot.
pub const LOG_KEY: &str = "buildLogs";

/// Storage key for the plan list snapshot.
pub const PLANS_KEY: &str = "nextPlans";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },

    #[error("write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("encode {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// String-keyed snapshot storage.
pub trait SnapshotStore {
    /// Read the current snapshot for `key`; `None` when the key has never
    /// been written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the snapshot for `key` in one step.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store keeping one `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                key: key.to_owned(),
                source: err,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_err)?;

        // Write to a sibling temp file and rename so readers never observe a
        // partial snapshot.
        let path = self.key_path(key);
        let temp = self.root.join(format!("{key}.json.tmp"));
        let result = fs::File::create(&temp)
            .and_then(|mut file| file.write_all(value.as_bytes()).and_then(|()| file.sync_all()))
            .and_then(|()| fs::rename(&temp, &path));
        if let Err(err) = result {
            let _ = fs::remove_file(&temp);
            return Err(write_err(err));
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys ever written, for asserting on persistence traffic.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.values.len()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Load a persisted sequence, treating absent keys, read failures, and
/// malformed JSON all as the empty sequence.
pub(crate) fn read_sequence<T: DeserializeOwned>(store: &dyn SnapshotStore, key: &str) -> Vec<T> {
    let Ok(Some(raw)) = store.read(key) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

/// Persist the full sequence as one JSON snapshot.
pub(crate) fn write_sequence<T: Serialize>(
    store: &mut dyn SnapshotStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let data = serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.write(key, &data)
}
