/// Storage adapter for the shared submission collection
///
/// The collection lives under a single key and is always written whole.
/// A second key carries a revision counter that every write bumps, so a
/// writer holding a stale copy is refused instead of silently dropping
/// another context's change.
use crate::config::Config;
use crate::submission::Submission;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Failed to read storage: {0}")]
    Read(String),
    #[error("Failed to write storage: {0}")]
    Write(String),
    #[error("Failed to parse stored submissions: {0}")]
    Decode(String),
    #[error("Failed to serialize submissions: {0}")]
    Encode(String),
    #[error("Submissions were changed in another window (expected revision {expected}, found {found})")]
    Conflict { expected: u64, found: u64 },
}

/// Asynchronous key-value persistence (chrome.storage.local in the extension)
#[allow(async_fn_in_trait)]
pub trait StorageBackend {
    /// Read one key; `None` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write all entries in a single call
    async fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError>;
}

/// The stored collection together with the revision it was read at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub submissions: Vec<Submission>,
    pub revision: u64,
}

pub struct SubmissionStore<B> {
    backend: B,
    storage_key: String,
    revision_key: String,
}

impl<B: StorageBackend> SubmissionStore<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        SubmissionStore {
            backend,
            storage_key: config.storage_key.clone(),
            revision_key: config.revision_key.clone(),
        }
    }

    /// Read the full collection; a missing key is an empty collection
    pub async fn load(&self) -> Result<Snapshot, StorageError> {
        let submissions = match self.backend.get(&self.storage_key).await? {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StorageError::Decode(e.to_string()))?,
        };
        let revision = self.read_revision().await?;

        Ok(Snapshot { submissions, revision })
    }

    /// Replace the stored collection, provided nobody wrote since `expected_revision`
    ///
    /// Returns the new revision.
    pub async fn save(&self, expected_revision: u64, submissions: &[Submission]) -> Result<u64, StorageError> {
        let found = self.read_revision().await?;
        if found != expected_revision {
            log::warn!(
                "Refusing stale write to '{}': expected revision {}, found {}",
                self.storage_key, expected_revision, found
            );
            return Err(StorageError::Conflict { expected: expected_revision, found });
        }

        let next = expected_revision + 1;
        let collection = serde_json::to_value(submissions)
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        let mut entries = Map::new();
        entries.insert(self.storage_key.clone(), collection);
        entries.insert(self.revision_key.clone(), Value::from(next));

        self.backend.set(entries).await?;
        Ok(next)
    }

    /// Read-modify-write: add one record to the end of the collection
    pub async fn append(&self, submission: Submission) -> Result<Snapshot, StorageError> {
        let Snapshot { mut submissions, revision } = self.load().await?;
        submissions.push(submission);
        let revision = self.save(revision, &submissions).await?;

        Ok(Snapshot { submissions, revision })
    }

    async fn read_revision(&self) -> Result<u64, StorageError> {
        match self.backend.get(&self.revision_key).await? {
            None | Some(Value::Null) => Ok(0),
            // JS numbers may come back as floats
            Some(value) => value
                .as_u64()
                .or_else(|| value.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
                .ok_or_else(|| StorageError::Decode(format!("revision is not a counter: {}", value))),
        }
    }
}

/// In-memory backend with fault injection for tests
#[cfg(test)]
pub mod memory {
    use super::{StorageBackend, StorageError};
    use serde_json::{Map, Value};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Clones share the same underlying map, like two extension pages
    /// sharing chrome.storage.local
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        data: Rc<RefCell<Map<String, Value>>>,
        fail_reads: Rc<Cell<bool>>,
        fail_writes: Rc<Cell<bool>>,
        writes: Rc<Cell<usize>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_value(key: &str, value: Value) -> Self {
            let storage = Self::new();
            storage.data.borrow_mut().insert(key.to_string(), value);
            storage
        }

        pub fn value(&self, key: &str) -> Option<Value> {
            self.data.borrow().get(key).cloned()
        }

        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.set(fail);
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.set(fail);
        }

        pub fn write_count(&self) -> usize {
            self.writes.get()
        }
    }

    impl StorageBackend for MemoryStorage {
        async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
            if self.fail_reads.get() {
                return Err(StorageError::Read("injected read failure".to_string()));
            }
            Ok(self.data.borrow().get(key).cloned())
        }

        async fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Write("injected write failure".to_string()));
            }
            self.data.borrow_mut().extend(entries);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }
}
