//! Bounded translation history, mirrored to durable key/value storage.
//!
//! The log keeps the most recent translations, newest first, and is written
//! back in full on every mutation. A fresh process reloads it from storage;
//! a missing or unparsable record starts the log empty rather than failing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LingoError, Result};

/// Storage key under which the serialized log lives
pub const HISTORY_KEY: &str = "translationHistory";

/// Maximum number of retained entries
pub const HISTORY_CAPACITY: usize = 10;

/// One recorded translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
    pub from: String,
    pub to: String,
    pub timestamp: String,
}

/// Durable key/value storage consumed by the history store
pub trait HistoryStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: HistoryStorage + ?Sized> HistoryStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// File-backed storage, one file per key under a data directory
pub struct FileHistoryStorage {
    dir: PathBuf,
}

impl FileHistoryStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!("Failed to create history storage directory: {}", e);
        }

        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| LingoError::Persistence(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        std::fs::write(&path, value)
            .map_err(|e| LingoError::Persistence(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(());
        }

        std::fs::remove_file(&path)
            .map_err(|e| LingoError::Persistence(format!("Failed to remove {}: {}", path.display(), e)))
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryHistoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryHistoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStorage for MemoryHistoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Append-capped log of past translations
pub struct HistoryStore {
    storage: Box<dyn HistoryStorage>,
    log: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load the persisted log from storage. Absent or unparsable state
    /// starts empty; it never fails the caller.
    pub fn load(storage: Box<dyn HistoryStorage>) -> Self {
        let log = match storage.get(HISTORY_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded {} history entries", entries.len());
                    entries
                }
                Err(e) => {
                    warn!("Discarding unparsable history log: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("History storage unavailable, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { storage, log }
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.log
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Prepend an entry, truncate to capacity, and persist the full log
    /// before returning.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<()> {
        self.log.insert(0, entry);
        self.log.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Empty the log and remove the persisted representation
    pub fn clear(&mut self) -> Result<()> {
        self.log.clear();
        self.storage.remove(HISTORY_KEY)
    }

    /// Render the log as numbered human-readable lines
    pub fn export(&self) -> Result<String> {
        if self.log.is_empty() {
            return Err(LingoError::Validation("No history to download.".to_string()));
        }

        let mut content = String::from("Translation History\n\n");
        for (i, entry) in self.log.iter().enumerate() {
            content.push_str(&format!(
                "{}. {} → {} ({} → {}, {})\n",
                i + 1,
                entry.input,
                entry.output,
                entry.from,
                entry.to,
                entry.timestamp
            ));
        }

        Ok(content)
    }

    /// Write the export rendering to a plain-text file
    pub async fn export_to_file<P: AsRef<Path>>(&self, output_path: P) -> Result<()> {
        let content = self.export()?;
        tokio::fs::write(output_path.as_ref(), content).await?;
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string(&self.log)?;
        self.storage.set(HISTORY_KEY, &content)
    }
}
