use crate::error::{StorageError, StorageResult};
use crate::providers::Message;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod types;
pub use types::{SessionRecord, StoredSession};

/// Extension of session record files
pub const RECORD_EXTENSION: &str = "json";

/// Format of the informational `timestamp` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// File-backed session store
///
/// Every session lives in `<dir>/<id>.json`. Saves replace the whole record
/// through a temporary file and a rename, so an interrupted write leaves the
/// previous record intact.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    ///
    /// # Examples
    ///
    /// ```
    /// use chatvault::storage::SessionStore;
    ///
    /// let tmp = tempfile::tempdir().unwrap();
    /// let store = SessionStore::new(tmp.path().join("chat_history")).unwrap();
    /// assert!(store.list().unwrap().is_empty());
    /// ```
    pub fn new<P: Into<PathBuf>>(dir: P) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Unavailable(format!("cannot create {}: {}", dir.display(), e))
        })?;
        tracing::debug!("Session store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the session records
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `id`
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    /// Session ids, most recently modified first
    pub fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|entry| entry.id).collect())
    }

    /// Session ids with their modification time, most recently modified first
    pub fn entries(&self) -> StorageResult<Vec<StoredSession>> {
        let read_dir = fs::read_dir(&self.dir).map_err(|e| {
            StorageError::Unavailable(format!("cannot read {}: {}", self.dir.display(), e))
        })?;

        let mut entries: Vec<(SystemTime, String)> = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push((modified, id.to_string()));
        }

        entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        Ok(entries
            .into_iter()
            .map(|(modified, id)| StoredSession {
                id,
                modified: DateTime::<Utc>::from(modified),
            })
            .collect())
    }

    /// Whether a record exists for `id`
    pub fn exists(&self, id: &str) -> StorageResult<bool> {
        validate_id(id)?;
        Ok(self.record_path(id).is_file())
    }

    /// Load the full record for `id`
    ///
    /// A record without `id` takes the file stem; a record without
    /// `messages` loads as an empty transcript.
    ///
    /// # Errors
    ///
    /// `NotFound` when no record exists, `Corrupt` when the bytes are not a
    /// session document, `Unavailable` for any other read failure.
    pub fn load(&self, id: &str) -> StorageResult<SessionRecord> {
        validate_id(id)?;
        let path = self.record_path(id);

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(id.to_string()),
            _ => StorageError::Unavailable(format!("cannot read {}: {}", path.display(), e)),
        })?;

        let mut record: SessionRecord =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        if record.id.is_empty() {
            record.id = id.to_string();
        }

        tracing::debug!("Loaded session {} ({} messages)", id, record.messages.len());
        Ok(record)
    }

    /// Write `messages` as the complete record for `id`
    ///
    /// Returns `false` without touching the filesystem when `messages` is
    /// empty. The timestamp is refreshed on every write.
    pub fn save(&self, id: &str, messages: &[Message]) -> StorageResult<bool> {
        validate_id(id)?;
        if messages.is_empty() {
            tracing::debug!("Skipping save of empty session {}", id);
            return Ok(false);
        }

        let record = SessionRecord {
            id: id.to_string(),
            timestamp: current_timestamp(),
            messages: messages.to_vec(),
        };
        let bytes = to_pretty_json(&record).map_err(|e| StorageError::Corrupt {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let path = self.record_path(id);
        let tmp_path = path.with_extension(format!("{}.tmp", RECORD_EXTENSION));

        if let Err(e) = write_synced(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::Unavailable(format!(
                "cannot write {}: {}",
                tmp_path.display(),
                e
            )));
        }
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::Unavailable(format!(
                "cannot replace {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!("Saved session {} ({} messages)", id, messages.len());
        Ok(true)
    }

    /// Remove the record for `id`; returns whether one was removed
    pub fn delete(&self, id: &str) -> StorageResult<bool> {
        validate_id(id)?;
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Deleted session {}", id);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Unavailable(format!(
                "cannot delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Write `bytes` to a new file at `path` and flush it to disk
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Current local time in the record timestamp format
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

fn validate_id(id: &str) -> StorageResult<()> {
    if id.trim().is_empty()
        || id.contains('/')
        || id.contains('\\')
        || id.contains("..")
        || id.contains('\0')
    {
        return Err(StorageError::InvalidId(id.to_string()));
    }
    Ok(())
}
