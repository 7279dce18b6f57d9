use crate::errors::AppError;
use crate::models::{LogEntry, StoredRecord};
use std::future::Future;
use std::{env, io, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

pub fn resolve_data_path() -> Result<PathBuf, io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/fuel_history.json"))
}

/// A single persisted record addressed by one key.
pub trait RecordStore {
    /// Returns `None` when nothing has been stored under the key.
    fn read(&self) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send;
    fn write(&self, payload: &[u8]) -> impl Future<Output = io::Result<()>> + Send;
    fn remove(&self) -> impl Future<Output = io::Result<()>> + Send;
}

/// Stores the record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for FileStore {
    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, payload: &[u8]) -> io::Result<()> {
        // Readers only ever see the old file or the fully written new one.
        let staging = self.staging_path();
        fs::write(&staging, payload).await?;
        fs::rename(&staging, &self.path).await
    }

    async fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path).await {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Append-only fuel log, newest entry first.
///
/// One writer at a time: every mutation rewrites the whole sequence, so a
/// second process writing the same record would lose updates.
#[derive(Debug, Clone)]
pub struct EntryLog<S> {
    store: S,
}

impl<S: RecordStore> EntryLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Valid entries in stored order. Records that fail validation are
    /// skipped; an unreadable log reads as empty.
    pub async fn load(&self) -> Vec<LogEntry> {
        let records = match self.load_records().await {
            Ok(records) => records,
            Err(err) => {
                error!("failed to load fuel log: {}", err.message);
                return Vec::new();
            }
        };

        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match decode(value) {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    warn!(index, "skipping log record: {reason}");
                    None
                }
            })
            .collect()
    }

    pub async fn append(&self, entry: &LogEntry) -> Result<(), AppError> {
        // Malformed records are carried over untouched.
        let mut records = self.load_records().await?;
        let record = serde_json::to_value(StoredRecord::from(entry)).map_err(AppError::internal)?;
        records.insert(0, record);

        let payload = serde_json::to_vec_pretty(&records).map_err(AppError::internal)?;
        self.store.write(&payload).await?;
        debug!(records = records.len(), "fuel log persisted");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.remove().await?;
        debug!("fuel log cleared");
        Ok(())
    }

    async fn load_records(&self) -> Result<Vec<serde_json::Value>, AppError> {
        match self.store.read().await? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(AppError::internal),
        }
    }
}

fn decode(value: serde_json::Value) -> Result<LogEntry, String> {
    let record: StoredRecord = serde_json::from_value(value).map_err(|err| err.to_string())?;
    LogEntry::try_from(record).map_err(|err| err.to_string())
}
