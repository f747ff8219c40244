use crate::errors::StoreError;
use std::collections::BTreeMap;
use std::future::Future;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

/// String-keyed, string-valued persistence used by the task store.
///
/// Reads never fail: a backend that cannot produce a value reports it as absent.
/// A failed `set` leaves the previous value in place.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(
        &mut self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Keeps every entry in memory and rewrites the whole JSON file on each `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self { path, entries }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value);
        persist_entries(&self.path, &entries).await?;
        self.entries = entries;
        Ok(())
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/taskroll.json")
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

async fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(entries)?;
    fs::write(path, payload).await?;
    Ok(())
}
