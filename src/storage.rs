use crate::errors::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{error, warn};

pub const TASKS_KEY: &str = "bo_tasks";
pub const LEDGER_KEY: &str = "bo_data";
pub const USER_KEY: &str = "bo_user";
pub const SESSION_KEY: &str = "bo_session";

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Store {
    pub async fn open(path: PathBuf) -> Self {
        let entries = read_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.entries.get(key) else {
            return T::default();
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring malformed value for {key}: {err}");
                T::default()
            }
        }
    }

    pub async fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AppError> {
        let text = serde_json::to_string(value)?;
        self.set(key, text).await
    }

    pub async fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), AppError> {
        self.set_many([(key, value.into())]).await
    }

    // All or nothing: a failed write leaves the map as it was.
    pub async fn set_many<'a>(
        &mut self,
        values: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<(), AppError> {
        let previous = self.entries.clone();
        for (key, value) in values {
            self.entries.insert(key.to_string(), value);
        }
        self.commit(previous).await
    }

    pub async fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let previous = self.entries.clone();
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.commit(previous).await
    }

    async fn commit(&mut self, previous: BTreeMap<String, String>) -> Result<(), AppError> {
        if let Err(err) = self.flush().await {
            self.entries = previous;
            return Err(err);
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, payload).await.map_err(|err| {
            error!("failed to write {}: {err}", self.path.display());
            AppError::internal(err)
        })
    }
}

async fn read_entries(path: &Path) -> BTreeMap<String, String> {
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

#[cfg(test)]
pub(crate) fn temp_store_path(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "habit_tracker_{label}_{}_{nanos}.json",
        std::process::id()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let store = Store::open(temp_store_path("missing")).await;
        assert!(store.get(TASKS_KEY).is_none());
        let tasks: Vec<String> = store.load(TASKS_KEY);
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn saved_values_survive_reopen() {
        let path = temp_store_path("reopen");
        let mut store = Store::open(path.clone()).await;
        let tasks = vec!["Read".to_string(), "Run".to_string()];
        store.save(TASKS_KEY, &tasks).await.unwrap();
        store.set(SESSION_KEY, "true").await.unwrap();

        let reopened = Store::open(path.clone()).await;
        let loaded: Vec<String> = reopened.load(TASKS_KEY);
        assert_eq!(loaded, tasks);
        assert_eq!(reopened.get(SESSION_KEY), Some("true"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn malformed_value_loads_as_default() {
        let path = temp_store_path("malformed");
        let mut store = Store::open(path.clone()).await;
        store.set(LEDGER_KEY, "{not json").await.unwrap();

        let ledger: BTreeMap<String, BTreeMap<String, bool>> = store.load(LEDGER_KEY);
        assert!(ledger.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn malformed_file_opens_empty() {
        let path = temp_store_path("garbage");
        std::fs::write(&path, b"<<garbage>>").unwrap();

        let store = Store::open(path.clone()).await;
        assert!(store.get(USER_KEY).is_none());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_values() {
        let dir = temp_store_path("gone_dir");
        std::fs::create_dir_all(&dir).unwrap();
        let mut store = Store::open(dir.join("habits.json")).await;
        store.set(USER_KEY, "Grace").await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(store.set(USER_KEY, "Ada").await.is_err());
        assert!(store.set(SESSION_KEY, "true").await.is_err());
        assert!(store.remove(USER_KEY).await.is_err());
        assert_eq!(store.get(USER_KEY), Some("Grace"));
        assert!(store.get(SESSION_KEY).is_none());
    }

    #[tokio::test]
    async fn remove_drops_key() {
        let path = temp_store_path("remove");
        let mut store = Store::open(path.clone()).await;
        store.set(SESSION_KEY, "true").await.unwrap();
        store.remove(SESSION_KEY).await.unwrap();

        let reopened = Store::open(path.clone()).await;
        assert!(reopened.get(SESSION_KEY).is_none());
        let _ = std::fs::remove_file(path);
    }
}
