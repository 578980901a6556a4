//! Implements SchedulePersistence using a JSON file.
//!
//! The file is a key/value object; the schedule lives under [`SCHEDULE_KEY`]. Other keys
//! are preserved across saves.

use crate::domain::{DomainError, Schedule};
use crate::ports::SchedulePersistence;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Storage key holding the serialized schedule array.
pub const SCHEDULE_KEY: &str = "examSchedule";

/// JSON file-based key/value storage.
pub struct StateJson {
    path: std::path::PathBuf,
    // Serializes read-modify-write of the whole file.
    lock: tokio::sync::Mutex<()>,
}

impl StateJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the key/value object. Missing or unparseable files read as empty.
    async fn read_entries(&self) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(_) => return Map::new(),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "state file is not a JSON object; ignoring");
                Map::new()
            }
        }
    }

    /// Atomic save using write-replace pattern.
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Persistence(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Persistence(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Persistence(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Persistence(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SchedulePersistence for StateJson {
    async fn load_schedule(&self) -> Result<Schedule, DomainError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await;
        let schedule = match entries.get(SCHEDULE_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                warn!(error = %e, "stored schedule unreadable; treating as empty");
                Schedule::new()
            }),
            None => Schedule::new(),
        };
        Ok(schedule)
    }

    async fn save_schedule(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await;
        let value =
            serde_json::to_value(schedule).map_err(|e| DomainError::Persistence(e.to_string()))?;
        entries.insert(SCHEDULE_KEY.to_string(), value);
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), entries = schedule.len(), "state file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExamEntry, default_schedule};

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateJson::new(dir.path().join("state.json"));
        assert!(state.load_schedule().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateJson::new(dir.path().join("nested").join("state.json"));
        let schedule = default_schedule();

        state.save_schedule(&schedule).await.unwrap();
        assert_eq!(state.load_schedule().await.unwrap(), schedule);

        let raw = std::fs::read_to_string(state.path()).unwrap();
        assert!(raw.contains("\"examSchedule\""));
        assert!(raw.contains("\"startTime\""));
    }

    #[tokio::test]
    async fn test_garbage_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        let state = StateJson::new(&path);
        assert!(state.load_schedule().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_under_key_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"examSchedule": "oops"}"#).unwrap();
        let state = StateJson::new(&path);
        assert!(state.load_schedule().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let state = StateJson::new(&path);

        state
            .save_schedule(&vec![ExamEntry::new(1, "英文", "08:00", "09:00")])
            .await
            .unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[SCHEDULE_KEY][0]["subject"], "英文");
    }
}
