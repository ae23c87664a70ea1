//! File-backed key-value store
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes optionally keep the
//! previous value as `<key>.json.bak`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tudu_core::{CoreError, KeyValueStore};

use crate::error::{CliError, Result};

pub struct FileStore {
    dir: PathBuf,
    backup: bool,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            backup: true,
        }
    }

    /// Builder method to enable or disable backups
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// File holding the value for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn backup_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }

    /// Check if a backup exists for `key`
    pub fn backup_exists(&self, key: &str) -> bool {
        self.backup_path_for(key).exists()
    }

    /// Read the backed-up value for `key`
    pub fn recover(&self, key: &str) -> Result<String> {
        let backup_path = self.backup_path_for(key);

        if !backup_path.exists() {
            return Err(CliError::storage("Backup file not found"));
        }

        fs::read_to_string(&backup_path)
            .map_err(|e| CliError::io(format!("Failed to read {}", backup_path.display()), e))
    }

    fn write(&self, key: &str, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        if self.backup && path.exists() {
            fs::copy(&path, self.backup_path_for(key))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        file.write_all(value.as_bytes())?;
        file.flush()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> tudu_core::Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| CoreError::storage_with_source(format!("Failed to read {}", path.display()), e))
    }

    fn set(&mut self, key: &str, value: &str) -> tudu_core::Result<()> {
        self.write(key, value).map_err(|e| {
            CoreError::storage_with_source(
                format!("Failed to write {}", self.path_for(key).display()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tudu_core::TASKS_KEY;

    #[test]
    fn test_get_missing_key() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path());

        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path().join("nested"));

        store.set(TASKS_KEY, "[]").unwrap();

        assert!(store.path_for(TASKS_KEY).ends_with("nested/tasks.json"));
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_backup_keeps_previous_value() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set(TASKS_KEY, "first").unwrap();
        assert!(!store.backup_exists(TASKS_KEY));

        store.set(TASKS_KEY, "second").unwrap();

        assert!(store.backup_exists(TASKS_KEY));
        assert_eq!(store.recover(TASKS_KEY).unwrap(), "first");
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_backup_disabled() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path()).with_backup(false);

        store.set(TASKS_KEY, "first").unwrap();
        store.set(TASKS_KEY, "second").unwrap();

        assert!(!store.backup_exists(TASKS_KEY));
        assert!(store.recover(TASKS_KEY).is_err());
    }

    #[test]
    fn test_manager_roundtrip_through_files() {
        use tudu_core::{Category, TaskListManager};

        let temp = tempdir().unwrap();
        let mut manager = TaskListManager::hydrate(FileStore::new(temp.path()));
        manager.set_input("Water plants");
        manager.set_category(Category::Hobby);
        manager.submit().unwrap();
        manager.toggle_completion(0).unwrap();

        let reloaded = TaskListManager::hydrate(FileStore::new(temp.path()));

        assert_eq!(reloaded.tasks(), manager.tasks());
    }

    #[test]
    fn test_corrupt_file_hydrates_empty() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("tasks.json"), "not json at all").unwrap();

        let manager = tudu_core::TaskListManager::hydrate(FileStore::new(temp.path()));

        assert!(manager.tasks().is_empty());
    }
}
