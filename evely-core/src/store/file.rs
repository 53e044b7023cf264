//! On-disk store: one `<key>.json` file per key in a storage directory.
//!
//! Each `FileStore` is one context. Changes made by other processes (or other
//! handles on the same directory) are found by [`FileStore::poll_external`],
//! which compares the directory against what this handle last saw or wrote.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::{ContextId, Notifier, StorageEvent, StorageListener, Store};
use crate::error::{EvelyError, EvelyResult};

const EXTENSION: &str = "json";

pub struct FileStore {
    dir: PathBuf,
    notifier: Notifier,
    /// Last value this handle observed per key; `None` when absent.
    seen: Mutex<HashMap<String, Option<String>>>,
}

impl FileStore {
    /// Open (and create if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> EvelyResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let store = FileStore {
            dir,
            notifier: Notifier::new(),
            seen: Mutex::new(HashMap::new()),
        };

        let snapshot = store.scan()?;
        *store.seen() = snapshot.into_iter().map(|(k, v)| (k, Some(v))).collect();

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn seen(&self) -> MutexGuard<'_, HashMap<String, Option<String>>> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn path_for(&self, key: &str) -> EvelyResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(EvelyError::Config(format!("Invalid storage key '{}'", key)));
        }

        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    /// Read every `<key>.json` in the directory.
    fn scan(&self) -> EvelyResult<HashMap<String, String>> {
        let mut items = HashMap::new();

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();

            if path.extension().is_none_or(|e| e != EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if key.starts_with('.') {
                continue;
            }

            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    items.insert(key.to_string(), content);
                }
                // Removed between read_dir and read
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(items)
    }

    /// Report keys changed on disk since this handle last looked.
    ///
    /// Each change is delivered to this handle's listeners. Returns how many
    /// keys changed.
    pub fn poll_external(&self) -> EvelyResult<usize> {
        let current = self.scan()?;
        let mut changes = Vec::new();

        {
            let mut seen = self.seen();

            for (key, value) in &current {
                let previous = seen.get(key).cloned().flatten();
                if previous.as_deref() != Some(value.as_str()) {
                    changes.push(StorageEvent::changed(key, previous, Some(value.clone())));
                    seen.insert(key.clone(), Some(value.clone()));
                }
            }

            for (key, previous) in seen.iter_mut() {
                if previous.is_some() && !current.contains_key(key) {
                    changes.push(StorageEvent::changed(key, previous.take(), None));
                }
            }
        }

        for change in &changes {
            tracing::debug!(key = ?change.key, "storage changed on disk");
            self.notifier.notify(ContextId::EXTERNAL, change.clone());
        }

        Ok(changes.len())
    }

    /// Poll for external changes every `interval` until the returned guard drops.
    pub fn spawn_watcher(self: &Arc<Self>, interval: Duration) -> Watcher {
        let store = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = store.poll_external() {
                    tracing::warn!(error = %e, dir = %store.dir.display(), "failed to poll storage directory");
                }
            }
        });

        Watcher { handle }
    }
}

impl Store for FileStore {
    fn get_item(&self, key: &str) -> EvelyResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> EvelyResult<()> {
        let path = self.path_for(key)?;

        // One temp file per write; writers never share a temp path.
        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", key))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| e.error)?;

        self.seen().insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn remove_item(&self, key: &str) -> EvelyResult<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        self.seen().insert(key.to_string(), None);
        Ok(())
    }

    fn subscribe(&self) -> StorageListener {
        // Only poll_external notifies, so every event seen here is external.
        self.notifier.listener(ContextId::next())
    }
}

/// Background poller started by [`FileStore::spawn_watcher`]; stops on drop.
pub struct Watcher {
    handle: JoinHandle<()>,
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get_item("userEvents").unwrap(), None);
        store.set_item("userEvents", "[]").unwrap();
        assert_eq!(store.get_item("userEvents").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("userEvents.json").exists());

        store.remove_item("userEvents").unwrap();
        assert_eq!(store.get_item("userEvents").unwrap(), None);
        // Removing twice is fine
        store.remove_item("userEvents").unwrap();
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.set_item("../outside", "x").is_err());
        assert!(store.get_item("").is_err());
        assert!(store.get_item(".hidden").is_err());
    }

    #[test]
    fn other_handles_writes_are_found_by_polling() {
        let dir = tempfile::tempdir().unwrap();
        let admin_tab = FileStore::open(dir.path()).unwrap();
        let other_process = FileStore::open(dir.path()).unwrap();
        let mut listener = admin_tab.subscribe();

        other_process.set_item("userEvents", "[1]").unwrap();
        assert!(listener.try_next().is_none());

        assert_eq!(admin_tab.poll_external().unwrap(), 1);
        let event = listener.try_next().unwrap();
        assert_eq!(event.key.as_deref(), Some("userEvents"));
        assert_eq!(event.new_value.as_deref(), Some("[1]"));

        // Nothing new on the next poll
        assert_eq!(admin_tab.poll_external().unwrap(), 0);
    }

    #[test]
    fn own_writes_are_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let mut listener = store.subscribe();

        store.set_item("adminCredentials", "{}").unwrap();
        store.remove_item("adminCredentials").unwrap();

        assert_eq!(store.poll_external().unwrap(), 0);
        assert!(listener.try_next().is_none());
    }

    #[test]
    fn existing_content_is_not_reported_as_a_change() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("allUsers.json"), "[]").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.poll_external().unwrap(), 0);
    }

    #[test]
    fn external_removal_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set_item("eventUser", "{}").unwrap();
        let mut listener = store.subscribe();

        std::fs::remove_file(dir.path().join("eventUser.json")).unwrap();

        assert_eq!(store.poll_external().unwrap(), 1);
        let event = listener.try_next().unwrap();
        assert_eq!(event.old_value.as_deref(), Some("{}"));
        assert_eq!(event.new_value, None);
    }

    #[test]
    fn concurrent_writers_never_tear_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStore::open(dir.path()).unwrap();
        let second = FileStore::open(dir.path()).unwrap();
        let reader = FileStore::open(dir.path()).unwrap();

        let a = format!("[{}]", vec!["\"a\""; 8_000].join(","));
        let b = format!("[{}]", vec!["\"b\""; 8_000].join(","));

        let writer = |store: &FileStore, value: &str| {
            for _ in 0..200 {
                store.set_item("userEvents", value).unwrap();
            }
        };

        std::thread::scope(|scope| {
            scope.spawn(|| writer(&first, &a));
            scope.spawn(|| writer(&second, &b));

            for _ in 0..400 {
                if let Some(read) = reader.get_item("userEvents").unwrap() {
                    assert!(read == a || read == b, "read a mixed value of {} bytes", read.len());
                }
            }
        });

        // No temp files are left behind and none show up as keys.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
        assert_eq!(reader.scan().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn watcher_delivers_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let other = FileStore::open(dir.path()).unwrap();
        let mut listener = store.subscribe();

        let _watcher = store.spawn_watcher(Duration::from_millis(10));
        other.set_item("userEvents", "[]").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), listener.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.key.as_deref(), Some("userEvents"));
    }
}
