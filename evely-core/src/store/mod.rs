//! Key-value storage shared by the pages.
//!
//! Values are JSON text addressed by string keys. Every store handle is one
//! execution context: writes made through a handle are never reported back to
//! that handle's own listeners, only to listeners of other contexts.

mod file;
mod memory;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::error::{EvelyError, EvelyResult};

pub use file::{FileStore, Watcher};
pub use memory::MemoryStore;

const CHANNEL_CAPACITY: usize = 64;

/// Identifies the execution context that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Changes noticed on disk that no handle in this process made.
    pub const EXTERNAL: ContextId = ContextId(0);

    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ContextId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A change made by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// `None` means any key may have changed (missed notifications).
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn changed(key: &str, old_value: Option<String>, new_value: Option<String>) -> Self {
        StorageEvent {
            key: Some(key.to_string()),
            old_value,
            new_value,
        }
    }

    fn everything() -> Self {
        StorageEvent {
            key: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Whether a listener watching `key` should react.
    pub fn affects(&self, key: &str) -> bool {
        self.key.as_deref().is_none_or(|k| k == key)
    }
}

#[derive(Debug, Clone)]
struct Notification {
    origin: ContextId,
    event: StorageEvent,
}

/// Fan-out of storage changes to every listener of a namespace.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Notifier { tx }
    }

    pub(crate) fn notify(&self, origin: ContextId, event: StorageEvent) {
        // No receivers is fine: nobody is listening.
        let _ = self.tx.send(Notification { origin, event });
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub(crate) fn listener(&self, context: ContextId) -> StorageListener {
        StorageListener {
            rx: self.tx.subscribe(),
            context,
        }
    }
}

/// Receives changes made by other contexts. Dropping it unsubscribes.
#[derive(Debug)]
pub struct StorageListener {
    rx: broadcast::Receiver<Notification>,
    context: ContextId,
}

impl StorageListener {
    /// Next pending change, without waiting.
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(n) if n.origin == self.context => continue,
                Ok(n) => return Some(n.event),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "storage listener lagged, treating every key as changed");
                    return Some(StorageEvent::everything());
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next change. Returns `None` once the store is gone.
    pub async fn next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(n) if n.origin == self.context => continue,
                Ok(n) => return Some(n.event),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "storage listener lagged, treating every key as changed");
                    return Some(StorageEvent::everything());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Raw string storage with change subscription.
pub trait Store {
    fn get_item(&self, key: &str) -> EvelyResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> EvelyResult<()>;

    fn remove_item(&self, key: &str) -> EvelyResult<()>;

    /// Listen for changes made by other contexts.
    fn subscribe(&self) -> StorageListener;
}

impl<S: Store + ?Sized> Store for &S {
    fn get_item(&self, key: &str) -> EvelyResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> EvelyResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> EvelyResult<()> {
        (**self).remove_item(key)
    }

    fn subscribe(&self) -> StorageListener {
        (**self).subscribe()
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get_item(&self, key: &str) -> EvelyResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> EvelyResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> EvelyResult<()> {
        (**self).remove_item(key)
    }

    fn subscribe(&self) -> StorageListener {
        (**self).subscribe()
    }
}

/// JSON-typed access on top of any [`Store`].
pub trait StoreExt: Store {
    /// Decode the value under `key`. Absent keys are `None`, corrupt ones an error.
    fn get<T: DeserializeOwned>(&self, key: &str) -> EvelyResult<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| EvelyError::Decode {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Like [`StoreExt::get`], falling back to `T::default()` for absent keys.
    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> EvelyResult<T> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> EvelyResult<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| EvelyError::Serialization(e.to_string()))?;
        self.set_item(key, &raw)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}
