//! In-process store, one namespace shared by any number of contexts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ContextId, Notifier, StorageEvent, StorageListener, Store};
use crate::error::EvelyResult;

struct Namespace {
    items: Mutex<HashMap<String, String>>,
    notifier: Notifier,
}

/// A handle on an in-memory namespace. Each handle is its own context, like
/// one browser tab: use [`MemoryStore::open_context`] to get a sibling handle
/// whose writes this one will be notified about.
pub struct MemoryStore {
    namespace: Arc<Namespace>,
    context: ContextId,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            namespace: Arc::new(Namespace {
                items: Mutex::new(HashMap::new()),
                notifier: Notifier::new(),
            }),
            context: ContextId::next(),
        }
    }

    /// Another context on the same namespace.
    pub fn open_context(&self) -> Self {
        MemoryStore {
            namespace: Arc::clone(&self.namespace),
            context: ContextId::next(),
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Live listeners across every context of this namespace.
    pub fn listener_count(&self) -> usize {
        self.namespace.notifier.listener_count()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.namespace
            .items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get_item(&self, key: &str) -> EvelyResult<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> EvelyResult<()> {
        let old = self.items().insert(key.to_string(), value.to_string());

        if old.as_deref() != Some(value) {
            self.namespace.notifier.notify(
                self.context,
                StorageEvent::changed(key, old, Some(value.to_string())),
            );
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> EvelyResult<()> {
        let old = self.items().remove(key);

        if old.is_some() {
            self.namespace
                .notifier
                .notify(self.context, StorageEvent::changed(key, old, None));
        }
        Ok(())
    }

    fn subscribe(&self) -> StorageListener {
        self.namespace.notifier.listener(self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_contexts_are_notified() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_context();
        let mut listener = tab_b.subscribe();

        tab_a.set_item("userEvents", "[]").unwrap();

        let event = listener.try_next().unwrap();
        assert_eq!(event.key.as_deref(), Some("userEvents"));
        assert_eq!(event.old_value, None);
        assert_eq!(event.new_value.as_deref(), Some("[]"));
        assert!(listener.try_next().is_none());
    }

    #[test]
    fn own_writes_are_not_notified() {
        let tab = MemoryStore::new();
        let mut listener = tab.subscribe();

        tab.set_item("userEvents", "[]").unwrap();
        tab.remove_item("userEvents").unwrap();

        assert!(listener.try_next().is_none());
    }

    #[test]
    fn writes_are_visible_to_every_context() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_context();

        tab_a.set_item("allUsers", "[]").unwrap();
        assert_eq!(tab_b.get_item("allUsers").unwrap().as_deref(), Some("[]"));

        tab_b.remove_item("allUsers").unwrap();
        assert_eq!(tab_a.get_item("allUsers").unwrap(), None);
    }

    #[test]
    fn unchanged_values_and_missing_keys_do_not_notify() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_context();
        tab_a.set_item("eventUser", "{}").unwrap();

        let mut listener = tab_b.subscribe();
        tab_a.set_item("eventUser", "{}").unwrap();
        tab_a.remove_item("adminUser").unwrap();

        assert!(listener.try_next().is_none());
    }

    #[test]
    fn separate_namespaces_are_isolated() {
        let one = MemoryStore::new();
        let two = MemoryStore::new();
        let mut listener = two.subscribe();

        one.set_item("userEvents", "[]").unwrap();

        assert_eq!(two.get_item("userEvents").unwrap(), None);
        assert!(listener.try_next().is_none());
    }

    #[tokio::test]
    async fn listener_wakes_on_remote_write() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_context();
        let mut listener = tab_b.subscribe();

        tab_a.set_item("userEvents", "[1]").unwrap();

        let event = listener.next().await.unwrap();
        assert_eq!(event.new_value.as_deref(), Some("[1]"));
    }
}
