//! Keeps an in-memory event list in step with storage.
//!
//! `LiveEvents` loads the combined list when mounted and subscribes to the
//! store for as long as it lives. A change to `userEvents` made by another
//! context triggers a full reload; the subscription ends when it is dropped.
//! Writes made through the same store handle are not reported, so callers that
//! write must use the list returned by the write or call [`LiveEvents::refresh`].

use crate::constants::USER_EVENTS_KEY;
use crate::error::EvelyResult;
use crate::event::Event;
use crate::repository::{EventRepository, Removal};
use crate::store::{StorageEvent, StorageListener, Store};

pub struct LiveEvents<S> {
    repository: EventRepository<S>,
    listener: StorageListener,
    events: Vec<Event>,
}

impl<S: Store> LiveEvents<S> {
    pub fn mount(store: S) -> EvelyResult<Self> {
        // Subscribe before the first read so no change slips between the two.
        let listener = store.subscribe();
        let repository = EventRepository::new(store);
        let events = repository.all_events()?;

        tracing::debug!(count = events.len(), "mounted event list");

        Ok(LiveEvents {
            repository,
            listener,
            events,
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn repository(&self) -> &EventRepository<S> {
        &self.repository
    }

    /// Re-read storage and replace the list.
    pub fn refresh(&mut self) -> EvelyResult<()> {
        self.events = self.repository.all_events()?;
        tracing::debug!(count = self.events.len(), "reloaded event list");
        Ok(())
    }

    /// React to one change notification. Returns whether the list was reloaded.
    pub fn apply(&mut self, event: &StorageEvent) -> EvelyResult<bool> {
        if !event.affects(USER_EVENTS_KEY) {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Handle every pending notification. Returns whether the list was reloaded.
    pub fn sync(&mut self) -> EvelyResult<bool> {
        let mut reloaded = false;
        while let Some(event) = self.listener.try_next() {
            if !reloaded && event.affects(USER_EVENTS_KEY) {
                self.refresh()?;
                reloaded = true;
            }
        }
        Ok(reloaded)
    }

    /// Wait for the next change to `userEvents` from another context and reload.
    ///
    /// Returns `Ok(false)` once the store can no longer deliver notifications.
    pub async fn changed(&mut self) -> EvelyResult<bool> {
        while let Some(event) = self.listener.next().await {
            if self.apply(&event)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Delete a user-submitted event and adopt the stored list that results.
    pub fn remove(&mut self, id: &str) -> EvelyResult<bool> {
        let Removal { removed, events } = self.repository.remove_user_event(id)?;
        self.events = events;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bundled_events;
    use crate::event::Venue;
    use crate::store::{MemoryStore, StoreExt};

    fn user_event(id: &str) -> Event {
        Event::new(id, id, "2025-09-09", 0.0, Venue::new("Miami", 40), 10)
    }

    #[test]
    fn mount_loads_bundled_then_stored() {
        let store = MemoryStore::new();
        store.put(USER_EVENTS_KEY, &vec![user_event("u1")]).unwrap();

        let live = LiveEvents::mount(&store).unwrap();

        assert_eq!(live.events().len(), bundled_events().len() + 1);
        assert_eq!(live.events().last().unwrap().id, "u1");
    }

    #[test]
    fn change_from_another_context_reloads_wholesale() {
        let admin_tab = MemoryStore::new();
        let creator_tab = admin_tab.open_context();
        let mut live = LiveEvents::mount(&admin_tab).unwrap();

        creator_tab.put(USER_EVENTS_KEY, &vec![user_event("u1"), user_event("u2")]).unwrap();
        assert_eq!(live.events().len(), bundled_events().len());

        assert!(live.sync().unwrap());
        assert_eq!(live.events().len(), bundled_events().len() + 2);
        assert!(!live.sync().unwrap());
    }

    #[test]
    fn changes_to_other_keys_are_ignored() {
        let admin_tab = MemoryStore::new();
        let other_tab = admin_tab.open_context();
        let mut live = LiveEvents::mount(&admin_tab).unwrap();

        // Sneak a userEvents value in without a notification, then touch another key.
        admin_tab.put(USER_EVENTS_KEY, &vec![user_event("hidden")]).unwrap();
        other_tab.set_item("allUsers", "[]").unwrap();

        assert!(!live.sync().unwrap());
        assert!(live.events().iter().all(|e| e.id != "hidden"));
    }

    #[test]
    fn own_writes_need_an_explicit_refresh() {
        let store = MemoryStore::new();
        let mut live = LiveEvents::mount(&store).unwrap();

        live.repository().submit_event(user_event("mine")).unwrap();
        assert!(!live.sync().unwrap());
        assert!(live.events().iter().all(|e| e.id != "mine"));

        live.refresh().unwrap();
        assert!(live.events().iter().any(|e| e.id == "mine"));
    }

    #[test]
    fn remove_updates_view_and_storage_together() {
        let store = MemoryStore::new();
        store.put(USER_EVENTS_KEY, &vec![user_event("u1"), user_event("u2")]).unwrap();
        let mut live = LiveEvents::mount(&store).unwrap();

        assert!(live.remove("u1").unwrap());

        assert!(live.events().iter().all(|e| e.id != "u1"));
        assert_eq!(live.events(), live.repository().all_events().unwrap().as_slice());
    }

    #[test]
    fn remove_of_bundled_event_leaves_view_alone() {
        let store = MemoryStore::new();
        let mut live = LiveEvents::mount(&store).unwrap();
        let before = live.events().to_vec();

        assert!(live.remove("sample-2").is_err());
        assert_eq!(live.events(), before.as_slice());
    }

    #[test]
    fn dropping_the_list_releases_its_listener() {
        let store = MemoryStore::new();
        assert_eq!(store.listener_count(), 0);

        let live = LiveEvents::mount(&store).unwrap();
        assert_eq!(store.listener_count(), 1);

        drop(live);
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn changed_resolves_on_remote_write() {
        let admin_tab = MemoryStore::new();
        let creator_tab = admin_tab.open_context();
        let mut live = LiveEvents::mount(&admin_tab).unwrap();

        creator_tab.set_item("allUsers", "[]").unwrap();
        creator_tab.put(USER_EVENTS_KEY, &vec![user_event("u9")]).unwrap();

        assert!(live.changed().await.unwrap());
        assert_eq!(live.events().last().unwrap().id, "u9");
    }
}
