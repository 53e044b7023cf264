//! Typed access to the event and user collections.

use crate::catalog::{bundled_events, is_bundled};
use crate::constants::{ALL_USERS_KEY, USER_EVENTS_KEY};
use crate::error::{EvelyError, EvelyResult};
use crate::event::Event;
use crate::store::{Store, StoreExt};
use crate::user::User;

/// Result of [`EventRepository::remove_user_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// Whether a stored event was actually removed
    pub removed: bool,
    /// Bundled plus user-submitted events as stored after the removal
    pub events: Vec<Event>,
}

pub struct EventRepository<S> {
    store: S,
}

impl<S: Store> EventRepository<S> {
    pub fn new(store: S) -> Self {
        EventRepository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Events submitted through the creation flow; empty when none are stored.
    pub fn user_events(&self) -> EvelyResult<Vec<Event>> {
        self.store.get_or_default(USER_EVENTS_KEY)
    }

    /// Bundled events first, then user-submitted ones in stored order.
    pub fn all_events(&self) -> EvelyResult<Vec<Event>> {
        let mut events = bundled_events();
        events.extend(self.user_events()?);
        Ok(events)
    }

    pub fn users(&self) -> EvelyResult<Vec<User>> {
        self.store.get_or_default(ALL_USERS_KEY)
    }

    /// Append an event to the user-submitted list.
    pub fn submit_event(&self, event: Event) -> EvelyResult<()> {
        let mut events = self.user_events()?;
        tracing::info!(id = %event.id, title = %event.title, "submitting event");
        events.push(event);
        self.store.put(USER_EVENTS_KEY, &events)
    }

    pub fn register_user(&self, user: User) -> EvelyResult<()> {
        let mut users = self.users()?;
        tracing::info!(email = %user.email, role = %user.role, "registering user");
        users.push(user);
        self.store.put(ALL_USERS_KEY, &users)
    }

    /// Delete a user-submitted event and return the resulting stored list.
    ///
    /// The filtered list is written back wholesale. Unknown ids write nothing.
    /// Bundled events can't be deleted and are rejected without a write.
    pub fn remove_user_event(&self, id: &str) -> EvelyResult<Removal> {
        let user_events = self.user_events()?;
        let before = user_events.len();

        let remaining: Vec<Event> = user_events.into_iter().filter(|e| e.id != id).collect();

        if remaining.len() == before {
            if is_bundled(id) {
                return Err(EvelyError::BundledEvent(id.to_string()));
            }
            tracing::debug!(id, "no user-submitted event with this id");
            return Ok(Removal {
                removed: false,
                events: self.all_events()?,
            });
        }

        self.store.put(USER_EVENTS_KEY, &remaining)?;
        tracing::info!(id, "deleted user-submitted event");

        Ok(Removal {
            removed: true,
            events: self.all_events()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Venue;
    use crate::store::MemoryStore;
    use crate::user::Role;

    fn user_event(id: &str) -> Event {
        Event::new(id, &format!("Event {id}"), "2025-04-10", 15.0, Venue::new("Boston", 50), 20)
    }

    fn seeded() -> EventRepository<MemoryStore> {
        let repo = EventRepository::new(MemoryStore::new());
        repo.submit_event(user_event("u1")).unwrap();
        repo.submit_event(user_event("u2")).unwrap();
        repo.submit_event(user_event("u3")).unwrap();
        repo
    }

    #[test]
    fn bundled_events_come_first() {
        let repo = seeded();
        let events = repo.all_events().unwrap();
        let bundled = bundled_events();

        assert_eq!(events.len(), bundled.len() + 3);
        assert_eq!(&events[..bundled.len()], &bundled[..]);
        let tail: Vec<_> = events[bundled.len()..].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(tail, ["u1", "u2", "u3"]);
    }

    #[test]
    fn removing_deletes_exactly_one_id() {
        let repo = seeded();

        let removal = repo.remove_user_event("u2").unwrap();

        assert!(removal.removed);
        let stored: Vec<_> = repo.user_events().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(stored, ["u1", "u3"]);
        assert!(removal.events.iter().all(|e| e.id != "u2"));
        assert_eq!(removal.events, repo.all_events().unwrap());
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let repo = seeded();
        let raw_before = repo.store().get_item(USER_EVENTS_KEY).unwrap();
        let mut listener = repo.store().open_context().subscribe();

        let removal = repo.remove_user_event("missing").unwrap();

        assert!(!removal.removed);
        assert_eq!(removal.events, repo.all_events().unwrap());
        assert_eq!(repo.store().get_item(USER_EVENTS_KEY).unwrap(), raw_before);
        assert!(listener.try_next().is_none());
    }

    #[test]
    fn removing_with_nothing_stored_writes_nothing() {
        let repo = EventRepository::new(MemoryStore::new());
        let removal = repo.remove_user_event("u1").unwrap();

        assert!(!removal.removed);
        assert_eq!(repo.store().get_item(USER_EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn bundled_events_cannot_be_removed() {
        let repo = seeded();
        let before = repo.all_events().unwrap();

        let err = repo.remove_user_event("sample-1").unwrap_err();

        assert!(matches!(err, EvelyError::BundledEvent(id) if id == "sample-1"));
        assert_eq!(repo.all_events().unwrap(), before);
    }

    #[test]
    fn removal_keeps_unknown_fields_of_remaining_events() {
        let repo = EventRepository::new(MemoryStore::new());
        repo.store()
            .set_item(
                USER_EVENTS_KEY,
                r#"[{"id":"a","title":"A","date":"2025-01-01","ticketPrice":0,"venue":{"city":"X","capacity":5},"ticketsAvailable":5,"image":"/a.png"},
                   {"id":"b","title":"B","date":"2025-01-02","ticketPrice":0,"venue":{"city":"Y","capacity":5},"ticketsAvailable":5}]"#,
            )
            .unwrap();

        repo.remove_user_event("b").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&repo.store().get_item(USER_EVENTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw[0]["image"], "/a.png");
        assert_eq!(raw.as_array().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_user_events_are_reported() {
        let repo = EventRepository::new(MemoryStore::new());
        repo.store().set_item(USER_EVENTS_KEY, "not json").unwrap();

        assert!(matches!(repo.all_events(), Err(EvelyError::Decode { .. })));
        assert!(matches!(repo.remove_user_event("x"), Err(EvelyError::Decode { .. })));
        assert_eq!(repo.store().get_item(USER_EVENTS_KEY).unwrap().as_deref(), Some("not json"));
    }

    #[test]
    fn registered_users_accumulate() {
        let repo = EventRepository::new(MemoryStore::new());
        assert!(repo.users().unwrap().is_empty());

        repo.register_user(User::new("a@example.com", Role::Attendee, "2025-01-01T00:00:00Z")).unwrap();
        repo.register_user(User::new("o@example.com", Role::Organizer, "2025-01-02T00:00:00Z")).unwrap();

        let emails: Vec<_> = repo.users().unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, ["a@example.com", "o@example.com"]);
    }
}
