use anyhow::Result;
use evely_core::event::{Event, Venue};
use evely_core::repository::EventRepository;
use evely_core::store::Store;
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::render::{Render, event_table_header};

pub struct Submission {
    pub title: String,
    pub date: String,
    pub price: f64,
    pub city: String,
    pub capacity: u32,
    pub available: Option<u32>,
}

impl Submission {
    fn into_event(self) -> Result<Event> {
        if self.title.trim().is_empty() {
            anyhow::bail!("Event title can't be empty");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            anyhow::bail!("Ticket price must be zero or more, got {}", self.price);
        }

        let available = self.available.unwrap_or(self.capacity);
        if available > self.capacity {
            anyhow::bail!(
                "Tickets available ({}) can't exceed the venue capacity ({})",
                available,
                self.capacity
            );
        }

        Ok(Event::new(
            &Uuid::new_v4().to_string(),
            self.title.trim(),
            &self.date,
            self.price,
            Venue::new(&self.city, self.capacity),
            available,
        ))
    }
}

pub fn submit<S: Store + ?Sized>(store: &S, submission: Submission) -> Result<()> {
    let event = submission.into_event()?;

    EventRepository::new(store).submit_event(event.clone())?;

    println!("{}", "Event submitted".green());
    println!("{}", event_table_header());
    println!("{}", event.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evely_core::store::MemoryStore;

    fn submission() -> Submission {
        Submission {
            title: "Jazz Night".to_string(),
            date: "2025-03-20".to_string(),
            price: 20.0,
            city: "Chicago".to_string(),
            capacity: 100,
            available: None,
        }
    }

    #[test]
    fn availability_defaults_to_capacity() {
        let event = submission().into_event().unwrap();
        assert_eq!(event.tickets_available, 100);
        assert_eq!(event.sold(), 0);
        assert!(Uuid::parse_str(&event.id).is_ok());
    }

    #[test]
    fn availability_above_capacity_is_refused() {
        let mut s = submission();
        s.available = Some(101);
        assert!(s.into_event().is_err());
    }

    #[test]
    fn negative_price_is_refused() {
        let mut s = submission();
        s.price = -1.0;
        assert!(s.into_event().is_err());
    }

    #[test]
    fn submit_appends_to_user_events() {
        let store = MemoryStore::new();
        submit(&store, submission()).unwrap();
        submit(&store, submission()).unwrap();

        let events = EventRepository::new(&store).user_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_ne!(events[0].id, events[1].id);
    }
}
