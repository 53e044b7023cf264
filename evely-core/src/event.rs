//! Event records as stored under `userEvents` and in the bundled sample set.
//!
//! Events written by the creation flow may carry fields this crate does not
//! model (descriptions, categories, images...). Those are kept in `extra` so
//! that rewriting the `userEvents` list never drops them.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Timestamp string, usually RFC 3339 or YYYY-MM-DD
    pub date: String,
    /// Zero means free
    pub ticket_price: f64,
    pub venue: Venue,
    pub tickets_available: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub city: String,
    pub capacity: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Venue {
    pub fn new(city: &str, capacity: u32) -> Self {
        Venue {
            city: city.to_string(),
            capacity,
            extra: Map::new(),
        }
    }
}

impl Event {
    pub fn new(id: &str, title: &str, date: &str, ticket_price: f64, venue: Venue, tickets_available: u32) -> Self {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            ticket_price,
            venue,
            tickets_available,
            extra: Map::new(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.ticket_price == 0.0
    }

    /// Anything not free, so free and paid always partition a list.
    pub fn is_paid(&self) -> bool {
        !self.is_free()
    }

    /// No tickets left.
    pub fn is_full(&self) -> bool {
        self.tickets_available == 0
    }

    /// More tickets available than seats at the venue.
    pub fn has_excess_availability(&self) -> bool {
        self.tickets_available > self.venue.capacity
    }

    /// Seats sold, clamped at zero when `tickets_available` exceeds capacity.
    pub fn sold(&self) -> u32 {
        self.venue.capacity.saturating_sub(self.tickets_available)
    }

    /// Revenue from the seats sold so far.
    pub fn revenue(&self) -> f64 {
        self.ticket_price * f64::from(self.sold())
    }

    /// Calendar date of the event for display, or the raw string if it can't be parsed.
    pub fn display_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return dt.date_naive().format("%Y-%m-%d").to_string();
        }
        // Date-only strings and "YYYY-MM-DDTHH:MM" style local timestamps
        let date_part = self.date.get(..10).unwrap_or(&self.date);
        match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(d) => d.format("%Y-%m-%d").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
