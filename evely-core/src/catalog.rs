//! Content that ships with the app: sample events, tourist destinations and
//! support contacts.

use crate::event::{Event, Venue};

/// The fixed sample events listed ahead of user-submitted ones.
pub fn bundled_events() -> Vec<Event> {
    vec![
        Event::new("sample-1", "Summer Music Festival", "2025-07-12T16:00:00Z", 75.0, Venue::new("Los Angeles", 5000), 1200),
        Event::new("sample-2", "Tech Innovators Summit", "2025-09-03T09:00:00Z", 150.0, Venue::new("San Francisco", 800), 150),
        Event::new("sample-3", "Community Farmers Market", "2025-06-21T08:00:00Z", 0.0, Venue::new("Seattle", 1000), 1000),
        Event::new("sample-4", "Broadway Classics Night", "2025-10-18T19:30:00Z", 120.0, Venue::new("New York", 1500), 0),
        Event::new("sample-5", "Riverfront Food Truck Rally", "2025-08-09T11:00:00Z", 0.0, Venue::new("Chicago", 2500), 900),
        Event::new("sample-6", "Startup Pitch Night", "2025-11-05T18:00:00Z", 25.0, Venue::new("Austin", 300), 85),
    ]
}

pub fn is_bundled(id: &str) -> bool {
    bundled_events().iter().any(|e| e.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouristPlace {
    pub id: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub description: &'static str,
}

pub static TOURIST_PLACES: [TouristPlace; 6] = [
    TouristPlace {
        id: "1",
        name: "Statue of Liberty",
        city: "New York",
        description: "Iconic symbol of freedom and one of the most visited attractions in the US",
    },
    TouristPlace {
        id: "2",
        name: "Golden Gate Bridge",
        city: "San Francisco",
        description: "Iconic suspension bridge connecting San Francisco to Marin County",
    },
    TouristPlace {
        id: "3",
        name: "Hollywood Sign",
        city: "Los Angeles",
        description: "Famous landmark overlooking the Hollywood district of Los Angeles",
    },
    TouristPlace {
        id: "4",
        name: "Space Needle",
        city: "Seattle",
        description: "Observation tower offering panoramic views of Seattle and surrounding mountains",
    },
    TouristPlace {
        id: "5",
        name: "Disney World",
        city: "Orlando",
        description: "World-renowned theme park resort with attractions for all ages",
    },
    TouristPlace {
        id: "6",
        name: "Niagara Falls",
        city: "New York",
        description: "Breathtaking natural waterfall and major tourist attraction",
    },
];

/// One way of reaching support from the home page panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportChannel {
    pub name: &'static str,
    pub availability: &'static str,
    pub contact: &'static str,
}

pub static SUPPORT_CHANNELS: [SupportChannel; 4] = [
    SupportChannel {
        name: "Phone Support",
        availability: "Available 24/7",
        contact: "+1 (800) EVELY-99",
    },
    SupportChannel {
        name: "Email Support",
        availability: "Response within 2 hours",
        contact: "support@evely.com",
    },
    SupportChannel {
        name: "Live Chat",
        availability: "Instant assistance",
        contact: "Start Chat Now",
    },
    SupportChannel {
        name: "FAQ & Help Center",
        availability: "Common questions answered",
        contact: "Visit Help Center",
    },
];

pub const FEEDBACK_EMAIL: &str = "feedback@evely.com";
