//! Consumer home page: landing for visitors, dashboard for signed-in users.

use crate::catalog::{SUPPORT_CHANNELS, SupportChannel, TOURIST_PLACES, TouristPlace};
use crate::error::EvelyResult;
use crate::route::{Link, Route};
use crate::session::{Gate, UserSession, gate, sign_out};
use crate::store::Store;

pub const ENTRY_POINTS: [Link; 3] = [
    Link::new("Login", "Sign in to your account", Route::Login),
    Link::new("Sign Up", "Create an account", Route::Signup),
    Link::new("Admin Access", "Platform administration", Route::AdminLogin),
];

const SHORTCUTS: [Link; 4] = [
    Link::new("Browse Events", "Discover amazing events", Route::BrowseEvents),
    Link::new("Host Event", "Create your own event", Route::CreateEvent),
    Link::new("Share Destinations", "Add tourist places", Route::ManageTouristPlaces),
    Link::new("My Bookings", "Your tickets", Route::MyBookings),
];

const ORGANIZER_SHORTCUTS: [Link; 2] = [
    Link::new("My Events", "Manage events", Route::OrganizerDashboard),
    Link::new("Analytics", "Event insights", Route::Analytics),
];

pub const BRAND_LINK: Route = Route::Evely;

#[derive(Debug, Clone, PartialEq)]
pub enum HomePage {
    Landing,
    Dashboard(HomeDashboard),
}

impl HomePage {
    pub fn mount<S: Store + ?Sized>(store: &S) -> EvelyResult<Self> {
        Ok(match gate::<UserSession, S>(store)? {
            Gate::Authenticated(user) => HomePage::Dashboard(HomeDashboard::new(user)),
            Gate::Unauthenticated { .. } => HomePage::Landing,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeDashboard {
    pub user: UserSession,
    support_open: bool,
}

impl HomeDashboard {
    pub fn new(user: UserSession) -> Self {
        HomeDashboard {
            user,
            support_open: false,
        }
    }

    /// Navigation cards; organizers get two more.
    pub fn shortcuts(&self) -> Vec<Link> {
        let mut links = SHORTCUTS.to_vec();
        if self.user.is_organizer() {
            links.extend(ORGANIZER_SHORTCUTS);
        }
        links
    }

    pub fn places(&self) -> &'static [TouristPlace] {
        &TOURIST_PLACES
    }

    pub fn toggle_support(&mut self) {
        self.support_open = !self.support_open;
    }

    pub fn support_open(&self) -> bool {
        self.support_open
    }

    /// Support panel contents, only while it's expanded.
    pub fn support_channels(&self) -> Option<&'static [SupportChannel]> {
        self.support_open.then_some(&SUPPORT_CHANNELS[..])
    }

    /// Clear the session; the page falls back to the landing view.
    pub fn logout<S: Store + ?Sized>(self, store: &S) -> EvelyResult<HomePage> {
        sign_out::<UserSession, S>(store)?;
        Ok(HomePage::Landing)
    }
}
