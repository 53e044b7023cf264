//! Navigation targets the two pages can push.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Evely,
    Login,
    Signup,
    AdminLogin,
    AdminPromotions,
    ManageTouristPlaces,
    BrowseEvents,
    CreateEvent,
    MyBookings,
    OrganizerDashboard,
    Analytics,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Evely => "/evely",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::AdminLogin => "/admin-login",
            Route::AdminPromotions => "/admin/promotions",
            Route::ManageTouristPlaces => "/manage-tourist-places",
            Route::BrowseEvents => "/browse-events",
            Route::CreateEvent => "/create-event",
            Route::MyBookings => "/my-bookings",
            Route::OrganizerDashboard => "/organizer-dashboard",
            Route::Analytics => "/analytics",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A clickable card or button: what it says and where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

impl Link {
    pub const fn new(title: &'static str, description: &'static str, route: Route) -> Self {
        Link {
            title,
            description,
            route,
        }
    }
}
