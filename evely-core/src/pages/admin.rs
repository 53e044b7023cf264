//! EventHub admin dashboard.
//!
//! Mounting checks the admin session first; nothing is loaded for visitors
//! without one. A mounted dashboard owns a [`LiveEvents`] list, so it follows
//! `userEvents` changes made elsewhere until it is dropped or logged out.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::constants::USER_EVENTS_KEY;
use crate::credentials::{CredentialEditor, Notice};
use crate::error::EvelyResult;
use crate::event::Event;
use crate::route::{Link, Route};
use crate::session::{AdminSession, Gate, gate, sign_out};
use crate::stats::EventStats;
use crate::store::{Store, StoreExt};
use crate::sync::LiveEvents;
use crate::user::User;

pub const QUICK_ACTIONS: [Link; 4] = [
    Link::new("Manage Promotions", "Feature and promote events", Route::AdminPromotions),
    Link::new("Tourist Places", "Curate destinations", Route::ManageTouristPlaces),
    Link::new("Browse Events", "See the public listing", Route::BrowseEvents),
    Link::new("Create Event", "Add a new event", Route::CreateEvent),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Events,
    Users,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Events, Tab::Users, Tab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Events => "All Events",
            Tab::Users => "Users",
            Tab::Settings => "Settings",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "events" => Ok(Tab::Events),
            "users" => Ok(Tab::Users),
            "settings" => Ok(Tab::Settings),
            other => Err(format!(
                "Unknown tab '{}'. Expected overview, events, users or settings",
                other
            )),
        }
    }
}

/// Figures shown on the overview cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overview {
    pub stats: EventStats,
    /// Length of the stored `userEvents` list at the time of asking
    pub user_created: usize,
    pub registered_users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub platform: &'static str,
    pub last_login: String,
    pub admin_role: &'static str,
    pub database: &'static str,
    pub total_events: usize,
}

pub struct AdminDashboard<S> {
    admin: AdminSession,
    events: LiveEvents<S>,
    users: Vec<User>,
    tab: Tab,
    editor: CredentialEditor,
    notice: Option<Notice>,
    notice_delay: Duration,
}

impl<S: Store> AdminDashboard<S> {
    pub fn mount(store: S, notice_delay: Duration) -> EvelyResult<Gate<Self>> {
        let admin = match gate::<AdminSession, S>(&store)? {
            Gate::Authenticated(admin) => admin,
            Gate::Unauthenticated { redirect } => return Ok(Gate::Unauthenticated { redirect }),
        };

        let events = LiveEvents::mount(store)?;
        let users = events.repository().users()?;

        tracing::info!(admin = %admin.email, events = events.events().len(), users = users.len(), "admin dashboard mounted");

        Ok(Gate::Authenticated(AdminDashboard {
            admin,
            events,
            users,
            tab: Tab::default(),
            editor: CredentialEditor::default(),
            notice: None,
            notice_delay,
        }))
    }

    fn store(&self) -> &S {
        self.events.repository().store()
    }

    pub fn admin(&self) -> &AdminSession {
        &self.admin
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Apply pending change notifications. Returns whether events were reloaded.
    pub fn sync(&mut self) -> EvelyResult<bool> {
        self.events.sync()
    }

    /// Wait until another context changes `userEvents`, then reload.
    pub async fn changed(&mut self) -> EvelyResult<bool> {
        self.events.changed().await
    }

    /// Delete a user-submitted event; the list shown afterwards is what storage holds.
    pub fn delete_event(&mut self, id: &str) -> EvelyResult<bool> {
        self.events.remove(id)
    }

    pub fn user_created_count(&self) -> EvelyResult<usize> {
        Ok(self.store().get_or_default::<Vec<Event>>(USER_EVENTS_KEY)?.len())
    }

    pub fn overview(&self) -> EvelyResult<Overview> {
        Ok(Overview {
            stats: EventStats::compute(self.events()),
            user_created: self.user_created_count()?,
            registered_users: self.users.len(),
        })
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            platform: "EventHub v1.0",
            last_login: self.admin.last_login(),
            admin_role: "Super Administrator",
            database: "Local Storage",
            total_events: self.events().len(),
        }
    }

    pub fn editor(&self) -> &CredentialEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut CredentialEditor {
        &mut self.editor
    }

    pub fn open_credential_editor(&mut self) {
        self.editor.open();
    }

    pub fn cancel_credential_editor(&mut self) {
        self.editor.cancel();
    }

    /// Submit the credential editor. On success a notice is shown until the
    /// configured delay passes.
    pub fn update_credentials(&mut self, now: Instant) -> EvelyResult<()> {
        let notice = self
            .editor
            .submit(self.events.repository().store(), now, self.notice_delay)?;
        self.notice = Some(notice);
        Ok(())
    }

    /// The current notice, if it hasn't expired. Expired notices are dropped.
    pub fn notice(&mut self, now: Instant) -> Option<&Notice> {
        if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notice = None;
        }
        self.notice.as_ref()
    }

    /// End the admin session and unmount.
    pub fn logout(self) -> EvelyResult<Route> {
        sign_out::<AdminSession, S>(self.store())
    }
}
