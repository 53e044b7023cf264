//! Session records and the gate each page evaluates when it mounts.
//!
//! Presence of the session key is the whole check: there is no expiry and no
//! re-validation. Logging out removes the key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ADMIN_USER_KEY, EVENT_USER_KEY};
use crate::error::EvelyResult;
use crate::route::Route;
use crate::store::{Store, StoreExt};
use crate::user::Role;

/// Consumer session under `eventUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_time: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSession {
    pub fn new(email: &str, role: Role, login_time: DateTime<Utc>) -> Self {
        UserSession {
            email: email.to_string(),
            role,
            login_time: Some(login_time.to_rfc3339()),
            extra: Map::new(),
        }
    }

    pub fn is_organizer(&self) -> bool {
        self.role == Role::Organizer
    }
}

/// Admin session under `adminUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub email: String,
    #[serde(default)]
    pub login_time: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminSession {
    pub fn new(email: &str, login_time: DateTime<Utc>) -> Self {
        AdminSession {
            email: email.to_string(),
            login_time: login_time.to_rfc3339(),
            extra: Map::new(),
        }
    }

    /// Login time in local time for display, or the raw string.
    pub fn last_login(&self) -> String {
        DateTime::parse_from_rfc3339(&self.login_time)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| self.login_time.clone())
    }
}

/// Outcome of checking a session key on mount.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate<T> {
    Unauthenticated { redirect: Route },
    Authenticated(T),
}

impl<T> Gate<T> {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Gate::Authenticated(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Gate<U> {
        match self {
            Gate::Unauthenticated { redirect } => Gate::Unauthenticated { redirect },
            Gate::Authenticated(t) => Gate::Authenticated(f(t)),
        }
    }
}

/// A kind of session: which key it lives under and where to go without one.
pub trait SessionKind: Serialize + serde::de::DeserializeOwned {
    const KEY: &'static str;
    const LOGIN_ROUTE: Route;
}

impl SessionKind for UserSession {
    const KEY: &'static str = EVENT_USER_KEY;
    const LOGIN_ROUTE: Route = Route::Login;
}

impl SessionKind for AdminSession {
    const KEY: &'static str = ADMIN_USER_KEY;
    const LOGIN_ROUTE: Route = Route::AdminLogin;
}

/// Check for a session record. A corrupt record is an error, not a redirect.
pub fn gate<T: SessionKind, S: Store + ?Sized>(store: &S) -> EvelyResult<Gate<T>> {
    match store.get::<T>(T::KEY)? {
        Some(session) => Ok(Gate::Authenticated(session)),
        None => {
            tracing::debug!(key = T::KEY, "no session, redirecting to {}", T::LOGIN_ROUTE);
            Ok(Gate::Unauthenticated {
                redirect: T::LOGIN_ROUTE,
            })
        }
    }
}

pub fn sign_in<T: SessionKind, S: Store + ?Sized>(store: &S, session: &T) -> EvelyResult<()> {
    store.put(T::KEY, session)?;
    tracing::info!(key = T::KEY, "session started");
    Ok(())
}

/// Clear the session and return where to navigate next.
pub fn sign_out<T: SessionKind, S: Store + ?Sized>(store: &S) -> EvelyResult<Route> {
    store.remove_item(T::KEY)?;
    tracing::info!(key = T::KEY, "session ended");
    Ok(T::LOGIN_ROUTE)
}
