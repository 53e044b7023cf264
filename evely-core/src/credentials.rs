//! Admin credential record and the settings-panel editor that replaces it.
//!
//! The record is plaintext JSON under `adminCredentials` and is always
//! overwritten as a whole.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::ADMIN_CREDENTIALS_KEY;
use crate::error::{EvelyError, EvelyResult};
use crate::store::{Store, StoreExt};

pub const CREDENTIALS_UPDATED: &str = "Credentials updated successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn load<S: Store + ?Sized>(store: &S) -> EvelyResult<Option<Self>> {
        store.get(ADMIN_CREDENTIALS_KEY)
    }

    /// Overwrite the stored record. Both fields must be non-empty.
    pub fn replace<S: Store + ?Sized>(store: &S, email: &str, password: &str) -> EvelyResult<Self> {
        if email.is_empty() {
            return Err(EvelyError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(EvelyError::MissingField("password"));
        }

        let credentials = AdminCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        store.put(ADMIN_CREDENTIALS_KEY, &credentials)?;
        tracing::info!(email, "admin credentials replaced");

        Ok(credentials)
    }

    /// Accept a login attempt. With no stored record any attempt is accepted.
    pub fn check<S: Store + ?Sized>(store: &S, email: &str, password: &str) -> EvelyResult<()> {
        match Self::load(store)? {
            Some(stored) if stored.email != email || stored.password != password => {
                Err(EvelyError::InvalidCredentials(email.to_string()))
            }
            Some(_) => Ok(()),
            None => {
                tracing::warn!("no admin credentials stored, accepting first login");
                Ok(())
            }
        }
    }
}

/// A message that disappears on its own after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: &str, shown_at: Instant, ttl: Duration) -> Self {
        Notice {
            message: message.to_string(),
            expires_at: shown_at + ttl,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// The collapsible email/password form in the admin settings tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialEditor {
    pub open: bool,
    pub email: String,
    pub password: String,
}

impl CredentialEditor {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Collapse and clear without writing anything.
    pub fn cancel(&mut self) {
        *self = CredentialEditor::default();
    }

    /// Write the entered credentials. On success the form is cleared and
    /// collapsed and a success notice is returned; on a missing field nothing
    /// is written and the form keeps its contents.
    pub fn submit<S: Store + ?Sized>(
        &mut self,
        store: &S,
        now: Instant,
        notice_delay: Duration,
    ) -> EvelyResult<Notice> {
        AdminCredentials::replace(store, &self.email, &self.password)?;
        self.cancel();
        Ok(Notice::new(CREDENTIALS_UPDATED, now, notice_delay))
    }
}
