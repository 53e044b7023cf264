//! Registered users as stored under `allUsers`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Organizer,
    Attendee,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Organizer => "Organizer",
            Role::Attendee => "Attendee",
        }
    }
}

/// Records come from an external signup flow: anything that isn't
/// "organizer" reads as an attendee.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;

        Ok(match raw.as_str() {
            Some(role) if role.eq_ignore_ascii_case("organizer") => Role::Organizer,
            _ => Role::Attendee,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Organizer => write!(f, "organizer"),
            Role::Attendee => write!(f, "attendee"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "organizer" => Ok(Role::Organizer),
            "attendee" => Ok(Role::Attendee),
            other => Err(format!(
                "Unknown role '{}'. Expected 'organizer' or 'attendee'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    /// Timestamp string; empty when the record has none
    #[serde(default)]
    pub created_at: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_role() -> Role {
    Role::Attendee
}

impl User {
    pub fn new(email: &str, role: Role, created_at: &str) -> Self {
        User {
            email: email.to_string(),
            role,
            created_at: created_at.to_string(),
            extra: Map::new(),
        }
    }

    /// Join date for display, or the raw string if it isn't RFC 3339.
    pub fn joined(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Organizer".parse::<Role>(), Ok(Role::Organizer));
        assert_eq!("attendee".parse::<Role>(), Ok(Role::Attendee));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn user_reads_stored_shape() {
        let json = r#"{"email":"ana@example.com","role":"organizer","createdAt":"2025-02-11T08:15:00.000Z","name":"Ana"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.role, Role::Organizer);
        assert_eq!(user.role.label(), "Organizer");
        assert_eq!(user.joined(), "2025-02-11");
        assert_eq!(user.extra.get("name"), Some(&Value::from("Ana")));
    }

    #[test]
    fn odd_records_still_decode() {
        let json = r#"[
            {"email":"a@example.com","role":"admin","createdAt":"2025-01-01T00:00:00Z"},
            {"email":"b@example.com","role":"ORGANIZER"},
            {"email":"c@example.com","role":null},
            {"email":"d@example.com"}
        ]"#;
        let users: Vec<User> = serde_json::from_str(json).unwrap();

        let roles: Vec<_> = users.iter().map(|u| u.role).collect();
        assert_eq!(roles, [Role::Attendee, Role::Organizer, Role::Attendee, Role::Attendee]);
        assert_eq!(users[1].created_at, "");
        assert_eq!(users[1].joined(), "");
    }
}
