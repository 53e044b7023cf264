//! Storage keys and shared defaults.

/// Admin session record.
pub const ADMIN_USER_KEY: &str = "adminUser";

/// Consumer session record.
pub const EVENT_USER_KEY: &str = "eventUser";

/// Events submitted through the creation flow.
pub const USER_EVENTS_KEY: &str = "userEvents";

/// Registered users.
pub const ALL_USERS_KEY: &str = "allUsers";

/// Plaintext admin credential record.
pub const ADMIN_CREDENTIALS_KEY: &str = "adminCredentials";

/// Every key the two pages touch.
pub const ALL_KEYS: [&str; 5] = [
    ADMIN_USER_KEY,
    EVENT_USER_KEY,
    USER_EVENTS_KEY,
    ALL_USERS_KEY,
    ADMIN_CREDENTIALS_KEY,
];

/// How long a transient notice stays visible.
pub const DEFAULT_NOTICE_SECS: u64 = 3;

/// How often the file watcher looks for changes made by other processes.
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 500;
