pub mod admin;
pub mod config;
pub mod events;
pub mod home;
pub mod session;
pub mod watch;
