//! The two pages, as state machines independent of any rendering.

pub mod admin;
pub mod home;

pub use admin::{AdminDashboard, Overview, SystemInfo, Tab};
pub use home::{HomeDashboard, HomePage};
